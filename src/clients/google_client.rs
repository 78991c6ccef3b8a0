//! Google REST 通用客户端
//!
//! 封装鉴权头、URL 拼接和错误响应解析，供 Forms / Drive / Sheets 客户端共用。

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::infrastructure::TokenProvider;

/// 校验 Google 资源 ID（表单、文件、文件夹、表格）
pub fn validate_resource_id(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidId {
            name,
            value: value.to_string(),
        })
    }
}

/// 在基础地址后追加路径段（自动转义）
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, ConfigError> {
    let mut url = Url::parse(base).map_err(|_| ConfigError::InvalidBaseUrl(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ConfigError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// 从错误响应体中提取可读信息
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({})", envelope.error.message, status),
            None => envelope.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Google API 客户端
///
/// 职责：
/// - 持有共享的 HTTP 连接池与令牌提供者
/// - 发送带 Bearer 令牌的 JSON 请求
/// - 把非 2xx 响应转换为 ApiError
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
}

impl GoogleClient {
    pub fn new(http: reqwest::Client, tokens: Arc<TokenProvider>) -> Self {
        Self { http, tokens }
    }

    /// 发送请求并解析 JSON 响应
    ///
    /// # 参数
    /// - `endpoint`: 用于日志与错误信息的接口名
    /// - `method`: HTTP 方法
    /// - `url`: 完整地址（含查询参数）
    /// - `body`: 请求体（可选）
    pub async fn send_json<B, T>(&self, endpoint: &str, method: Method, url: Url, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.access_token().await?;

        debug!("{} {} ({})", method, url, endpoint);

        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::bad_response(endpoint, status.as_u16(), error_message(&text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        // 部分接口成功时返回空体
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };

        serde_json::from_str(text).map_err(|e| {
            AppError::Api(ApiError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })
        })
    }
}
