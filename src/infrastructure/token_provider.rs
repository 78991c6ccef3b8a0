//! OAuth2 令牌提供者 - 基础设施层
//!
//! 持有唯一的服务账号私钥，只暴露"获取访问令牌"的能力。
//! 使用 JWT bearer 授权流程，令牌在过期前 60 秒刷新。

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, CredentialError};
use crate::infrastructure::credentials::ServiceAccountKey;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

/// 令牌过期时间；`expires_in` 超出范围时按断言有效期计算
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or_else(|| now + Duration::seconds(ASSERTION_LIFETIME_SECS))
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

/// 访问令牌提供者
///
/// 职责：
/// - 持有服务账号私钥
/// - 签发 JWT 断言并换取访问令牌
/// - 缓存令牌，供所有 Google 客户端共享
pub struct TokenProvider {
    http: reqwest::Client,
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// 创建令牌提供者，私钥无法解析时立即失败
    pub fn new(http: reqwest::Client, key: &ServiceAccountKey, scopes: &[&str]) -> Result<Self, CredentialError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(Self {
            http,
            client_email: key.client_email.clone(),
            token_uri: key.token_uri.clone(),
            encoding_key,
            scope: scopes.join(" "),
            cached: Mutex::new(None),
        })
    }

    /// 签发 JWT 断言
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, CredentialError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// 获取有效的访问令牌（必要时刷新）
    pub async fn access_token(&self) -> AppResult<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let fresh = self.fetch(now).await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    async fn fetch(&self, now: DateTime<Utc>) -> AppResult<CachedToken> {
        debug!("正在换取访问令牌: {}", self.token_uri);

        let assertion = self.assertion(now)?;
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.token_uri, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CredentialError::TokenRejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(&self.token_uri, e))?;

        info!("✓ 已获取访问令牌，有效期 {} 秒", body.expires_in);

        Ok(CachedToken {
            value: body.access_token,
            expires_at: expiry_after(now, body.expires_in),
        })
    }
}
