//! 服务账号凭据加载 - 基础设施层
//!
//! 凭据来源（按优先级）:
//! 1. 环境变量 `GCP_SERVICE_ACCOUNT`（JSON 字符串）
//! 2. 密钥文件中的 `gcp_service_account`（JSON 字符串或 TOML 表）

use std::fmt;

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::CredentialError;

/// 访问 Drive、Sheets、Forms 所需的权限范围
pub const REQUIRED_SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/forms.body",
    "https://www.googleapis.com/auth/forms.responses.readonly",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Google 服务账号密钥
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// 私钥不进日志
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// 从 JSON 字符串解析并校验
    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let key: Self = serde_json::from_str(json)?;
        key.validate()
    }

    fn validate(self) -> Result<Self, CredentialError> {
        if self.key_type != "service_account" {
            return Err(CredentialError::WrongType(self.key_type));
        }
        if self.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField { field: "client_email" });
        }
        if self.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField { field: "private_key" });
        }
        if self.token_uri.trim().is_empty() {
            return Err(CredentialError::MissingField { field: "token_uri" });
        }
        Ok(self)
    }
}

#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    gcp_service_account: Option<toml::Value>,
}

/// 从密钥存储加载服务账号
pub async fn load_service_account(config: &Config) -> Result<ServiceAccountKey, CredentialError> {
    if let Some(json) = &config.service_account_json {
        debug!("使用环境变量 GCP_SERVICE_ACCOUNT 中的凭据");
        return ServiceAccountKey::from_json(json);
    }

    let path = config.secrets_file.as_str();
    let content = fs::read_to_string(path)
        .await
        .map_err(|_| CredentialError::SecretMissing { path: path.to_string() })?;

    let key = parse_secrets(&content, path)?;
    info!("🔐 已从 {} 加载服务账号: {}", path, key.client_email);
    Ok(key)
}

/// 解析 TOML 密钥文件内容
pub fn parse_secrets(content: &str, path: &str) -> Result<ServiceAccountKey, CredentialError> {
    let secrets: SecretsFile = toml::from_str(content).map_err(|source| CredentialError::SecretsFileInvalid {
        path: path.to_string(),
        source,
    })?;

    match secrets.gcp_service_account {
        Some(toml::Value::String(json)) => ServiceAccountKey::from_json(&json),
        Some(table @ toml::Value::Table(_)) => {
            let key: ServiceAccountKey =
                table
                    .try_into()
                    .map_err(|source| CredentialError::SecretsFileInvalid {
                        path: path.to_string(),
                        source,
                    })?;
            key.validate()
        }
        _ => Err(CredentialError::SecretMissing { path: path.to_string() }),
    }
}
