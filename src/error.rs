use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 凭据相关错误（启动阶段致命）
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
    /// Google API 调用错误
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// 二维码生成错误
    #[error("QR code error: {0}")]
    Qr(String),
}

/// 凭据相关错误
#[derive(Debug, Error)]
pub enum CredentialError {
    /// 密钥存储中没有服务账号
    #[error("service account secret `gcp_service_account` not found (checked GCP_SERVICE_ACCOUNT and {path})")]
    SecretMissing { path: String },
    /// 密钥文件无法解析
    #[error("secrets file {path} is not valid TOML: {source}")]
    SecretsFileInvalid {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 服务账号 JSON 格式错误
    #[error("service account JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// 缺少必要字段
    #[error("service account JSON lacks field `{field}`")]
    MissingField { field: &'static str },
    /// 类型不是 service_account
    #[error("credential type `{0}` is not a service account")]
    WrongType(String),
    /// 私钥无法用于签名
    #[error("private key rejected: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
    /// 令牌交换被拒绝（密钥失效或缺少权限范围）
    #[error("token exchange rejected ({status}): {message}")]
    TokenRejected { status: u16, message: String },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("{endpoint} returned {status}: {message}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// API 返回结构与预期不符
    #[error("unexpected response from {endpoint}: {detail}")]
    UnexpectedResponse { endpoint: String, detail: String },
    /// 按名称找不到表格
    #[error("spreadsheet `{0}` not found or not shared with the service account")]
    SpreadsheetNotFound(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// ID 中包含非法字符
    #[error("{name} `{value}` is not a valid Google resource id")]
    InvalidId { name: &'static str, value: String },
    /// API 基础地址无效
    #[error("API base URL `{0}` is invalid")]
    InvalidBaseUrl(String),
}

/// 提交流程错误
///
/// 创建表单、写入题目失败时没有可用链接；审计日志失败时表单已存在，携带链接供展示。
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// 创建空表单失败
    #[error("could not create the form: {source}")]
    CreateFormFailed {
        #[source]
        source: AppError,
    },
    /// 写入题目失败（空表单可能残留）
    #[error("form {form_id} was created but adding questions failed: {source}")]
    AddItemsFailed {
        form_id: String,
        #[source]
        source: AppError,
    },
    /// 追加审计行失败
    #[error("form created at {form_url} but the audit log could not be updated: {source}")]
    AuditLogFailed {
        form_url: String,
        #[source]
        source: AppError,
    },
}

impl SubmissionError {
    /// 已创建表单的链接（如果有）
    pub fn form_url(&self) -> Option<&str> {
        match self {
            SubmissionError::AuditLogFailed { form_url, .. } => Some(form_url),
            _ => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建API错误响应
    pub fn bad_response(endpoint: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
