use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// Web 服务监听地址
    pub bind_addr: String,
    /// 密钥文件（TOML，包含 gcp_service_account）
    pub secrets_file: String,
    /// 直接通过环境变量提供的服务账号 JSON（优先于密钥文件）
    pub service_account_json: Option<String>,
    /// 审计日志表格名称
    pub spreadsheet_name: String,
    /// 表单归档目标文件夹 ID
    pub destination_folder_id: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 单次 HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    // --- Google API 地址 ---
    pub forms_api_base_url: String,
    pub drive_api_base_url: String,
    pub sheets_api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8501".to_string(),
            secrets_file: "secrets.toml".to_string(),
            service_account_json: None,
            spreadsheet_name: "Pre-Post Test".to_string(),
            destination_folder_id: "1moTA94vOTorwpnUpGQZnKz5-5S9jYeBw".to_string(),
            verbose_logging: false,
            http_timeout_secs: 60,
            forms_api_base_url: "https://forms.googleapis.com/v1".to_string(),
            drive_api_base_url: "https://www.googleapis.com/drive/v3".to_string(),
            sheets_api_base_url: "https://sheets.googleapis.com/v4".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            secrets_file: std::env::var("SECRETS_FILE").unwrap_or(default.secrets_file),
            service_account_json: std::env::var("GCP_SERVICE_ACCOUNT").ok().filter(|v| !v.trim().is_empty()),
            spreadsheet_name: std::env::var("SPREADSHEET_NAME").unwrap_or(default.spreadsheet_name),
            destination_folder_id: std::env::var("DESTINATION_FOLDER_ID").unwrap_or(default.destination_folder_id),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.http_timeout_secs),
            forms_api_base_url: std::env::var("FORMS_API_BASE_URL").unwrap_or(default.forms_api_base_url),
            drive_api_base_url: std::env::var("DRIVE_API_BASE_URL").unwrap_or(default.drive_api_base_url),
            sheets_api_base_url: std::env::var("SHEETS_API_BASE_URL").unwrap_or(default.sheets_api_base_url),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
