//! Google 服务客户端
//!
//! 启动时通过 [`GoogleServices::connect`] 一次性完成鉴权，
//! 之后三个客户端只读共享，不需要加锁。

pub mod drive_client;
pub mod forms_client;
pub mod google_client;
pub mod sheet_client;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::infrastructure::{load_service_account, TokenProvider, REQUIRED_SCOPES};

pub use drive_client::DriveClient;
pub use forms_client::FormsClient;
pub use google_client::{validate_resource_id, GoogleClient};
pub use sheet_client::SheetClient;

/// 已鉴权的三个服务句柄
#[derive(Clone)]
pub struct GoogleServices {
    pub forms: FormsClient,
    pub drive: DriveClient,
    pub sheet: SheetClient,
}

impl GoogleServices {
    /// 加载凭据并连接全部服务
    ///
    /// 任一步失败都直接返回错误，调用方应中止启动。
    pub async fn connect(config: &Config) -> Result<Self> {
        validate_resource_id("destination folder id", &config.destination_folder_id)?;

        let key = load_service_account(config).await.context("无法加载服务账号凭据")?;

        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .context("无法创建 HTTP 客户端")?;

        let tokens = Arc::new(TokenProvider::new(http.clone(), &key, &REQUIRED_SCOPES)?);

        // 提前换取一次令牌，凭据无效时在启动阶段失败
        tokens.access_token().await.context("服务账号鉴权失败")?;

        let google = GoogleClient::new(http, tokens);
        let forms = FormsClient::new(google.clone(), config);
        let drive = DriveClient::new(google.clone(), config);

        let spreadsheet_id = drive
            .find_spreadsheet(&config.spreadsheet_name)
            .await
            .with_context(|| format!("无法打开表格: {}", config.spreadsheet_name))?;
        let sheet = SheetClient::open(google, config, spreadsheet_id).await?;

        info!(
            "✓ 已连接 Google 服务，审计表格: {} / {}",
            config.spreadsheet_name,
            sheet.sheet_title()
        );

        Ok(Self { forms, drive, sheet })
    }
}
