//! Sheets API 客户端
//!
//! 绑定到某个表格的第一个工作表，只提供追加行能力。

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::api::{SpreadsheetMeta, ValueRange};
use crate::clients::google_client::{endpoint_url, validate_resource_id, GoogleClient};
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::AuditRow;
use crate::services::AuditLog;

/// 工作表客户端
#[derive(Clone)]
pub struct SheetClient {
    google: GoogleClient,
    base_url: String,
    spreadsheet_id: String,
    sheet_title: String,
}

impl SheetClient {
    /// 打开表格并绑定第一个工作表
    pub async fn open(google: GoogleClient, config: &Config, spreadsheet_id: String) -> AppResult<Self> {
        validate_resource_id("spreadsheet id", &spreadsheet_id)?;
        let base_url = config.sheets_api_base_url.clone();

        let mut url = endpoint_url(&base_url, &["spreadsheets", &spreadsheet_id])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let meta: SpreadsheetMeta = google
            .send_json("sheets.get", Method::GET, url, None::<&Value>)
            .await?;
        let sheet_title = meta
            .first_sheet()
            .map(|props| props.title.clone())
            .ok_or_else(|| ApiError::UnexpectedResponse {
                endpoint: "sheets.get".to_string(),
                detail: format!("spreadsheet {} has no sheets", spreadsheet_id),
            })?;

        debug!("审计表格 {} 使用工作表 {}", spreadsheet_id, sheet_title);

        Ok(Self {
            google,
            base_url,
            spreadsheet_id,
            sheet_title,
        })
    }

    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    /// A1 表示法中的工作表范围，如 'Sheet1'
    pub fn range(&self) -> String {
        quote_sheet_title(&self.sheet_title)
    }
}

/// 工作表名加单引号，内部单引号加倍
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

impl AuditLog for SheetClient {
    async fn append_row(&self, row: &AuditRow) -> AppResult<()> {
        let segment = format!("{}:append", self.range());
        let mut url = endpoint_url(&self.base_url, &["spreadsheets", &self.spreadsheet_id, "values", &segment])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = ValueRange::single_row(row.to_values());
        let _: Value = self
            .google
            .send_json("sheets.values.append", Method::POST, url, Some(&body))
            .await?;
        Ok(())
    }
}
