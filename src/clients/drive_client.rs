//! Drive API 客户端

use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::drive::spreadsheet_query;
use crate::api::DriveFileList;
use crate::clients::google_client::{endpoint_url, validate_resource_id, GoogleClient};
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::services::DriveApi;

/// 云端硬盘客户端
#[derive(Clone)]
pub struct DriveClient {
    google: GoogleClient,
    base_url: String,
}

impl DriveClient {
    pub fn new(google: GoogleClient, config: &Config) -> Self {
        Self {
            google,
            base_url: config.drive_api_base_url.clone(),
        }
    }

    /// 按名称查找表格，返回表格 ID
    pub async fn find_spreadsheet(&self, name: &str) -> AppResult<String> {
        let mut url = endpoint_url(&self.base_url, &["files"])?;
        url.query_pairs_mut()
            .append_pair("q", &spreadsheet_query(name))
            .append_pair("fields", "files(id,name)")
            .append_pair("pageSize", "1")
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let list: DriveFileList = self
            .google
            .send_json("drive.files.list", Method::GET, url, None::<&Value>)
            .await?;

        let file = list
            .files
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::SpreadsheetNotFound(name.to_string()))?;
        debug!("找到表格 {} -> {}", file.name, file.id);
        Ok(file.id)
    }
}

impl DriveApi for DriveClient {
    async fn move_to_folder(&self, file_id: &str, folder_id: &str) -> AppResult<()> {
        validate_resource_id("file id", file_id)?;
        validate_resource_id("folder id", folder_id)?;

        let mut url = endpoint_url(&self.base_url, &["files", file_id])?;
        url.query_pairs_mut()
            .append_pair("addParents", folder_id)
            .append_pair("supportsAllDrives", "true")
            .append_pair("fields", "id,parents");

        let _: Value = self
            .google
            .send_json("drive.files.update", Method::PATCH, url, Some(&json!({})))
            .await?;
        Ok(())
    }
}
