//! Drive v3 响应结构

use serde::Deserialize;

/// files.list 响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// 按名称查找表格的 files.list 查询语句
pub fn spreadsheet_query(name: &str) -> String {
    // Drive 查询语法中单引号与反斜杠需要转义
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
        escaped
    )
}
