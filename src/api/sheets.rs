//! Sheets v4 请求/响应结构

use serde::{Deserialize, Serialize};

/// spreadsheets.get (fields=sheets.properties) 响应
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

impl SpreadsheetMeta {
    /// 第一个工作表（按 index 排序）
    pub fn first_sheet(&self) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|sheet| &sheet.properties)
            .min_by_key(|props| props.index)
    }
}

/// values.append 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub major_dimension: &'static str,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn single_row(row: impl IntoIterator<Item = String>) -> Self {
        Self {
            major_dimension: "ROWS",
            values: vec![row.into_iter().collect()],
        }
    }
}
