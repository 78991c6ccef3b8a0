//! Forms v1 请求结构
//!
//! 只覆盖本项目用到的字段: forms.create 与 forms.batchUpdate 的 createItem。

use serde::{Deserialize, Serialize};

/// forms.create 请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFormRequest {
    pub info: FormInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    pub title: String,
    pub document_title: String,
}

/// forms.create 响应中我们关心的部分
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedForm {
    pub form_id: String,
    #[serde(default)]
    pub responder_uri: Option<String>,
}

/// forms.batchUpdate 请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdateFormRequest {
    pub requests: Vec<Request>,
}

/// 单个更新操作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateItem(CreateItemRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub item: Item,
    pub location: Location,
}

/// 插入位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_item: QuestionItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub question: QuestionSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    TextQuestion(TextQuestion),
    ChoiceQuestion(ChoiceQuestion),
}

/// 简答题（单行）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuestion {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    #[serde(rename = "type")]
    pub choice_type: ChoiceType,
    pub options: Vec<ChoiceOption>,
    pub shuffle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    Radio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
}

impl Request {
    /// 请求中 item 的插入位置
    pub fn index(&self) -> usize {
        match self {
            Request::CreateItem(create) => create.location.index,
        }
    }

    pub fn item(&self) -> &Item {
        match self {
            Request::CreateItem(create) => &create.item,
        }
    }
}
