//! 提交数据、远程表单与审计行

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{Question, TestConfig, TrainerInfo};

/// 审计行的时间格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 一次提交的只读数据包
///
/// 仅在单次"生成表单"操作期间存在，不做本地持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    trainer: TrainerInfo,
    test: TestConfig,
    questions: Vec<Question>,
}

impl FormSubmission {
    /// 创建提交数据包
    ///
    /// 题目数量以实际传入的 questions 为准，TestConfig 中的数量仅用于渲染。
    pub fn new(trainer: TrainerInfo, test: TestConfig, questions: Vec<Question>) -> Self {
        Self {
            trainer,
            test,
            questions,
        }
    }

    pub fn trainer(&self) -> &TrainerInfo {
        &self.trainer
    }

    pub fn test(&self) -> &TestConfig {
        &self.test
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 表单标题: "<测试标题> - <学校名称>"
    pub fn form_title(&self) -> String {
        format!("{} - {}", self.test.title, self.trainer.institution_name)
    }

    /// 根据创建好的远程表单生成审计行
    pub fn audit_row(&self, form: &RemoteForm, at: DateTime<Local>) -> AuditRow {
        AuditRow {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            trainer_name: self.trainer.trainer_name.clone(),
            institution_name: self.trainer.institution_name.clone(),
            test_title: self.test.title.clone(),
            form_url: form.view_url(),
        }
    }
}

/// 远程表单服务分配的表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteForm {
    pub form_id: String,
    /// 服务端返回的 responderUri（可能缺失）
    pub responder_uri: Option<String>,
}

impl RemoteForm {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            responder_uri: None,
        }
    }

    /// 公开访问链接
    pub fn view_url(&self) -> String {
        format!("https://docs.google.com/forms/d/{}/viewform", self.form_id)
    }
}

/// 追加到表格中的一行审计记录（只追加，不更新）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRow {
    pub timestamp: String,
    pub trainer_name: String,
    pub institution_name: String,
    pub test_title: String,
    pub form_url: String,
}

impl AuditRow {
    /// 固定五列: 时间、培训师、学校、标题、链接
    pub fn to_values(&self) -> [String; 5] {
        [
            self.timestamp.clone(),
            self.trainer_name.clone(),
            self.institution_name.clone(),
            self.test_title.clone(),
            self.form_url.clone(),
        ]
    }
}
