//! 提交流程的阶段与结果

use std::fmt::Display;

use crate::models::{AuditRow, RemoteForm};

/// 流程阶段
///
/// Created → ItemsAdded → Filed | FilingFailed → Logged → Reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Created,
    ItemsAdded,
    Filed,
    FilingFailed,
    Logged,
    Reported,
}

impl Display for SubmissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmissionStage::Created => "created",
            SubmissionStage::ItemsAdded => "items-added",
            SubmissionStage::Filed => "filed",
            SubmissionStage::FilingFailed => "filing-failed",
            SubmissionStage::Logged => "logged",
            SubmissionStage::Reported => "reported",
        };
        f.write_str(name)
    }
}

/// 阶段轨迹，如 `created → items-added → filed`
pub fn stage_trace(stages: &[SubmissionStage]) -> String {
    stages
        .iter()
        .map(|stage| stage.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// 归档到目标文件夹的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingStatus {
    Filed,
    /// 归档失败（不影响后续步骤），附错误信息
    Failed(String),
}

impl FilingStatus {
    pub fn is_filed(&self) -> bool {
        matches!(self, FilingStatus::Filed)
    }
}

/// 一次成功提交的结果
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub form: RemoteForm,
    pub view_url: String,
    pub filing: FilingStatus,
    pub audit_row: AuditRow,
    /// 二维码 data URI；生成失败时为 None
    pub qr_data_uri: Option<String>,
    /// 依次经过的阶段
    pub stages: Vec<SubmissionStage>,
}
