//! 表单提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 创建空表单（失败则中止）
//! 2. 批量写入题目（失败则中止，不回滚）
//! 3. 移动到目标文件夹（失败只警告，继续）
//! 4. 追加审计行（失败则报错，但链接仍可展示）
//! 5. 生成链接与二维码

use chrono::Local;
use tracing::{error, info, warn};

use crate::error::SubmissionError;
use crate::models::FormSubmission;
use crate::services::{AuditLog, DriveApi, FormBuilder, FormsApi, QrService};
use crate::utils::logging::truncate_text;
use crate::workflow::stage::{stage_trace, FilingStatus, SubmissionOutcome, SubmissionStage};

/// 表单提交流程
///
/// - 编排远程调用的顺序
/// - 决定哪些失败是致命的
/// - 不持有任何凭据，只依赖能力 trait
pub struct SubmissionFlow<'a, F, D, A> {
    forms: &'a F,
    drive: &'a D,
    audit: &'a A,
    destination_folder_id: &'a str,
}

impl<'a, F, D, A> SubmissionFlow<'a, F, D, A>
where
    F: FormsApi,
    D: DriveApi,
    A: AuditLog,
{
    pub fn new(forms: &'a F, drive: &'a D, audit: &'a A, destination_folder_id: &'a str) -> Self {
        Self {
            forms,
            drive,
            audit,
            destination_folder_id,
        }
    }

    pub async fn run(&self, submission: &FormSubmission) -> Result<SubmissionOutcome, SubmissionError> {
        let title = submission.form_title();
        let mut stages = Vec::with_capacity(5);

        info!(
            "📝 开始创建表单: {} ({} 道题)",
            truncate_text(&title, 80),
            submission.questions().len()
        );

        // ========== 1. 创建表单 ==========
        let create_request = FormBuilder::create_form_request(submission);
        let form = self
            .forms
            .create_form(&create_request)
            .await
            .map_err(|source| {
                error!("❌ 创建表单失败: {}", source);
                SubmissionError::CreateFormFailed { source }
            })?;
        stages.push(SubmissionStage::Created);
        info!("✓ 表单已创建: {}", form.form_id);

        // ========== 2. 写入题目 ==========
        let batch = FormBuilder::batch_update_request(submission);
        self.forms
            .batch_update(&form.form_id, &batch)
            .await
            .map_err(|source| {
                error!("❌ 写入题目失败，表单 {} 保留为空表单: {}", form.form_id, source);
                SubmissionError::AddItemsFailed {
                    form_id: form.form_id.clone(),
                    source,
                }
            })?;
        stages.push(SubmissionStage::ItemsAdded);
        info!("✓ 已写入 {} 个题目", batch.requests.len());

        // ========== 3. 归档（非致命） ==========
        let filing = match self
            .drive
            .move_to_folder(&form.form_id, self.destination_folder_id)
            .await
        {
            Ok(()) => {
                info!("📁 表单已移动到目标文件夹 {}", self.destination_folder_id);
                stages.push(SubmissionStage::Filed);
                FilingStatus::Filed
            }
            Err(e) => {
                warn!("⚠️ 无法移动表单到目标文件夹: {}", e);
                stages.push(SubmissionStage::FilingFailed);
                FilingStatus::Failed(e.to_string())
            }
        };

        // ========== 4. 审计日志 ==========
        let view_url = form.view_url();
        let audit_row = submission.audit_row(&form, Local::now());
        self.audit.append_row(&audit_row).await.map_err(|source| {
            error!("❌ 追加审计行失败 (表单 {}): {}", view_url, source);
            SubmissionError::AuditLogFailed {
                form_url: view_url.clone(),
                source,
            }
        })?;
        stages.push(SubmissionStage::Logged);

        // ========== 5. 结果 ==========
        let qr_data_uri = match QrService::data_uri(&view_url) {
            Ok(uri) => Some(uri),
            Err(e) => {
                warn!("⚠️ 二维码生成失败: {}", e);
                None
            }
        };
        stages.push(SubmissionStage::Reported);
        info!("✅ 表单创建完成: {} [{}]", view_url, stage_trace(&stages));

        Ok(SubmissionOutcome {
            form,
            view_url,
            filing,
            audit_row,
            qr_data_uri,
            stages,
        })
    }
}
