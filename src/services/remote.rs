//! 远程服务能力
//!
//! 流程层只依赖这些 trait，具体实现见 `clients`，测试中可替换为假实现。

use std::future::Future;

use crate::api::{BatchUpdateFormRequest, CreateFormRequest};
use crate::error::AppResult;
use crate::models::{AuditRow, RemoteForm};

/// 表单服务
pub trait FormsApi: Send + Sync {
    /// 创建空表单
    fn create_form(&self, request: &CreateFormRequest) -> impl Future<Output = AppResult<RemoteForm>> + Send;

    /// 批量写入题目
    fn batch_update(
        &self,
        form_id: &str,
        request: &BatchUpdateFormRequest,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

/// 云端硬盘服务
pub trait DriveApi: Send + Sync {
    /// 把文件放入目标文件夹
    fn move_to_folder(&self, file_id: &str, folder_id: &str) -> impl Future<Output = AppResult<()>> + Send;
}

/// 审计日志（只追加）
pub trait AuditLog: Send + Sync {
    fn append_row(&self, row: &AuditRow) -> impl Future<Output = AppResult<()>> + Send;
}
