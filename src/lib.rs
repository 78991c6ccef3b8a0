//! # Assessment Form Creator
//!
//! 培训师填写测试信息后，自动创建 Google 表单、归档到共享文件夹、
//! 写入审计表格，并展示表单链接与二维码。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有服务账号私钥，只暴露"获取访问令牌"能力
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - Forms / Drive / Sheets 的 REST 客户端
//! - `GoogleServices` - 启动时一次性创建的三个句柄
//!
//! ### ③ 业务能力层（Services）
//! - `FormBuilder` - 题目 → Forms 请求
//! - `QrService` - 链接 → 二维码图片
//! - `FormsApi` / `DriveApi` / `AuditLog` - 远程能力 trait
//!
//! ### ④ 流程层（Workflow）
//! - `SubmissionFlow` - 创建 → 写题 → 归档 → 审计 → 展示
//!
//! ### ⑤ 展示层（Web）
//! - `web/` - axum 路由与 askama 页面

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::GoogleServices;
pub use config::Config;
pub use error::{AppError, AppResult, SubmissionError};
pub use models::{AuditRow, FormSubmission, Question, RemoteForm, TestConfig, TrainerInfo};
pub use services::{FormBuilder, QrService};
pub use workflow::{SubmissionFlow, SubmissionOutcome, SubmissionStage};
