//! 展示层
//!
//! 基于 axum 的单页表单：录入培训师、测试与题目信息，提交后展示链接与二维码。

pub mod input;
pub mod routes;
pub mod state;
pub mod views;

pub use input::{Action, PageInput};
pub use routes::router;
pub use state::AppState;
pub use views::{ErrorView, IndexPage, ResultView};
