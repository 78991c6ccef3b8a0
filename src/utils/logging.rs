//! 日志工具模块
//!
//! 提供日志初始化与格式化的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 RUST_LOG；未设置时按 verbose 选择 debug 或 info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 培训测评表单生成服务");
    info!("📊 审计表格: {}", config.spreadsheet_name);
    info!("📁 目标文件夹: {}", config.destination_folder_id);
    info!("{}", "=".repeat(60));
}

/// 记录服务就绪信息
pub fn log_ready(addr: &str) {
    info!("✓ 服务已就绪: http://{}", addr);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
