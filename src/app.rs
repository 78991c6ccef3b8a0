//! 应用生命周期
//!
//! 1. 加载凭据并连接 Google 服务（失败即中止启动）
//! 2. 启动 Web 服务，直到进程退出

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::clients::GoogleServices;
use crate::config::Config;
use crate::utils::logging::{log_ready, log_startup};
use crate::web::{router, AppState};

/// 应用主结构
pub struct App {
    config: Config,
    services: GoogleServices,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let services = GoogleServices::connect(&config).await?;

        Ok(Self { config, services })
    }

    /// 运行 Web 服务
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法监听地址: {}", self.config.bind_addr))?;

        let state = AppState::from_services(self.services, &self.config.destination_folder_id);
        let app = router(state);

        log_ready(&self.config.bind_addr);

        axum::serve(listener, app).await.context("Web 服务异常退出")?;
        Ok(())
    }
}
