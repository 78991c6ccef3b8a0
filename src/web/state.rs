use std::sync::Arc;

use crate::clients::GoogleServices;

/// 路由共享状态
///
/// 三个服务句柄在启动时创建，之后只读。
pub struct AppState<F, D, A> {
    pub forms: Arc<F>,
    pub drive: Arc<D>,
    pub audit: Arc<A>,
    pub destination_folder_id: Arc<str>,
}

impl<F, D, A> AppState<F, D, A> {
    pub fn new(forms: F, drive: D, audit: A, destination_folder_id: impl Into<Arc<str>>) -> Self {
        Self {
            forms: Arc::new(forms),
            drive: Arc::new(drive),
            audit: Arc::new(audit),
            destination_folder_id: destination_folder_id.into(),
        }
    }
}

// 手写 Clone，避免要求 F/D/A 本身实现 Clone
impl<F, D, A> Clone for AppState<F, D, A> {
    fn clone(&self) -> Self {
        Self {
            forms: Arc::clone(&self.forms),
            drive: Arc::clone(&self.drive),
            audit: Arc::clone(&self.audit),
            destination_folder_id: Arc::clone(&self.destination_folder_id),
        }
    }
}

impl AppState<crate::clients::FormsClient, crate::clients::DriveClient, crate::clients::SheetClient> {
    /// 从已连接的 Google 服务创建
    pub fn from_services(services: GoogleServices, destination_folder_id: &str) -> Self {
        Self::new(services.forms, services.drive, services.sheet, destination_folder_id)
    }
}
