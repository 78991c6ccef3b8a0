pub mod form_builder;
pub mod qr_service;
pub mod remote;

pub use form_builder::FormBuilder;
pub use qr_service::QrService;
pub use remote::{AuditLog, DriveApi, FormsApi};
