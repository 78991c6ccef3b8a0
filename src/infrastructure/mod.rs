pub mod credentials;
pub mod token_provider;

pub use credentials::{load_service_account, ServiceAccountKey, REQUIRED_SCOPES};
pub use token_provider::TokenProvider;
