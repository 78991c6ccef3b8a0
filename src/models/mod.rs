pub mod question;
pub mod submission;
pub mod trainer;

pub use question::Question;
pub use submission::{AuditRow, FormSubmission, RemoteForm};
pub use trainer::{TestConfig, TrainerInfo};
