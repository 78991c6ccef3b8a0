pub mod stage;
pub mod submission_flow;

pub use stage::{stage_trace, FilingStatus, SubmissionOutcome, SubmissionStage};
pub use submission_flow::SubmissionFlow;
