pub mod notice;
pub mod orchestrator;
pub mod outcome;
pub mod service;

pub use notice::{error_notice, error_record};
pub use orchestrator::Orchestrator;
pub use outcome::{Phase, SendOutcome, SendRejected};
pub use service::ChatService;
