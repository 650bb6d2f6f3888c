pub mod duplicate_service;
pub mod intake_service;

pub use duplicate_service::DuplicateDetector;
pub use intake_service::{ReportIntakeService, ReportSubmission};
