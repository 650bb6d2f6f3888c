pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod triage;

pub use services::{ReportIntakeService, ReportSubmission};
pub use store::{PgReportStore, ReportStore};
