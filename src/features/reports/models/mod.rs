mod report;

pub use report::{NewReport, Report, ReportCategory, ReportFilter, ReportPriority, ReportStatus};
