/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// GAMIFICATION CONSTANTS
// =============================================================================

/// Points awarded to the author when a report is created
pub const POINTS_REPORT_CREATED: i32 = 10;

/// Points awarded to the author when their report reaches resolved
pub const POINTS_REPORT_RESOLVED: i32 = 5;

// =============================================================================
// DUPLICATE DETECTION CONSTANTS
// =============================================================================

/// Time window for duplicate detection
pub const DUPLICATE_WINDOW_HOURS: i64 = 24;

/// Bounding box half-width in decimal degrees (~100m)
pub const DUPLICATE_RADIUS_DEGREES: f64 = 0.001;

// =============================================================================
// BROADCAST TOPICS
// =============================================================================

/// Published when a new report passes intake
pub const TOPIC_REPORT_CREATED: &str = "report.created";

/// Published after a report status transition
pub const TOPIC_REPORT_STATUS_CHANGED: &str = "report.status_changed";
