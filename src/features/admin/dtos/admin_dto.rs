use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{ReportCategory, ReportPriority};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: ReportCategory,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PriorityCountDto {
    pub priority: ReportPriority,
    pub count: i64,
}

/// Platform-wide counters for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsDto {
    pub total_users: i64,
    pub total_reports: i64,
    pub pending_reports: i64,
    pub in_progress_reports: i64,
    pub resolved_reports: i64,
    pub total_badges: i64,
    /// resolved / total, 0.0 when there are no reports
    pub resolution_rate: f64,
    pub by_category: Vec<CategoryCountDto>,
    pub by_priority: Vec<PriorityCountDto>,
}

/// Grant or revoke the admin flag
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetAdminDto {
    pub is_admin: bool,
}
