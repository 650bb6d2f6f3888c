use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    Report, ReportCategory, ReportFilter, ReportPriority, ReportStatus,
};
use crate::shared::types::PaginationQuery;

/// Fields of a new report submission. Arrives as multipart form data with
/// an optional `image` part; the text parts map onto this DTO.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 3, max = 2000, message = "Description must be 3-2000 characters"))]
    pub description: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

/// Status transition request. The status arrives as a raw string so unknown
/// values map to an invalid-status rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    /// One of: pending, in-progress, resolved
    pub status: String,
}

/// Query parameters for report listings
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
}

impl ReportListQuery {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            status: self.status,
            category: self.category,
            priority: self.priority,
            author_id: None,
        }
    }

    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Public view of a report
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_reference: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub category: ReportCategory,
    pub priority: ReportPriority,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<Report> for ReportResponseDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            author_id: report.author_id,
            title: report.title,
            description: report.description,
            image_reference: report.image_reference,
            latitude: report.latitude,
            longitude: report.longitude,
            address: report.address,
            category: report.category,
            priority: report.priority,
            status: report.status,
            created_at: report.created_at,
            resolved_at: report.resolved_at,
        }
    }
}
