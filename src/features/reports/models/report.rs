use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report category enum matching the database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Pothole,
    Streetlight,
    Garbage,
    Water,
    Traffic,
    Safety,
    Infrastructure,
    Environment,
    Other,
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportCategory::Pothole => write!(f, "pothole"),
            ReportCategory::Streetlight => write!(f, "streetlight"),
            ReportCategory::Garbage => write!(f, "garbage"),
            ReportCategory::Water => write!(f, "water"),
            ReportCategory::Traffic => write!(f, "traffic"),
            ReportCategory::Safety => write!(f, "safety"),
            ReportCategory::Infrastructure => write!(f, "infrastructure"),
            ReportCategory::Environment => write!(f, "environment"),
            ReportCategory::Other => write!(f, "other"),
        }
    }
}

/// Report priority enum matching the database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPriority::Low => write!(f, "low"),
            ReportPriority::Medium => write!(f, "medium"),
            ReportPriority::High => write!(f, "high"),
        }
    }
}

/// Report status enum matching the database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in-progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "in-progress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!(
                "Invalid status '{}'. Must be pending, in-progress, or resolved",
                other
            )),
        }
    }
}

/// Database model for a report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
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

/// Data for persisting a new report.
/// Status is always `pending` and resolved_at NULL at creation.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_reference: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub category: ReportCategory,
    pub priority: ReportPriority,
}

/// Filter for report listings and counts
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub category: Option<ReportCategory>,
    pub priority: Option<ReportPriority>,
    pub author_id: Option<Uuid>,
}
