use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::gamification::BadgeService;
use crate::features::reports::models::{NewReport, Report, ReportFilter, ReportStatus};
use crate::features::reports::services::duplicate_service::DuplicateDetector;
use crate::features::reports::store::ReportStore;
use crate::features::reports::triage;
use crate::features::users::store::UserStore;
use crate::modules::broadcast::Notifier;
use crate::shared::constants::{
    POINTS_REPORT_CREATED, POINTS_REPORT_RESOLVED, TOPIC_REPORT_CREATED,
    TOPIC_REPORT_STATUS_CHANGED,
};
use crate::shared::types::PaginationQuery;

/// Validated report submission, before triage
#[derive(Debug, Clone)]
pub struct ReportSubmission {
    pub author_id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub image_reference: Option<String>,
}

/// Orchestrates the report lifecycle: triage, duplicate rejection,
/// persistence, and the best-effort side effects (points, badges, live
/// events).
///
/// Side effects after persistence never fail the request. A report whose
/// points or broadcast failed is still a created report.
pub struct ReportIntakeService {
    reports: Arc<dyn ReportStore>,
    users: Arc<dyn UserStore>,
    duplicates: DuplicateDetector,
    badges: Arc<BadgeService>,
    notifier: Arc<dyn Notifier>,
}

impl ReportIntakeService {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        users: Arc<dyn UserStore>,
        badges: Arc<BadgeService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let duplicates = DuplicateDetector::new(reports.clone());
        Self {
            reports,
            users,
            duplicates,
            badges,
            notifier,
        }
    }

    /// Submit a new report.
    ///
    /// Rejects with a duplicate error when a same-category report already
    /// exists within 24 hours and ~100m; the rejection carries the matched
    /// report so clients can show it.
    pub async fn submit(&self, submission: ReportSubmission) -> Result<Report> {
        let category = triage::classify(&submission.title, &submission.description);
        let priority = triage::assign_priority(&submission.title, &submission.description, category);

        let now = Utc::now();
        if let Some(existing) = self
            .duplicates
            .find_duplicate(category, submission.latitude, submission.longitude, now)
            .await?
        {
            tracing::info!(
                "Rejected duplicate of report {} (category: {})",
                existing.id,
                category
            );
            return Err(AppError::Duplicate {
                message: "A similar report already exists nearby".to_string(),
                matched: report_event_view(&existing),
            });
        }

        let report = self
            .reports
            .insert(&NewReport {
                author_id: submission.author_id,
                title: submission.title,
                description: submission.description,
                image_reference: submission.image_reference,
                latitude: submission.latitude,
                longitude: submission.longitude,
                address: submission.address,
                category,
                priority,
            })
            .await?;

        // Everything past this point is best effort
        if let Err(e) = self
            .users
            .add_points(report.author_id, POINTS_REPORT_CREATED)
            .await
        {
            tracing::warn!(
                "Failed to credit submission points to user {}: {}",
                report.author_id,
                e
            );
        }

        if let Err(e) = self
            .badges
            .evaluate_after_submission(report.author_id, now)
            .await
        {
            tracing::warn!(
                "Badge evaluation failed for user {}: {}",
                report.author_id,
                e
            );
        }

        self.notifier
            .publish(
                TOPIC_REPORT_CREATED,
                json!({
                    "report_id": report.id,
                    "category": report.category,
                    "priority": report.priority,
                    "latitude": report.latitude,
                    "longitude": report.longitude,
                }),
            )
            .await;

        Ok(report)
    }

    pub async fn get(&self, id: uuid::Uuid) -> Result<Report> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    pub async fn list(
        &self,
        filter: &ReportFilter,
        page: &PaginationQuery,
    ) -> Result<(Vec<Report>, i64)> {
        self.reports.list(filter, page).await
    }

    /// Apply a status transition requested by an administrator.
    ///
    /// `status` arrives as the raw wire string so an unknown value maps to
    /// an invalid-status error rather than a generic deserialization one.
    pub async fn update_status(&self, id: uuid::Uuid, status: &str) -> Result<Report> {
        let new_status: ReportStatus = status
            .parse()
            .map_err(AppError::InvalidStatus)?;

        let previous = self
            .reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let resolved_at = match new_status {
            ReportStatus::Resolved => Some(Utc::now()),
            _ => None,
        };

        let report = self
            .reports
            .update_status(id, new_status, resolved_at)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        // Resolution rewards fire only on an actual transition into
        // resolved. Reverting and re-resolving can credit again; resolution
        // badges stay idempotent via the conditional insert.
        if new_status == ReportStatus::Resolved && previous.status != ReportStatus::Resolved {
            if let Err(e) = self
                .users
                .add_points(report.author_id, POINTS_REPORT_RESOLVED)
                .await
            {
                tracing::warn!(
                    "Failed to credit resolution points to user {}: {}",
                    report.author_id,
                    e
                );
            }
            if let Err(e) = self.badges.evaluate_after_resolution(report.author_id).await {
                tracing::warn!(
                    "Badge evaluation failed for user {}: {}",
                    report.author_id,
                    e
                );
            }
        }

        self.notifier
            .publish(
                TOPIC_REPORT_STATUS_CHANGED,
                json!({
                    "report_id": report.id,
                    "status": report.status,
                }),
            )
            .await;

        tracing::info!("Report {} moved to status {}", report.id, report.status);
        Ok(report)
    }
}

/// Compact JSON view of a report for error payloads and events
fn report_event_view(report: &Report) -> serde_json::Value {
    json!({
        "id": report.id,
        "title": report.title,
        "category": report.category,
        "priority": report.priority,
        "status": report.status,
        "latitude": report.latitude,
        "longitude": report.longitude,
        "created_at": report.created_at,
    })
}
