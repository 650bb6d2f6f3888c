use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::gamification::models::{Badge, BadgeType};
use crate::features::gamification::store::BadgeStore;
use crate::features::reports::models::{ReportFilter, ReportStatus};
use crate::features::reports::store::ReportStore;
use crate::features::users::store::UserStore;

/// Evaluates badge rules after intake and resolution events.
///
/// Rules compare against exact counts, so a user who skips past a threshold
/// (e.g. a backfill jumping 4 -> 6 submissions) never earns that badge. The
/// conditional insert at the store makes every grant idempotent regardless.
pub struct BadgeService {
    reports: Arc<dyn ReportStore>,
    users: Arc<dyn UserStore>,
    badges: Arc<dyn BadgeStore>,
}

/// Start of the calendar day containing `now`, in UTC
fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

impl BadgeService {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        users: Arc<dyn UserStore>,
        badges: Arc<dyn BadgeStore>,
    ) -> Self {
        Self {
            reports,
            users,
            badges,
        }
    }

    /// Evaluate submission-count rules for a user who just had a report
    /// persisted. Returns the badges newly granted by this evaluation.
    pub async fn evaluate_after_submission(
        &self,
        user_id: uuid::Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Badge>> {
        let total = self
            .reports
            .count_matching(&ReportFilter {
                author_id: Some(user_id),
                ..Default::default()
            })
            .await?;

        let mut granted = Vec::new();

        let threshold_badge = match total {
            1 => Some(BadgeType::FirstReport),
            5 => Some(BadgeType::ProblemSolver),
            25 => Some(BadgeType::CivicChampion),
            _ => None,
        };
        if let Some(badge_type) = threshold_badge {
            if let Some(badge) = self.grant(user_id, badge_type).await? {
                granted.push(badge);
            }
        }

        let today = self
            .reports
            .count_by_author_since(user_id, start_of_day(now))
            .await?;
        if today == 3 {
            if let Some(badge) = self.grant(user_id, BadgeType::QuickReporter).await? {
                granted.push(badge);
            }
        }

        Ok(granted)
    }

    /// Evaluate resolution-count rules for the author of a report that just
    /// transitioned to resolved.
    pub async fn evaluate_after_resolution(&self, author_id: uuid::Uuid) -> Result<Vec<Badge>> {
        let resolved = self
            .reports
            .count_matching(&ReportFilter {
                author_id: Some(author_id),
                status: Some(ReportStatus::Resolved),
                ..Default::default()
            })
            .await?;

        let mut granted = Vec::new();
        if resolved == 5 {
            if let Some(badge) = self.grant(author_id, BadgeType::CityImprover).await? {
                granted.push(badge);
            }
        }
        Ok(granted)
    }

    /// Grant a badge unless already held, crediting its fixed point value
    async fn grant(&self, user_id: uuid::Uuid, badge_type: BadgeType) -> Result<Option<Badge>> {
        let spec = badge_type.spec();
        let Some(badge) = self
            .badges
            .insert_if_absent(user_id, badge_type, spec.points)
            .await?
        else {
            return Ok(None);
        };

        self.users.add_points(user_id, spec.points).await?;
        tracing::info!(
            "Granted badge {} (+{} points) to user {}",
            spec.name,
            spec.points,
            user_id
        );
        Ok(Some(badge))
    }
}
