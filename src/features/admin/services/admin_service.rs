use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{CategoryCountDto, PriorityCountDto, StatsDto};
use crate::features::gamification::store::BadgeStore;
use crate::features::reports::models::{ReportFilter, ReportStatus};
use crate::features::reports::store::ReportStore;
use crate::features::users::models::User;
use crate::features::users::store::UserStore;
use crate::shared::types::PaginationQuery;

/// Administration read/write surface: platform stats, user management
pub struct AdminService {
    users: Arc<dyn UserStore>,
    reports: Arc<dyn ReportStore>,
    badges: Arc<dyn BadgeStore>,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        reports: Arc<dyn ReportStore>,
        badges: Arc<dyn BadgeStore>,
    ) -> Self {
        Self {
            users,
            reports,
            badges,
        }
    }

    pub async fn stats(&self) -> Result<StatsDto> {
        let total_users = self.users.count().await?;
        let total_reports = self.reports.count_matching(&ReportFilter::default()).await?;
        let pending_reports = self.count_with_status(ReportStatus::Pending).await?;
        let in_progress_reports = self.count_with_status(ReportStatus::InProgress).await?;
        let resolved_reports = self.count_with_status(ReportStatus::Resolved).await?;
        let total_badges = self.badges.count().await?;

        let resolution_rate = if total_reports > 0 {
            resolved_reports as f64 / total_reports as f64
        } else {
            0.0
        };

        let by_category = self
            .reports
            .category_breakdown()
            .await?
            .into_iter()
            .map(|(category, count)| CategoryCountDto { category, count })
            .collect();
        let by_priority = self
            .reports
            .priority_breakdown()
            .await?
            .into_iter()
            .map(|(priority, count)| PriorityCountDto { priority, count })
            .collect();

        Ok(StatsDto {
            total_users,
            total_reports,
            pending_reports,
            in_progress_reports,
            resolved_reports,
            total_badges,
            resolution_rate,
            by_category,
            by_priority,
        })
    }

    async fn count_with_status(&self, status: ReportStatus) -> Result<i64> {
        self.reports
            .count_matching(&ReportFilter {
                status: Some(status),
                ..Default::default()
            })
            .await
    }

    pub async fn list_users(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)> {
        self.users.list(page).await
    }

    pub async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<User> {
        let user = self
            .users
            .set_admin(id, is_admin)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
        tracing::info!("User {} admin flag set to {}", user.id, user.is_admin);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{NewReport, ReportCategory, ReportPriority};
    use crate::shared::test_helpers::{
        test_user, InMemoryBadgeStore, InMemoryReportStore, InMemoryUserStore,
    };

    fn fixture() -> (
        Arc<InMemoryUserStore>,
        Arc<InMemoryReportStore>,
        AdminService,
    ) {
        let users = Arc::new(InMemoryUserStore::new());
        let reports = Arc::new(InMemoryReportStore::new());
        let badges = Arc::new(InMemoryBadgeStore::new());
        let service = AdminService::new(users.clone(), reports.clone(), badges);
        (users, reports, service)
    }

    fn new_report(author_id: Uuid, category: ReportCategory) -> NewReport {
        NewReport {
            author_id,
            title: "t".to_string(),
            description: "d".to_string(),
            image_reference: None,
            latitude: 0.0,
            longitude: 0.0,
            address: None,
            category,
            priority: ReportPriority::Medium,
        }
    }

    #[tokio::test]
    async fn test_stats_counts_and_resolution_rate() {
        let (users, reports, service) = fixture();
        let user = test_user("citizen@example.com");
        let user_id = user.id;
        users.seed(user);

        for category in [
            ReportCategory::Pothole,
            ReportCategory::Pothole,
            ReportCategory::Garbage,
            ReportCategory::Water,
        ] {
            reports.insert(&new_report(user_id, category)).await.unwrap();
        }
        let resolved = reports.all()[0].id;
        reports
            .update_status(resolved, ReportStatus::Resolved, Some(chrono::Utc::now()))
            .await
            .unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_reports, 4);
        assert_eq!(stats.pending_reports, 3);
        assert_eq!(stats.in_progress_reports, 0);
        assert_eq!(stats.resolved_reports, 1);
        assert!((stats.resolution_rate - 0.25).abs() < 1e-9);

        let pothole = stats
            .by_category
            .iter()
            .find(|c| c.category == ReportCategory::Pothole)
            .unwrap();
        assert_eq!(pothole.count, 2);
    }

    #[tokio::test]
    async fn test_stats_with_no_reports_has_zero_rate() {
        let (_, _, service) = fixture();
        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_reports, 0);
        assert_eq!(stats.resolution_rate, 0.0);
    }

    #[tokio::test]
    async fn test_set_admin_toggles_flag() {
        let (users, _, service) = fixture();
        let user = test_user("citizen@example.com");
        let user_id = user.id;
        users.seed(user);

        let updated = service.set_admin(user_id, true).await.unwrap();
        assert!(updated.is_admin);

        let updated = service.set_admin(user_id, false).await.unwrap();
        assert!(!updated.is_admin);

        let err = service.set_admin(Uuid::new_v4(), true).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
