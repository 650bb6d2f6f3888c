use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::gamification::store::BadgeStore;
use crate::features::reports::models::{ReportFilter, ReportStatus};
use crate::features::reports::store::ReportStore;
use crate::features::users::dtos::{
    BadgeResponseDto, LeaderboardDto, LeaderboardEntryDto, ProfileDto,
};
use crate::features::users::store::UserStore;
use crate::shared::types::PaginationQuery;

/// Read-side service for profiles and the leaderboard
pub struct UserService {
    users: Arc<dyn UserStore>,
    reports: Arc<dyn ReportStore>,
    badges: Arc<dyn BadgeStore>,
}

impl UserService {
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

    /// Profile with rank, report counts and earned badges
    pub async fn profile(&self, user_id: Uuid) -> Result<ProfileDto> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let rank = self.users.rank_for_points(user.points).await?;
        let total_reports = self
            .reports
            .count_matching(&ReportFilter {
                author_id: Some(user_id),
                ..Default::default()
            })
            .await?;
        let resolved_reports = self
            .reports
            .count_matching(&ReportFilter {
                author_id: Some(user_id),
                status: Some(ReportStatus::Resolved),
                ..Default::default()
            })
            .await?;
        let badges = self.badges.list_by_user(user_id).await?;

        Ok(ProfileDto {
            user: user.into(),
            rank,
            total_reports,
            resolved_reports,
            badges: badges.into_iter().map(BadgeResponseDto::from).collect(),
        })
    }

    pub async fn badges(&self, user_id: Uuid) -> Result<Vec<BadgeResponseDto>> {
        let badges = self.badges.list_by_user(user_id).await?;
        Ok(badges.into_iter().map(BadgeResponseDto::from).collect())
    }

    /// Points leaderboard page, with the caller's rank alongside.
    ///
    /// Ranks are positional: ties are broken by account age, so two users on
    /// equal points get distinct consecutive ranks.
    pub async fn leaderboard(
        &self,
        caller_id: Uuid,
        page: &PaginationQuery,
    ) -> Result<(LeaderboardDto, i64)> {
        let (users, total) = self.users.leaderboard(page).await?;

        let first_rank = page.offset() + 1;
        let entries = users
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntryDto {
                rank: first_rank + i as i64,
                name: user.name,
                points: user.points,
            })
            .collect();

        let caller = self
            .users
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", caller_id)))?;
        let my_rank = self.users.rank_for_points(caller.points).await?;

        Ok((LeaderboardDto { entries, my_rank }, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::gamification::models::BadgeType;
    use crate::features::reports::models::{NewReport, ReportCategory, ReportPriority};
    use crate::shared::test_helpers::{
        test_user, InMemoryBadgeStore, InMemoryReportStore, InMemoryUserStore,
    };

    fn service() -> (Arc<InMemoryUserStore>, Arc<InMemoryReportStore>, Arc<InMemoryBadgeStore>, UserService)
    {
        let users = Arc::new(InMemoryUserStore::new());
        let reports = Arc::new(InMemoryReportStore::new());
        let badges = Arc::new(InMemoryBadgeStore::new());
        let service = UserService::new(users.clone(), reports.clone(), badges.clone());
        (users, reports, badges, service)
    }

    #[tokio::test]
    async fn test_profile_aggregates_counts_and_badges() {
        let (users, reports, badges, service) = service();
        let user = test_user("citizen@example.com");
        let user_id = user.id;
        users.seed(user);

        for _ in 0..3 {
            let report = reports
                .insert(&NewReport {
                    author_id: user_id,
                    title: "Pothole".to_string(),
                    description: "Deep pothole".to_string(),
                    image_reference: None,
                    latitude: 28.6139,
                    longitude: 77.2090,
                    address: None,
                    category: ReportCategory::Pothole,
                    priority: ReportPriority::Medium,
                })
                .await
                .unwrap();
            reports
                .update_status(report.id, ReportStatus::Resolved, Some(chrono::Utc::now()))
                .await
                .unwrap();
        }
        badges
            .insert_if_absent(user_id, BadgeType::FirstReport, 5)
            .await
            .unwrap();

        let profile = service.profile(user_id).await.unwrap();
        assert_eq!(profile.total_reports, 3);
        assert_eq!(profile.resolved_reports, 3);
        assert_eq!(profile.badges.len(), 1);
        assert_eq!(profile.badges[0].name, "First Report");
        assert_eq!(profile.rank, 1);
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_are_positional() {
        let (users, _, _, service) = service();

        let mut caller_id = None;
        for (i, points) in [50, 30, 30, 10].iter().enumerate() {
            let mut user = test_user(&format!("user{}@example.com", i));
            user.points = *points;
            if i == 3 {
                caller_id = Some(user.id);
            }
            users.seed(user);
        }

        let (board, total) = service
            .leaderboard(caller_id.unwrap(), &PaginationQuery::default())
            .await
            .unwrap();

        assert_eq!(total, 4);
        assert_eq!(
            board.entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(board.entries[0].points, 50);
        // Caller has 10 points, 3 users strictly above
        assert_eq!(board.my_rank, 4);
    }

    #[tokio::test]
    async fn test_profile_unknown_user_is_not_found() {
        let (_, _, _, service) = service();
        let err = service.profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
