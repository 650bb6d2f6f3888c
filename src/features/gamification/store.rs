use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::gamification::models::{Badge, BadgeType};

/// Document-store collaborator for the `badges` collection.
///
/// Grants go through a conditional insert so the (user, badge kind)
/// uniqueness invariant holds even under concurrent evaluations.
#[async_trait]
pub trait BadgeStore: Send + Sync {
    /// Insert a grant unless the user already holds this badge kind.
    /// Returns the new grant, or `None` when it was already held.
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        badge_type: BadgeType,
        points: i32,
    ) -> Result<Option<Badge>>;

    /// All grants for a user, newest first
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Badge>>;

    async fn count(&self) -> Result<i64>;
}

/// Postgres-backed badge store
pub struct PgBadgeStore {
    pool: PgPool,
}

impl PgBadgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeStore for PgBadgeStore {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        badge_type: BadgeType,
        points: i32,
    ) -> Result<Option<Badge>> {
        // ON CONFLICT DO NOTHING returns no row when the badge is already
        // held, which callers treat as "nothing granted"
        sqlx::query_as::<_, Badge>(
            r#"
            INSERT INTO badges (user_id, badge_type, points)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, badge_type) DO NOTHING
            RETURNING id, user_id, badge_type, points, earned_at
            "#,
        )
        .bind(user_id)
        .bind(badge_type)
        .bind(points)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert badge grant: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Badge>> {
        sqlx::query_as::<_, Badge>(
            r#"
            SELECT id, user_id, badge_type, points, earned_at
            FROM badges
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list badges: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM badges")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count badges: {:?}", e);
                AppError::Database(e)
            })
    }
}
