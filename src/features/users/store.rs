use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::shared::types::PaginationQuery;

/// Document-store collaborator for the `users` collection.
///
/// Point updates are atomic "add N" operations at the store, never
/// read-modify-write at the application layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Match a verified identity to a local user row, creating it on first
    /// sight. Keyed by email (unique).
    async fn find_or_create(&self, email: &str, name: &str) -> Result<User>;

    /// Atomic increment of the points counter
    async fn add_points(&self, id: Uuid, delta: i32) -> Result<()>;

    /// Users ordered by points desc, created_at asc tie-break.
    /// Returns (page of users, total count).
    async fn leaderboard(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)>;

    /// 1-based rank for a given points total (count of users strictly above)
    async fn rank_for_points(&self, points: i32) -> Result<i64>;

    async fn count(&self) -> Result<i64>;

    /// Paginated user listing for administration, newest first
    async fn list(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)>;

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<User>>;
}

/// Postgres-backed user store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, name, points, is_admin, created_at, last_active";

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_or_create(&self, email: &str, name: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, last_active)
            VALUES ($1, $2, NOW())
            ON CONFLICT (email)
            DO UPDATE SET last_active = NOW()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find or create user: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn add_points(&self, id: Uuid, delta: i32) -> Result<()> {
        let result = sqlx::query("UPDATE users SET points = points + $2 WHERE id = $1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to add points: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    async fn leaderboard(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)> {
        let total = self.count().await?;

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY points DESC, created_at ASC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users, total))
    }

    async fn rank_for_points(&self, points: i32) -> Result<i64> {
        let above: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE points > $1")
            .bind(points)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to compute rank: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(above + 1)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)> {
        let total = self.count().await?;

        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((users, total))
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET is_admin = $2 WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update admin flag: {:?}", e);
            AppError::Database(e)
        })
    }
}
