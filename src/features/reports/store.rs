use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    NewReport, Report, ReportCategory, ReportFilter, ReportPriority, ReportStatus,
};
use crate::shared::types::PaginationQuery;

/// Bounding-box query shape for duplicate detection: same category, created
/// after `since`, coordinates inside the flat box.
#[derive(Debug, Clone)]
pub struct DuplicateWindow {
    pub category: ReportCategory,
    pub since: DateTime<Utc>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl DuplicateWindow {
    /// Client-side check mirroring the pushed-down store filter
    pub fn matches(&self, report: &Report) -> bool {
        report.category == self.category
            && report.created_at > self.since
            && report.latitude >= self.lat_min
            && report.latitude <= self.lat_max
            && report.longitude >= self.lon_min
            && report.longitude <= self.lon_max
    }
}

/// Document-store collaborator for the `reports` collection
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, new: &NewReport) -> Result<Report>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>>;

    /// Filtered listing, newest first. Returns (page of reports, total count).
    async fn list(
        &self,
        filter: &ReportFilter,
        page: &PaginationQuery,
    ) -> Result<(Vec<Report>, i64)>;

    /// All reports inside a duplicate window, filter pushed to storage.
    /// Result order is whatever the store returns: unstable across inserts
    /// but deterministic within a single query.
    async fn find_in_window(&self, window: &DuplicateWindow) -> Result<Vec<Report>>;

    /// Persist a status transition. `resolved_at` must be Some exactly when
    /// the new status is resolved. Returns None when the report is absent.
    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>>;

    async fn count_matching(&self, filter: &ReportFilter) -> Result<i64>;

    /// Reports by an author created at or after `since`
    async fn count_by_author_since(&self, author_id: Uuid, since: DateTime<Utc>) -> Result<i64>;

    async fn category_breakdown(&self) -> Result<Vec<(ReportCategory, i64)>>;

    async fn priority_breakdown(&self) -> Result<Vec<(ReportPriority, i64)>>;
}

/// Postgres-backed report store
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REPORT_COLUMNS: &str = "id, author_id, title, description, image_reference, \
     latitude, longitude, address, category, priority, status, created_at, resolved_at";

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ReportFilter) {
    builder.push(" WHERE 1=1");
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category);
    }
    if let Some(priority) = filter.priority {
        builder.push(" AND priority = ").push_bind(priority);
    }
    if let Some(author_id) = filter.author_id {
        builder.push(" AND author_id = ").push_bind(author_id);
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, new: &NewReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports (
                author_id, title, description, image_reference,
                latitude, longitude, address, category, priority, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(new.author_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.image_reference)
        .bind(new.latitude)
        .bind(new.longitude)
        .bind(&new.address)
        .bind(new.category)
        .bind(new.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report {} (category: {}, priority: {}) for user {}",
            report.id,
            report.category,
            report.priority,
            report.author_id
        );

        Ok(report)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list(
        &self,
        filter: &ReportFilter,
        page: &PaginationQuery,
    ) -> Result<(Vec<Report>, i64)> {
        let total = self.count_matching(filter).await?;

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {REPORT_COLUMNS} FROM reports"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC OFFSET ");
        builder.push_bind(page.offset());
        builder.push(" LIMIT ");
        builder.push_bind(page.limit());

        let reports = builder
            .build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((reports, total))
    }

    async fn find_in_window(&self, window: &DuplicateWindow) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM reports
            WHERE category = $1
              AND created_at > $2
              AND latitude BETWEEN $3 AND $4
              AND longitude BETWEEN $5 AND $6
            "#
        ))
        .bind(window.category)
        .bind(window.since)
        .bind(window.lat_min)
        .bind(window.lat_max)
        .bind(window.lon_min)
        .bind(window.lon_max)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to query duplicate window: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = $2, resolved_at = $3
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(resolved_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count_matching(&self, filter: &ReportFilter) -> Result<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reports");
        push_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(total)
    }

    async fn count_by_author_since(&self, author_id: Uuid, since: DateTime<Utc>) -> Result<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reports WHERE author_id = $1 AND created_at >= $2",
        )
        .bind(author_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count author reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn category_breakdown(&self) -> Result<Vec<(ReportCategory, i64)>> {
        sqlx::query_as::<_, (ReportCategory, i64)>(
            "SELECT category, COUNT(*) FROM reports GROUP BY category ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category breakdown: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn priority_breakdown(&self) -> Result<Vec<(ReportPriority, i64)>> {
        sqlx::query_as::<_, (ReportPriority, i64)>(
            "SELECT priority, COUNT(*) FROM reports GROUP BY priority ORDER BY COUNT(*) DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get priority breakdown: {:?}", e);
            AppError::Database(e)
        })
    }
}
