//! In-memory collaborator doubles for unit and router tests.
//!
//! These mirror the Postgres store semantics closely enough for the service
//! layer: same filtering, same ordering, same conditional-insert behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::gamification::models::{Badge, BadgeType};
use crate::features::gamification::store::BadgeStore;
use crate::features::reports::models::{
    NewReport, Report, ReportCategory, ReportFilter, ReportPriority, ReportStatus,
};
use crate::features::reports::store::{DuplicateWindow, ReportStore};
use crate::features::users::models::User;
use crate::features::users::store::UserStore;
use crate::modules::broadcast::{BroadcastEvent, Notifier};
use crate::modules::storage::FileStore;
use crate::shared::types::PaginationQuery;

fn matches_filter(report: &Report, filter: &ReportFilter) -> bool {
    filter.status.is_none_or(|s| report.status == s)
        && filter.category.is_none_or(|c| report.category == c)
        && filter.priority.is_none_or(|p| report.priority == p)
        && filter.author_id.is_none_or(|a| report.author_id == a)
}

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built report, bypassing the store's timestamping
    pub fn seed(&self, report: Report) {
        self.reports.lock().unwrap().push(report);
    }

    pub fn all(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn insert(&self, new: &NewReport) -> Result<Report> {
        let report = Report {
            id: Uuid::new_v4(),
            author_id: new.author_id,
            title: new.title.clone(),
            description: new.description.clone(),
            image_reference: new.image_reference.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            address: new.address.clone(),
            category: new.category,
            priority: new.priority,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ReportFilter,
        page: &PaginationQuery,
    ) -> Result<(Vec<Report>, i64)> {
        let mut matching: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as i64;
        let page_items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn find_in_window(&self, window: &DuplicateWindow) -> Result<Vec<Report>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| window.matches(r))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ReportStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Report>> {
        let mut reports = self.reports.lock().unwrap();
        match reports.iter_mut().find(|r| r.id == id) {
            Some(report) => {
                report.status = status;
                report.resolved_at = resolved_at;
                Ok(Some(report.clone()))
            }
            None => Ok(None),
        }
    }

    async fn count_matching(&self, filter: &ReportFilter) -> Result<i64> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches_filter(r, filter))
            .count() as i64)
    }

    async fn count_by_author_since(&self, author_id: Uuid, since: DateTime<Utc>) -> Result<i64> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id && r.created_at >= since)
            .count() as i64)
    }

    async fn category_breakdown(&self) -> Result<Vec<(ReportCategory, i64)>> {
        let reports = self.reports.lock().unwrap();
        let mut counts: Vec<(ReportCategory, i64)> = Vec::new();
        for report in reports.iter() {
            match counts.iter_mut().find(|(c, _)| *c == report.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((report.category, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }

    async fn priority_breakdown(&self) -> Result<Vec<(ReportPriority, i64)>> {
        let reports = self.reports.lock().unwrap();
        let mut counts: Vec<(ReportPriority, i64)> = Vec::new();
        for report in reports.iter() {
            match counts.iter_mut().find(|(p, _)| *p == report.priority) {
                Some((_, n)) => *n += 1,
                None => counts.push((report.priority, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    fail_point_updates: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    /// Make every subsequent `add_points` call fail
    pub fn fail_point_updates(&self) {
        self.fail_point_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_or_create(&self, email: &str, name: &str) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            user.last_active = Some(Utc::now());
            return Ok(user.clone());
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            points: 0,
            is_admin: false,
            created_at: Utc::now(),
            last_active: Some(Utc::now()),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn add_points(&self, id: Uuid, delta: i32) -> Result<()> {
        if self.fail_point_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal("points update failed".to_string()));
        }
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.points += delta;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("User {} not found", id))),
        }
    }

    async fn leaderboard(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(a.created_at.cmp(&b.created_at))
        });
        let total = users.len() as i64;
        let page_items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn rank_for_points(&self, points: i32) -> Result<i64> {
        let above = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.points > points)
            .count() as i64;
        Ok(above + 1)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn list(&self, page: &PaginationQuery) -> Result<(Vec<User>, i64)> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = users.len() as i64;
        let page_items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok((page_items, total))
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_admin = is_admin;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryBadgeStore {
    badges: Mutex<Vec<Badge>>,
}

impl InMemoryBadgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Badge> {
        self.badges.lock().unwrap().clone()
    }
}

#[async_trait]
impl BadgeStore for InMemoryBadgeStore {
    async fn insert_if_absent(
        &self,
        user_id: Uuid,
        badge_type: BadgeType,
        points: i32,
    ) -> Result<Option<Badge>> {
        let mut badges = self.badges.lock().unwrap();
        if badges
            .iter()
            .any(|b| b.user_id == user_id && b.badge_type == badge_type)
        {
            return Ok(None);
        }
        let badge = Badge {
            id: Uuid::new_v4(),
            user_id,
            badge_type,
            points,
            earned_at: Utc::now(),
        };
        badges.push(badge.clone());
        Ok(Some(badge))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Badge>> {
        let mut owned: Vec<Badge> = self
            .badges
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
        Ok(owned)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.badges.lock().unwrap().len() as i64)
    }
}

/// Notifier double that records every published event
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<BroadcastEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BroadcastEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, payload: serde_json::Value) {
        self.events.lock().unwrap().push(BroadcastEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// File store double that never touches the network
#[derive(Default)]
pub struct NullFileStore;

#[async_trait]
impl FileStore for NullFileStore {
    async fn store(&self, _data: Vec<u8>, content_type: &str) -> Result<String> {
        let ext = if content_type == "image/png" { "png" } else { "jpg" };
        Ok(format!("reports/{}.{}", Uuid::new_v4(), ext))
    }
}

/// A user row with sensible defaults for tests
pub fn test_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or("user").to_string(),
        points: 0,
        is_admin: false,
        created_at: Utc::now(),
        last_active: Some(Utc::now()),
    }
}
