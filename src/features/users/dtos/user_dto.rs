use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::gamification::models::{Badge, BadgeType};
use crate::features::users::models::User;

/// Public view of a user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub points: i32,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            points: user.points,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// A badge grant with its static metadata resolved
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponseDto {
    pub badge_type: BadgeType,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub points: i32,
    pub earned_at: DateTime<Utc>,
}

impl From<Badge> for BadgeResponseDto {
    fn from(badge: Badge) -> Self {
        let spec = badge.badge_type.spec();
        Self {
            badge_type: badge.badge_type,
            name: spec.name.to_string(),
            description: spec.description.to_string(),
            icon: spec.icon.to_string(),
            points: badge.points,
            earned_at: badge.earned_at,
        }
    }
}

/// The authenticated user's profile with gamification summary
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileDto {
    #[serde(flatten)]
    pub user: UserResponseDto,
    pub rank: i64,
    pub total_reports: i64,
    pub resolved_reports: i64,
    pub badges: Vec<BadgeResponseDto>,
}

/// One leaderboard row
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    pub rank: i64,
    pub name: String,
    pub points: i32,
}

/// Leaderboard page plus the caller's own rank
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardDto {
    pub entries: Vec<LeaderboardEntryDto>,
    pub my_rank: i64,
}
