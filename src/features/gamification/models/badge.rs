use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Badge kind enum matching the database enum.
///
/// Closed set: each kind carries fixed metadata (see [`BadgeType::spec`]),
/// not a dynamically extensible registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "badge_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BadgeType {
    FirstReport,
    ProblemSolver,
    CivicChampion,
    EarlyBird,
    ConsistencyKing,
    CommunityHero,
    QuickReporter,
    DetailOriented,
    PersistentCitizen,
    CityImprover,
}

/// Static metadata for a badge kind
#[derive(Debug, Clone, Copy)]
pub struct BadgeSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub points: i32,
}

impl BadgeType {
    pub const ALL: [BadgeType; 10] = [
        BadgeType::FirstReport,
        BadgeType::ProblemSolver,
        BadgeType::CivicChampion,
        BadgeType::EarlyBird,
        BadgeType::ConsistencyKing,
        BadgeType::CommunityHero,
        BadgeType::QuickReporter,
        BadgeType::DetailOriented,
        BadgeType::PersistentCitizen,
        BadgeType::CityImprover,
    ];

    pub fn spec(&self) -> BadgeSpec {
        match self {
            BadgeType::FirstReport => BadgeSpec {
                name: "First Report",
                description: "Submitted your first report",
                icon: "🎯",
                points: 5,
            },
            BadgeType::ProblemSolver => BadgeSpec {
                name: "Problem Solver",
                description: "Submitted 5 reports",
                icon: "🔧",
                points: 25,
            },
            BadgeType::CivicChampion => BadgeSpec {
                name: "Civic Champion",
                description: "Submitted 25 reports",
                icon: "🏆",
                points: 100,
            },
            BadgeType::EarlyBird => BadgeSpec {
                name: "Early Bird",
                description: "Submitted report within 1 hour of issue",
                icon: "🐦",
                points: 15,
            },
            BadgeType::ConsistencyKing => BadgeSpec {
                name: "Consistency King",
                description: "Submitted reports for 7 consecutive days",
                icon: "👑",
                points: 50,
            },
            BadgeType::CommunityHero => BadgeSpec {
                name: "Community Hero",
                description: "Helped resolve 10 community issues",
                icon: "🦸",
                points: 75,
            },
            BadgeType::QuickReporter => BadgeSpec {
                name: "Quick Reporter",
                description: "Submitted 3 reports in one day",
                icon: "⚡",
                points: 20,
            },
            BadgeType::DetailOriented => BadgeSpec {
                name: "Detail Oriented",
                description: "Submitted report with detailed description and image",
                icon: "🔍",
                points: 10,
            },
            BadgeType::PersistentCitizen => BadgeSpec {
                name: "Persistent Citizen",
                description: "Followed up on 5 pending reports",
                icon: "💪",
                points: 30,
            },
            BadgeType::CityImprover => BadgeSpec {
                name: "City Improver",
                description: "Had 5 reports resolved",
                icon: "🏙️",
                points: 40,
            },
        }
    }
}

/// Grant record: one per (user, badge kind), immutable once created
#[derive(Debug, Clone, FromRow)]
pub struct Badge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub badge_type: BadgeType,
    pub points: i32,
    pub earned_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_points_match_fixed_values() {
        assert_eq!(BadgeType::FirstReport.spec().points, 5);
        assert_eq!(BadgeType::ProblemSolver.spec().points, 25);
        assert_eq!(BadgeType::CivicChampion.spec().points, 100);
        assert_eq!(BadgeType::QuickReporter.spec().points, 20);
        assert_eq!(BadgeType::CityImprover.spec().points, 40);
    }

    #[test]
    fn test_badge_type_serializes_snake_case() {
        let json = serde_json::to_string(&BadgeType::FirstReport).unwrap();
        assert_eq!(json, "\"first_report\"");
        let json = serde_json::to_string(&BadgeType::CityImprover).unwrap();
        assert_eq!(json, "\"city_improver\"");
    }
}
