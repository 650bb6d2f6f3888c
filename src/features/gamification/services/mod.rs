mod badge_service;

pub use badge_service::BadgeService;
