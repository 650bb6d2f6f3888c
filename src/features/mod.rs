pub mod admin;
pub mod auth;
pub mod events;
pub mod gamification;
pub mod reports;
pub mod users;
