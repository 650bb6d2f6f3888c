pub mod models;
pub mod services;
pub mod store;

pub use services::BadgeService;
pub use store::{BadgeStore, PgBadgeStore};
