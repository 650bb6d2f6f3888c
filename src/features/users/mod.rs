pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::UserService;
pub use store::{PgUserStore, UserStore};
