pub mod guards;
pub mod model;
pub mod resolver;

pub use model::AuthenticatedUser;
pub use resolver::{HttpIdentityResolver, IdentityResolver, VerifiedIdentity};
