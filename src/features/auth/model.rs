use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identity injected into request extensions by the auth middleware.
///
/// The token itself is verified by the external identity resolver; this is
/// the local user row matched to that verified identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
