//! External identity resolver client.
//!
//! Token verification lives outside this service: a bearer token is handed
//! to the configured verification endpoint, which either returns the
//! verified identity or rejects it. The core trusts the resolved identity
//! completely.

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// Identity returned by the external verification service
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedIdentity {
    /// Opaque subject identifier at the identity provider
    pub subject: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a bearer token to a verified identity.
    ///
    /// Fails with `Unauthenticated` when the token is rejected.
    async fn resolve(&self, token: &str) -> Result<VerifiedIdentity>;
}

/// Resolver backed by an HTTP token-verification endpoint
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    verify_url: String,
}

impl HttpIdentityResolver {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
        })
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<VerifiedIdentity> {
        let response = self
            .client
            .get(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity resolver request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Identity resolver unavailable: {}", e))
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AppError::Unauthenticated("Invalid token".to_string()));
        }

        if !response.status().is_success() {
            tracing::error!("Identity resolver returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Identity resolver returned {}",
                response.status()
            )));
        }

        let identity: VerifiedIdentity = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse identity resolver response: {:?}", e);
            AppError::ExternalServiceError(format!("Invalid identity resolver response: {}", e))
        })?;

        Ok(identity)
    }
}
