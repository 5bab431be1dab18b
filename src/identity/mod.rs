//! Ambient Azure identity.
//!
//! Token acquisition is delegated to `azure_identity`'s `DefaultAzureCredential`, which walks
//! environment, workload identity, managed identity and Azure CLI credentials on its own.
//! This module only pins the audience and exposes the result as a [`TokenSource`].

pub mod secure;

use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use std::sync::Arc;
use tracing::debug;

use crate::error::IdentityError;

pub use secure::SecureString;

/// Hands out a bearer token for one fixed audience.
///
/// Implementations must not cache: every call reaches the identity provider.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<SecureString, IdentityError>;
}

/// [`TokenSource`] backed by an `azure_core` credential.
pub struct CredentialTokenSource {
    credential: Arc<dyn TokenCredential>,
    scope: String,
}

impl CredentialTokenSource {
    pub fn new(credential: Arc<dyn TokenCredential>, scope: impl Into<String>) -> Self {
        Self {
            credential,
            scope: scope.into(),
        }
    }

    /// Backed by `DefaultAzureCredential`, configured from the process environment.
    pub fn from_default_credential(scope: impl Into<String>) -> Result<Self, IdentityError> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .map_err(|e| IdentityError::Setup(e.to_string()))?;
        Ok(Self::new(Arc::new(credential), scope))
    }
}

#[async_trait]
impl TokenSource for CredentialTokenSource {
    async fn access_token(&self) -> Result<SecureString, IdentityError> {
        let response = self
            .credential
            .get_token(&[self.scope.as_str()])
            .await
            .map_err(|e| IdentityError::Token(e.to_string()))?;

        debug!(scope = %self.scope, expires_on = %response.expires_on, "Access token acquired");
        Ok(SecureString::from(response.token.secret()))
    }
}
