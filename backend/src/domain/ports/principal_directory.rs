//! Driving port for credential verification.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! resolve credentials into a principal without knowing how secrets are
//! stored or checked. Credential storage and hashing mechanics live entirely
//! behind this boundary.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Principal};

/// Port resolving credentials to an authenticated principal and role.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// Validate credentials and return the matching principal.
    ///
    /// Unknown usernames and wrong secrets both fail with `Unauthorized`
    /// and the same message, so callers cannot probe for known accounts.
    async fn verify(&self, credentials: &Credentials) -> Result<Principal, Error>;
}
