//! In-memory principal directory adapter.
//!
//! Backs the [`PrincipalDirectory`] port with a username-keyed table of
//! SHA-256 secret digests and roles. Plaintext secrets are hashed at insert
//! time and never retained, keeping credential storage an opaque concern
//! behind the port.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::ports::PrincipalDirectory;
use crate::domain::{
    Credentials, Error, Principal, PrincipalId, PrincipalValidationError, Role,
};

fn secret_digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

struct DirectoryEntry {
    id: PrincipalId,
    secret_digest: String,
    role: Role,
}

/// Credential directory held entirely in process memory.
#[derive(Default)]
pub struct MemoryPrincipalDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl MemoryPrincipalDirectory {
    /// Create an empty directory that rejects every credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a principal under `username` with the given secret and role.
    ///
    /// Re-registering a username replaces its secret and role.
    pub fn insert(
        &mut self,
        username: &str,
        secret: &str,
        role: Role,
    ) -> Result<(), PrincipalValidationError> {
        let id = PrincipalId::new(username)?;
        self.entries.insert(
            id.to_string(),
            DirectoryEntry {
                id,
                secret_digest: secret_digest(secret),
                role,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryPrincipalDirectory {
    async fn verify(&self, credentials: &Credentials) -> Result<Principal, Error> {
        let presented = secret_digest(credentials.secret());
        match self.entries.get(credentials.username()) {
            Some(entry) if entry.secret_digest == presented => {
                Ok(Principal::new(entry.id.clone(), entry.role))
            }
            // Unknown usernames and wrong secrets share one message so the
            // response cannot be used to probe for accounts.
            _ => Err(Error::unauthorized("invalid credentials")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn directory() -> MemoryPrincipalDirectory {
        let mut directory = MemoryPrincipalDirectory::new();
        directory
            .insert("sarah1", "abc123", Role::CardOwner)
            .expect("fixture principal is valid");
        directory
            .insert("hank-owns-no-cards", "qrs456", Role::NonOwner)
            .expect("fixture principal is valid");
        directory
    }

    fn credentials(username: &str, secret: &str) -> Credentials {
        Credentials::try_from_parts(username, secret).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn verify_resolves_known_credentials(directory: MemoryPrincipalDirectory) {
        let principal = directory
            .verify(&credentials("sarah1", "abc123"))
            .await
            .expect("valid credentials verify");
        assert_eq!(principal.id().as_ref(), "sarah1");
        assert_eq!(principal.role(), Role::CardOwner);
    }

    #[rstest]
    #[tokio::test]
    async fn verify_preserves_the_registered_role(directory: MemoryPrincipalDirectory) {
        let principal = directory
            .verify(&credentials("hank-owns-no-cards", "qrs456"))
            .await
            .expect("valid credentials verify");
        assert_eq!(principal.role(), Role::NonOwner);
    }

    #[rstest]
    #[case("sarah1", "wrong")]
    #[case("nobody", "abc123")]
    #[tokio::test]
    async fn wrong_secrets_and_unknown_users_fail_alike(
        directory: MemoryPrincipalDirectory,
        #[case] username: &str,
        #[case] secret: &str,
    ) {
        let err = directory
            .verify(&credentials(username, secret))
            .await
            .expect_err("verification fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    fn invalid_usernames_cannot_be_registered() {
        let mut directory = MemoryPrincipalDirectory::new();
        let result = directory.insert("not a valid id", "pw", Role::CardOwner);
        assert!(result.is_err());
    }
}
