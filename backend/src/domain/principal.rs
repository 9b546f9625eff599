//! Principal identity, roles, and credential primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::Error;

/// Maximum allowed length for a principal identifier.
pub const PRINCIPAL_ID_MAX: usize = 64;

/// Validation errors returned by the principal constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalValidationError {
    EmptyId,
    IdTooLong { max: usize },
    IdInvalidCharacters,
    EmptyUsername,
    EmptySecret,
}

impl fmt::Display for PrincipalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "principal id must not be empty"),
            Self::IdTooLong { max } => {
                write!(f, "principal id must be at most {max} characters")
            }
            Self::IdInvalidCharacters => write!(
                f,
                "principal id may only contain letters, numbers, dots, underscores, or dashes",
            ),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptySecret => write!(f, "secret must not be empty"),
        }
    }
}

impl std::error::Error for PrincipalValidationError {}

fn is_permitted_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Stable principal identifier, also used as the owner column of a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Validate and construct a [`PrincipalId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PrincipalValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, PrincipalValidationError> {
        if id.is_empty() {
            return Err(PrincipalValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(PrincipalValidationError::IdInvalidCharacters);
        }
        if id.chars().count() > PRINCIPAL_ID_MAX {
            return Err(PrincipalValidationError::IdTooLong {
                max: PRINCIPAL_ID_MAX,
            });
        }
        if !id.chars().all(is_permitted_id_char) {
            return Err(PrincipalValidationError::IdInvalidCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PrincipalId> for String {
    fn from(value: PrincipalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = PrincipalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Coarse-grained role a principal holds.
///
/// The role gates use of the record surface as a whole and is independent of
/// which specific card a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May use the card endpoints, scoped to cards it owns.
    CardOwner,
    /// Authenticates successfully but may not touch cards at all.
    NonOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CardOwner => f.write_str("card-owner"),
            Self::NonOwner => f.write_str("non-owner"),
        }
    }
}

/// An authenticated identity plus its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    id: PrincipalId,
    role: Role,
}

impl Principal {
    /// Build a principal from validated components.
    pub fn new(id: PrincipalId, role: Role) -> Self {
        Self { id, role }
    }

    /// Stable principal identifier.
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Role held by this principal.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Require a role, rejecting with `Forbidden` otherwise.
    ///
    /// This is the coarse role gate; it runs before any store access and is
    /// distinct from the per-card ownership filter, which surfaces as
    /// NotFound.
    pub fn require_role(&self, role: Role) -> Result<(), Error> {
        if self.role == role {
            Ok(())
        } else {
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

/// Validated credentials presented to the principal directory.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `secret` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/secret inputs.
    pub fn try_from_parts(username: &str, secret: &str) -> Result<Self, PrincipalValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(PrincipalValidationError::EmptyUsername);
        }
        if secret.is_empty() {
            return Err(PrincipalValidationError::EmptySecret);
        }

        Ok(Self {
            username: normalized.to_owned(),
            secret: Zeroizing::new(secret.to_owned()),
        })
    }

    /// Username string suitable for directory lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Secret string provided by the caller; wiped on drop.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}
