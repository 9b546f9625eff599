//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the inbound and
//! outbound adapters. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod card;
pub mod card_service;
pub mod error;
pub mod ports;
pub mod principal;

pub use self::card::{
    AMOUNT_MAGNITUDE_LIMIT, Amount, CardId, CardSortKey, CardValidationError, CashCard,
};
pub use self::card_service::{CardCommandService, CardQueryService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::principal::{
    Credentials, Principal, PrincipalId, PrincipalValidationError, Role,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
