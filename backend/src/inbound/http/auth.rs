//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential extraction and the role gate here. Credentials arrive on every
//! request as an `Authorization: Basic` header; there is no session state.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::future::{Ready, ready};

use crate::domain::ports::PrincipalDirectory;
use crate::domain::{Credentials, Error, Principal, Role};

use super::ApiResult;

fn missing_credentials() -> Error {
    Error::unauthorized("authentication required")
}

fn malformed_credentials() -> Error {
    Error::unauthorized("malformed Basic authorization header")
}

fn decode_basic_header(raw: &str) -> ApiResult<Credentials> {
    let encoded = raw
        .strip_prefix("Basic ")
        .or_else(|| raw.strip_prefix("basic "))
        .ok_or_else(missing_credentials)?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|_| malformed_credentials())?;
    let decoded = String::from_utf8(decoded).map_err(|_| malformed_credentials())?;

    let (username, secret) = decoded.split_once(':').ok_or_else(malformed_credentials)?;
    Credentials::try_from_parts(username, secret).map_err(|_| malformed_credentials())
}

/// Extractor yielding the request's Basic credentials.
///
/// Rejects with `401 Unauthorized` (and the realm challenge attached by the
/// error mapping) when the header is missing or malformed. Verification
/// against the directory happens separately in [`authorize_card_owner`].
#[derive(Debug)]
pub struct BasicCredentials(Credentials);

impl BasicCredentials {
    /// Borrow the parsed credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.0
    }
}

impl FromRequest for BasicCredentials {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(missing_credentials)
            .and_then(|value| value.to_str().map_err(|_| malformed_credentials()))
            .and_then(decode_basic_header)
            .map(Self);
        ready(parsed)
    }
}

/// Resolve credentials to a principal and apply the card-owner role gate.
///
/// The two checks are deliberately layered: verification failures are `401`,
/// a verified principal lacking the role is `403`, and neither consults the
/// card store. Ownership filtering only happens afterwards, inside the store,
/// where it degrades to `404`.
pub async fn authorize_card_owner(
    directory: &dyn PrincipalDirectory,
    credentials: &Credentials,
) -> ApiResult<Principal> {
    let principal = directory.verify(credentials).await?;
    principal.require_role(Role::CardOwner)?;
    Ok(principal)
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::persistence::MemoryPrincipalDirectory;

    async fn extract(header_value: Option<&str>) -> ApiResult<BasicCredentials> {
        let mut request = TestRequest::default();
        if let Some(value) = header_value {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let request = request.to_http_request();
        BasicCredentials::from_request(&request, &mut Payload::None).await
    }

    fn basic(username: &str, secret: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{username}:{secret}")))
    }

    #[rstest]
    #[tokio::test]
    async fn extracts_well_formed_basic_credentials() {
        let extracted = extract(Some(basic("sarah1", "abc123").as_str()))
            .await
            .expect("valid header extracts");
        assert_eq!(extracted.credentials().username(), "sarah1");
        assert_eq!(extracted.credentials().secret(), "abc123");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer token"))]
    #[case(Some("Basic not-base64!"))]
    #[case(Some("Basic c2FyYWgx"))] // no colon separator
    #[tokio::test]
    async fn rejects_absent_or_malformed_headers(#[case] header_value: Option<&str>) {
        let err = extract(header_value).await.expect_err("extraction fails");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn authorize_rejects_unknown_principals() {
        let directory = MemoryPrincipalDirectory::new();
        let credentials =
            Credentials::try_from_parts("sarah1", "abc123").expect("credentials shape");

        let err = authorize_card_owner(&directory, &credentials)
            .await
            .expect_err("empty directory rejects everyone");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn authorize_gates_on_the_card_owner_role() {
        let mut directory = MemoryPrincipalDirectory::new();
        directory
            .insert("hank-owns-no-cards", "qrs456", Role::NonOwner)
            .expect("fixture principal is valid");
        let credentials =
            Credentials::try_from_parts("hank-owns-no-cards", "qrs456").expect("credentials shape");

        let err = authorize_card_owner(&directory, &credentials)
            .await
            .expect_err("non-owners are forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn authorize_passes_card_owners_through() {
        let mut directory = MemoryPrincipalDirectory::new();
        directory
            .insert("sarah1", "abc123", Role::CardOwner)
            .expect("fixture principal is valid");
        let credentials =
            Credentials::try_from_parts("sarah1", "abc123").expect("credentials shape");

        let principal = authorize_card_owner(&directory, &credentials)
            .await
            .expect("card owners pass both layers");
        assert_eq!(principal.id().as_ref(), "sarah1");
        assert_eq!(principal.role(), Role::CardOwner);
    }
}
