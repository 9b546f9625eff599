//! Cash card HTTP handlers.
//!
//! ```text
//! POST   /records
//! GET    /records/{id}
//! GET    /records?page&size&sort=key,direction
//! PUT    /records/{id}
//! DELETE /records/{id}
//! ```
//!
//! Every handler authenticates the request's Basic credentials and applies
//! the card-owner role gate before dispatching to a port; the acting
//! principal then travels with the port request so the store only ever sees
//! ownership-scoped operations.

use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use pagination::{PageRequest, Sort};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateCardRequest, DeleteCardRequest, GetCardRequest, ListCardsRequest, UpdateCardRequest,
};
use crate::domain::{
    Amount, CardId, CardSortKey, CardValidationError, CashCard, Error, Principal, PrincipalId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BasicCredentials, authorize_card_owner};
use crate::inbound::http::state::HttpState;

/// Request payload for creating or replacing a cash card.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardPayloadBody {
    /// Card amount with at most two decimal places.
    #[schema(example = 123.45)]
    pub amount: Option<f64>,
    /// Optional owner; when present it must equal the authenticated
    /// principal.
    #[schema(example = "sarah1")]
    pub owner: Option<String>,
}

/// Response payload describing one cash card.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardResponseBody {
    /// Stable card identifier.
    #[schema(example = 99)]
    pub id: i64,
    /// Current amount.
    #[schema(example = 123.45)]
    pub amount: f64,
    /// Principal the card belongs to.
    #[schema(example = "sarah1")]
    pub owner: String,
}

impl From<CashCard> for CardResponseBody {
    fn from(card: CashCard) -> Self {
        Self {
            id: card.id().value(),
            amount: card.amount().into(),
            owner: card.owner().to_string(),
        }
    }
}

/// Query parameters accepted by the listing endpoint.
///
/// Values arrive as raw strings so validation failures produce the domain
/// error shape instead of the framework's default rejection.
#[derive(Debug, Deserialize)]
pub struct ListCardsQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

fn parse_amount(raw: Option<f64>) -> Result<Amount, Error> {
    let raw = raw.ok_or_else(|| {
        Error::invalid_request("missing required field: amount")
            .with_details(json!({ "field": "amount", "code": "missing_field" }))
    })?;
    Amount::try_from(raw).map_err(map_amount_error)
}

fn map_amount_error(err: CardValidationError) -> Error {
    let code = match err {
        CardValidationError::NonFiniteAmount => "non_finite_amount",
        CardValidationError::AmountPrecisionTooFine { .. } => "too_many_decimal_places",
        CardValidationError::AmountOutOfRange { .. } => "amount_out_of_range",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "amount",
        "code": code,
    }))
}

/// Resolve the payload's optional owner against the authenticated principal.
///
/// A client may omit the owner (it defaults to the creator) or restate its
/// own id; naming anyone else is rejected so records can never be created or
/// updated on another principal's behalf.
fn parse_owner_override(raw: Option<String>, principal: &Principal) -> Result<PrincipalId, Error> {
    let Some(raw) = raw else {
        return Ok(principal.id().clone());
    };

    let owner = PrincipalId::new(&raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "owner",
            "value": raw,
            "code": "invalid_owner",
        }))
    })?;
    if &owner == principal.id() {
        Ok(owner)
    } else {
        Err(
            Error::invalid_request("owner must match the authenticated principal").with_details(
                json!({
                    "field": "owner",
                    "value": raw,
                    "code": "owner_mismatch",
                }),
            ),
        )
    }
}

fn parse_window_parameter(raw: Option<String>, field: &'static str) -> Result<Option<u32>, Error> {
    raw.map(|value| {
        value.trim().parse::<u32>().map_err(|_| {
            Error::invalid_request(format!("{field} must be a non-negative integer")).with_details(
                json!({
                    "field": field,
                    "value": value,
                    "code": "invalid_integer",
                }),
            )
        })
    })
    .transpose()
}

fn parse_list_query(query: ListCardsQuery) -> Result<(PageRequest, Sort<CardSortKey>), Error> {
    let page = parse_window_parameter(query.page, "page")?;
    let size = parse_window_parameter(query.size, "size")?;
    let page = PageRequest::from_params(page, size).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "size",
            "code": "invalid_page_size",
        }))
    })?;

    let sort = match query.sort {
        None => Sort::by(CardSortKey::default()),
        Some(raw) => Sort::parse(&raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "sort",
                "value": raw,
                "code": "invalid_sort",
            }))
        })?,
    };

    Ok((page, sort))
}

/// Create a cash card owned by the authenticated principal.
#[utoipa::path(
    post,
    path = "/records",
    request_body = CardPayloadBody,
    responses(
        (status = 201, description = "Card created", body = CardResponseBody,
            headers(("Location" = String, description = "Path of the new card"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["records"],
    operation_id = "createCard",
    security(("BasicAuth" = []))
)]
#[post("/records")]
pub async fn create_card(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
    payload: web::Json<CardPayloadBody>,
) -> ApiResult<HttpResponse> {
    let principal = authorize_card_owner(state.principals.as_ref(), credentials.credentials()).await?;
    let body = payload.into_inner();
    let amount = parse_amount(body.amount)?;
    let owner = parse_owner_override(body.owner, &principal)?;

    let response = state
        .cards
        .create_card(CreateCardRequest { owner, amount })
        .await?;
    let card = CardResponseBody::from(response.card);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/records/{}", card.id)))
        .json(card))
}

/// Read one cash card the authenticated principal owns.
#[utoipa::path(
    get,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Card identifier")),
    responses(
        (status = 200, description = "Card", body = CardResponseBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "getCard",
    security(("BasicAuth" = []))
)]
#[get("/records/{id}")]
pub async fn get_card(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CardResponseBody>> {
    let principal = authorize_card_owner(state.principals.as_ref(), credentials.credentials()).await?;
    let response = state
        .cards_query
        .get_card(GetCardRequest {
            id: CardId::new(path.into_inner()),
            owner: principal.id().clone(),
        })
        .await?;

    Ok(web::Json(CardResponseBody::from(response.card)))
}

/// List the authenticated principal's cash cards, sorted and paged.
#[utoipa::path(
    get,
    path = "/records",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Rows per page, at most 100"),
        ("sort" = Option<String>, Query, description = "`key[,direction]` with keys `id` or `amount`")
    ),
    responses(
        (status = 200, description = "One page of cards", body = [CardResponseBody]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["records"],
    operation_id = "listCards",
    security(("BasicAuth" = []))
)]
#[get("/records")]
pub async fn list_cards(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
    query: web::Query<ListCardsQuery>,
) -> ApiResult<web::Json<Vec<CardResponseBody>>> {
    let principal = authorize_card_owner(state.principals.as_ref(), credentials.credentials()).await?;
    let (page, sort) = parse_list_query(query.into_inner())?;

    let response = state
        .cards_query
        .list_cards(ListCardsRequest {
            owner: principal.id().clone(),
            page,
            sort,
        })
        .await?;

    Ok(web::Json(
        response
            .cards
            .into_iter()
            .map(CardResponseBody::from)
            .collect(),
    ))
}

/// Replace the amount of a cash card the authenticated principal owns.
#[utoipa::path(
    put,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Card identifier")),
    request_body = CardPayloadBody,
    responses(
        (status = 204, description = "Card updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "updateCard",
    security(("BasicAuth" = []))
)]
#[put("/records/{id}")]
pub async fn update_card(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
    path: web::Path<i64>,
    payload: web::Json<CardPayloadBody>,
) -> ApiResult<HttpResponse> {
    let principal = authorize_card_owner(state.principals.as_ref(), credentials.credentials()).await?;
    let body = payload.into_inner();
    let amount = parse_amount(body.amount)?;
    let owner = parse_owner_override(body.owner, &principal)?;

    state
        .cards
        .update_card(UpdateCardRequest {
            id: CardId::new(path.into_inner()),
            owner,
            amount,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete a cash card the authenticated principal owns.
#[utoipa::path(
    delete,
    path = "/records/{id}",
    params(("id" = i64, Path, description = "Card identifier")),
    responses(
        (status = 204, description = "Card deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "deleteCard",
    security(("BasicAuth" = []))
)]
#[delete("/records/{id}")]
pub async fn delete_card(
    state: web::Data<HttpState>,
    credentials: BasicCredentials,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let principal = authorize_card_owner(state.principals.as_ref(), credentials.credentials()).await?;
    state
        .cards
        .delete_card(DeleteCardRequest {
            id: CardId::new(path.into_inner()),
            owner: principal.id().clone(),
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "cards_tests.rs"]
mod tests;
