//! Driving port for cash card reads.

use async_trait::async_trait;
use pagination::{PageRequest, Sort};

use crate::domain::{CardId, CardSortKey, CashCard, Error, PrincipalId};

/// Request to read one owned card.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCardRequest {
    pub id: CardId,
    pub owner: PrincipalId,
}

/// Response carrying one owned card.
#[derive(Debug, Clone, PartialEq)]
pub struct GetCardResponse {
    pub card: CashCard,
}

/// Request to list the principal's cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCardsRequest {
    pub owner: PrincipalId,
    pub page: PageRequest,
    pub sort: Sort<CardSortKey>,
}

/// Response carrying one page of the principal's cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCardsResponse {
    pub cards: Vec<CashCard>,
}

/// Driving port for card read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardQuery: Send + Sync {
    /// Read a card the principal owns.
    ///
    /// Fails with `NotFound` when the card is absent or owned by someone
    /// else.
    async fn get_card(&self, request: GetCardRequest) -> Result<GetCardResponse, Error>;

    /// List the principal's cards, sorted and paged.
    ///
    /// Out-of-range pages succeed with an empty list rather than failing.
    async fn list_cards(&self, request: ListCardsRequest) -> Result<ListCardsResponse, Error>;
}
