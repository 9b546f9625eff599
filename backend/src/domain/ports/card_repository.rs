//! Driven port for cash card persistence.
//!
//! Every operation takes the acting owner as a first-class filter parameter:
//! there is no unscoped lookup for a call site to forget to scope. A card
//! belonging to someone else is indistinguishable from an absent card, so
//! adapters report both as `None`/`false` rather than a distinct error.

use async_trait::async_trait;
use pagination::{PageRequest, Sort};

use crate::domain::{Amount, CardId, CardSortKey, CashCard, PrincipalId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by card repository adapters.
    pub enum CardRepositoryError {
        /// The backing store failed while executing an operation.
        Storage { message: String } =>
            "card store failure: {message}",
    }
}

/// Port for ownership-scoped card reads and writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persist a new card for `owner`, assigning the next identifier from
    /// the global sequence.
    async fn insert(
        &self,
        owner: &PrincipalId,
        amount: Amount,
    ) -> Result<CashCard, CardRepositoryError>;

    /// Find a card by id, scoped to `owner`.
    ///
    /// Returns `None` both when no card has that id and when the card is
    /// owned by a different principal.
    async fn find(
        &self,
        id: CardId,
        owner: &PrincipalId,
    ) -> Result<Option<CashCard>, CardRepositoryError>;

    /// List `owner`'s cards ordered by `sort` and sliced to `page`.
    ///
    /// Windows past the end of the owner's cards yield an empty vector.
    async fn list(
        &self,
        owner: &PrincipalId,
        page: PageRequest,
        sort: Sort<CardSortKey>,
    ) -> Result<Vec<CashCard>, CardRepositoryError>;

    /// Replace the amount of an owned card in place.
    ///
    /// Returns `false` when no card with `id` is owned by `owner`.
    async fn update_amount(
        &self,
        id: CardId,
        owner: &PrincipalId,
        amount: Amount,
    ) -> Result<bool, CardRepositoryError>;

    /// Delete an owned card.
    ///
    /// Returns `false` when no card with `id` is owned by `owner`, which
    /// makes repeated deletion naturally idempotent for callers.
    async fn remove(&self, id: CardId, owner: &PrincipalId)
    -> Result<bool, CardRepositoryError>;
}
