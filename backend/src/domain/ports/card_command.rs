//! Driving port for cash card mutations.
//!
//! Inbound adapters call this port after authentication and the role gate;
//! the owner on every request is therefore always the authenticated
//! principal, never a client-supplied value.

use async_trait::async_trait;

use crate::domain::{Amount, CardId, CashCard, Error, PrincipalId};

/// Request to create a card for the acting principal.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCardRequest {
    pub owner: PrincipalId,
    pub amount: Amount,
}

/// Response from creating a card.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCardResponse {
    pub card: CashCard,
}

/// Request to replace the amount of an owned card.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCardRequest {
    pub id: CardId,
    pub owner: PrincipalId,
    pub amount: Amount,
}

/// Request to delete an owned card.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCardRequest {
    pub id: CardId,
    pub owner: PrincipalId,
}

/// Driving port for card write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardCommand: Send + Sync {
    /// Create a card owned by the requesting principal.
    async fn create_card(&self, request: CreateCardRequest) -> Result<CreateCardResponse, Error>;

    /// Replace the amount of a card the principal owns.
    ///
    /// Fails with `NotFound` when the card is absent or owned by someone
    /// else; the two cases are deliberately indistinguishable.
    async fn update_card(&self, request: UpdateCardRequest) -> Result<(), Error>;

    /// Delete a card the principal owns, with the same `NotFound` contract
    /// as [`CardCommand::update_card`].
    async fn delete_card(&self, request: DeleteCardRequest) -> Result<(), Error>;
}
