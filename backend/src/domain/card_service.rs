//! Cash card domain services.
//!
//! These services implement the card driving ports over a repository,
//! translating the repository's ownership-filtered results into the domain
//! error taxonomy: a missed lookup or write becomes `NotFound` regardless of
//! whether the card is absent or owned by someone else.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    CardCommand, CardQuery, CardRepository, CardRepositoryError, CreateCardRequest,
    CreateCardResponse, DeleteCardRequest, GetCardRequest, GetCardResponse, ListCardsRequest,
    ListCardsResponse, UpdateCardRequest,
};
use crate::domain::CardId;

fn map_repository_error(error: CardRepositoryError) -> Error {
    match error {
        CardRepositoryError::Storage { message } => {
            Error::internal(format!("card repository error: {message}"))
        }
    }
}

fn card_not_found(id: CardId) -> Error {
    // One message for both "absent" and "owned by someone else" so the
    // response never leaks whether the id exists.
    Error::not_found(format!("cash card {id} not found"))
}

/// Card service implementing the command driving port.
#[derive(Clone)]
pub struct CardCommandService<R> {
    cards: Arc<R>,
}

impl<R> CardCommandService<R> {
    /// Create a new command service over the card repository.
    pub fn new(cards: Arc<R>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl<R> CardCommand for CardCommandService<R>
where
    R: CardRepository,
{
    async fn create_card(&self, request: CreateCardRequest) -> Result<CreateCardResponse, Error> {
        let CreateCardRequest { owner, amount } = request;
        let card = self
            .cards
            .insert(&owner, amount)
            .await
            .map_err(map_repository_error)?;

        tracing::info!(card_id = %card.id(), owner = %owner, "cash card created");
        Ok(CreateCardResponse { card })
    }

    async fn update_card(&self, request: UpdateCardRequest) -> Result<(), Error> {
        let UpdateCardRequest { id, owner, amount } = request;
        let updated = self
            .cards
            .update_amount(id, &owner, amount)
            .await
            .map_err(map_repository_error)?;

        if updated {
            Ok(())
        } else {
            Err(card_not_found(id))
        }
    }

    async fn delete_card(&self, request: DeleteCardRequest) -> Result<(), Error> {
        let DeleteCardRequest { id, owner } = request;
        let removed = self
            .cards
            .remove(id, &owner)
            .await
            .map_err(map_repository_error)?;

        if removed {
            tracing::info!(card_id = %id, owner = %owner, "cash card deleted");
            Ok(())
        } else {
            Err(card_not_found(id))
        }
    }
}

/// Card service implementing the query driving port.
#[derive(Clone)]
pub struct CardQueryService<R> {
    cards: Arc<R>,
}

impl<R> CardQueryService<R> {
    /// Create a new query service over the card repository.
    pub fn new(cards: Arc<R>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl<R> CardQuery for CardQueryService<R>
where
    R: CardRepository,
{
    async fn get_card(&self, request: GetCardRequest) -> Result<GetCardResponse, Error> {
        let GetCardRequest { id, owner } = request;
        let card = self
            .cards
            .find(id, &owner)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| card_not_found(id))?;

        Ok(GetCardResponse { card })
    }

    async fn list_cards(&self, request: ListCardsRequest) -> Result<ListCardsResponse, Error> {
        let ListCardsRequest { owner, page, sort } = request;
        let cards = self
            .cards
            .list(&owner, page, sort)
            .await
            .map_err(map_repository_error)?;

        Ok(ListCardsResponse { cards })
    }
}

#[cfg(test)]
#[path = "card_service_tests.rs"]
mod tests;
