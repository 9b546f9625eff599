//! Tests for the cash card domain services.

use std::sync::Arc;

use pagination::{PageRequest, Sort};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockCardRepository;
use crate::domain::{Amount, CardSortKey, CashCard, ErrorCode, PrincipalId};

#[fixture]
fn owner() -> PrincipalId {
    PrincipalId::new("sarah1").expect("fixture owner is valid")
}

#[fixture]
fn amount() -> Amount {
    Amount::try_from(250.0).expect("fixture amount is valid")
}

fn sample_card(id: i64, amount: Amount, owner: &PrincipalId) -> CashCard {
    CashCard::new(CardId::new(id), amount, owner.clone())
}

#[rstest]
#[tokio::test]
async fn create_card_returns_the_persisted_card(owner: PrincipalId, amount: Amount) {
    let card = sample_card(99, amount, &owner);
    let expected = card.clone();

    let mut repo = MockCardRepository::new();
    repo.expect_insert()
        .withf(move |requested_owner, requested_amount| {
            requested_owner.as_ref() == "sarah1" && *requested_amount == amount
        })
        .return_once(move |_, _| Ok(card));

    let service = CardCommandService::new(Arc::new(repo));
    let response = service
        .create_card(CreateCardRequest { owner, amount })
        .await
        .expect("create succeeds");

    assert_eq!(response.card, expected);
}

#[rstest]
#[tokio::test]
async fn update_card_maps_a_missed_write_to_not_found(owner: PrincipalId, amount: Amount) {
    let mut repo = MockCardRepository::new();
    repo.expect_update_amount().returning(|_, _, _| Ok(false));

    let service = CardCommandService::new(Arc::new(repo));
    let err = service
        .update_card(UpdateCardRequest {
            id: CardId::new(1000),
            owner,
            amount,
        })
        .await
        .expect_err("missed writes surface as errors");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_card_succeeds_when_the_repository_hits(owner: PrincipalId, amount: Amount) {
    let mut repo = MockCardRepository::new();
    repo.expect_update_amount().returning(|_, _, _| Ok(true));

    let service = CardCommandService::new(Arc::new(repo));
    service
        .update_card(UpdateCardRequest {
            id: CardId::new(99),
            owner,
            amount,
        })
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_card_maps_a_missed_delete_to_not_found(owner: PrincipalId) {
    let mut repo = MockCardRepository::new();
    repo.expect_remove().returning(|_, _| Ok(false));

    let service = CardCommandService::new(Arc::new(repo));
    let err = service
        .delete_card(DeleteCardRequest {
            id: CardId::new(1000),
            owner,
        })
        .await
        .expect_err("missed deletes surface as errors");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_card_maps_a_missed_lookup_to_not_found(owner: PrincipalId) {
    let mut repo = MockCardRepository::new();
    repo.expect_find().returning(|_, _| Ok(None));

    let service = CardQueryService::new(Arc::new(repo));
    let err = service
        .get_card(GetCardRequest {
            id: CardId::new(1000),
            owner,
        })
        .await
        .expect_err("missed lookups surface as errors");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_card_returns_the_owned_card(owner: PrincipalId, amount: Amount) {
    let card = sample_card(99, amount, &owner);
    let expected = card.clone();

    let mut repo = MockCardRepository::new();
    repo.expect_find().return_once(move |_, _| Ok(Some(card)));

    let service = CardQueryService::new(Arc::new(repo));
    let response = service
        .get_card(GetCardRequest {
            id: CardId::new(99),
            owner,
        })
        .await
        .expect("lookup succeeds");

    assert_eq!(response.card, expected);
}

#[rstest]
#[tokio::test]
async fn list_cards_passes_the_window_and_sort_through(owner: PrincipalId, amount: Amount) {
    let cards = vec![sample_card(99, amount, &owner)];
    let expected = cards.clone();

    let mut repo = MockCardRepository::new();
    repo.expect_list()
        .withf(|_, page, sort| {
            page.page() == 2 && page.size() == 5 && *sort.key() == CardSortKey::Amount
        })
        .return_once(move |_, _, _| Ok(cards));

    let service = CardQueryService::new(Arc::new(repo));
    let response = service
        .list_cards(ListCardsRequest {
            owner,
            page: PageRequest::new(2, 5).expect("valid window"),
            sort: Sort::descending(CardSortKey::Amount),
        })
        .await
        .expect("listing succeeds");

    assert_eq!(response.cards, expected);
}

#[rstest]
#[tokio::test]
async fn storage_errors_surface_as_internal(owner: PrincipalId) {
    let mut repo = MockCardRepository::new();
    repo.expect_find()
        .returning(|_, _| Err(CardRepositoryError::storage("lock poisoned")));

    let service = CardQueryService::new(Arc::new(repo));
    let err = service
        .get_card(GetCardRequest {
            id: CardId::new(99),
            owner,
        })
        .await
        .expect_err("storage failures surface as errors");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
