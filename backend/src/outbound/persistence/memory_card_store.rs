//! In-memory card store adapter.
//!
//! Backs the [`CardRepository`] port with an `RwLock`-guarded table plus an
//! atomic id sequence. Single-card writes happen under the write lock, so a
//! reader never observes a partially written card, and deleted identifiers
//! are never handed out again because the sequence only moves forward.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::{PageRequest, Sort, window};

use crate::domain::ports::{CardRepository, CardRepositoryError};
use crate::domain::{Amount, CardId, CardSortKey, CashCard, PrincipalId};

type CardTable = BTreeMap<CardId, CashCard>;

/// Ownership-scoped card store held entirely in process memory.
pub struct MemoryCardStore {
    cards: RwLock<CardTable>,
    sequence: AtomicI64,
}

impl Default for MemoryCardStore {
    fn default() -> Self {
        Self {
            cards: RwLock::new(CardTable::new()),
            sequence: AtomicI64::new(1),
        }
    }
}

impl MemoryCardStore {
    /// Create an empty store whose sequence starts at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert fixture cards with explicit identifiers.
    ///
    /// The sequence is advanced past the largest seeded id so later inserts
    /// keep the single global id space intact.
    pub fn seed(
        &self,
        cards: impl IntoIterator<Item = CashCard>,
    ) -> Result<(), CardRepositoryError> {
        let mut table = self.write_table()?;
        for card in cards {
            let next = card.id().value().saturating_add(1);
            self.sequence.fetch_max(next, Ordering::SeqCst);
            table.insert(card.id(), card);
        }
        Ok(())
    }

    fn read_table(&self) -> Result<RwLockReadGuard<'_, CardTable>, CardRepositoryError> {
        self.cards
            .read()
            .map_err(|_| CardRepositoryError::storage("card table lock poisoned"))
    }

    fn write_table(&self) -> Result<RwLockWriteGuard<'_, CardTable>, CardRepositoryError> {
        self.cards
            .write()
            .map_err(|_| CardRepositoryError::storage("card table lock poisoned"))
    }
}

#[async_trait]
impl CardRepository for MemoryCardStore {
    async fn insert(
        &self,
        owner: &PrincipalId,
        amount: Amount,
    ) -> Result<CashCard, CardRepositoryError> {
        let id = CardId::new(self.sequence.fetch_add(1, Ordering::SeqCst));
        let card = CashCard::new(id, amount, owner.clone());

        let mut table = self.write_table()?;
        table.insert(id, card.clone());
        Ok(card)
    }

    async fn find(
        &self,
        id: CardId,
        owner: &PrincipalId,
    ) -> Result<Option<CashCard>, CardRepositoryError> {
        let table = self.read_table()?;
        Ok(table
            .get(&id)
            .filter(|card| card.owner() == owner)
            .cloned())
    }

    async fn list(
        &self,
        owner: &PrincipalId,
        page: PageRequest,
        sort: Sort<CardSortKey>,
    ) -> Result<Vec<CashCard>, CardRepositoryError> {
        let table = self.read_table()?;
        let mut owned: Vec<CashCard> = table
            .values()
            .filter(|card| card.owner() == owner)
            .cloned()
            .collect();
        drop(table);

        owned.sort_by(|a, b| a.listing_order(b, sort));
        Ok(window(owned, page))
    }

    async fn update_amount(
        &self,
        id: CardId,
        owner: &PrincipalId,
        amount: Amount,
    ) -> Result<bool, CardRepositoryError> {
        let mut table = self.write_table()?;
        match table.get_mut(&id) {
            Some(card) if card.owner() == owner => {
                *card = card.clone().with_amount(amount);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(
        &self,
        id: CardId,
        owner: &PrincipalId,
    ) -> Result<bool, CardRepositoryError> {
        let mut table = self.write_table()?;
        if table.get(&id).is_some_and(|card| card.owner() == owner) {
            table.remove(&id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
