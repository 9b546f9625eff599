//! Startup seeding orchestration.

use thiserror::Error;
use tracing::info;

use crate::demo_data::config::DemoDataSettings;
use crate::domain::ports::CardRepositoryError;
use crate::domain::{
    Amount, CardId, CardValidationError, CashCard, PrincipalId, PrincipalValidationError, Role,
};
use crate::outbound::persistence::{MemoryCardStore, MemoryPrincipalDirectory};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum DemoDataError {
    /// A fixture principal failed validation.
    #[error("invalid demo principal: {0}")]
    Principal(#[from] PrincipalValidationError),
    /// A fixture card failed validation.
    #[error("invalid demo card: {0}")]
    Card(#[from] CardValidationError),
    /// The card store rejected the fixture rows.
    #[error("demo card seeding failed: {0}")]
    Storage(#[from] CardRepositoryError),
}

fn fixture_card(id: i64, amount: f64, owner: &str) -> Result<CashCard, DemoDataError> {
    Ok(CashCard::new(
        CardId::new(id),
        Amount::try_from(amount)?,
        PrincipalId::new(owner)?,
    ))
}

/// Seed the demo principals and cards when enabled.
///
/// Returns `true` when the fixtures were applied and `false` when seeding is
/// switched off. Seeding runs before the adapters are shared with the server,
/// so the directory is still exclusively held here.
pub fn seed_demo_data(
    settings: &DemoDataSettings,
    directory: &mut MemoryPrincipalDirectory,
    cards: &MemoryCardStore,
) -> Result<bool, DemoDataError> {
    if !settings.enabled {
        info!(reason = "disabled", "demo data seeding skipped");
        return Ok(false);
    }

    directory.insert("sarah1", "abc123", Role::CardOwner)?;
    directory.insert("kumar", "xyz789", Role::CardOwner)?;
    directory.insert("hank-owns-no-cards", "qrs456", Role::NonOwner)?;

    cards.seed([
        fixture_card(99, 123.45, "sarah1")?,
        fixture_card(100, 1.00, "sarah1")?,
        fixture_card(101, 150.00, "sarah1")?,
        fixture_card(102, 200.00, "kumar")?,
    ])?;

    info!(principals = 3, cards = 4, "demo data seeding applied");
    Ok(true)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::CardSortKey;
    use crate::domain::ports::CardRepository;
    use pagination::{PageRequest, Sort};

    #[rstest]
    fn disabled_settings_leave_the_adapters_empty() {
        let mut directory = MemoryPrincipalDirectory::new();
        let cards = MemoryCardStore::new();

        let applied = seed_demo_data(&DemoDataSettings { enabled: false }, &mut directory, &cards)
            .expect("seeding call succeeds");
        assert!(!applied);
    }

    #[rstest]
    #[tokio::test]
    async fn enabled_settings_seed_the_fixture_rows() {
        let mut directory = MemoryPrincipalDirectory::new();
        let cards = MemoryCardStore::new();

        let applied = seed_demo_data(&DemoDataSettings { enabled: true }, &mut directory, &cards)
            .expect("seeding call succeeds");
        assert!(applied);

        let sarah = PrincipalId::new("sarah1").expect("fixture owner is valid");
        let owned = cards
            .list(
                &sarah,
                PageRequest::first(),
                Sort::by(CardSortKey::default()),
            )
            .await
            .expect("listing succeeds");
        let ids: Vec<i64> = owned.iter().map(|card| card.id().value()).collect();
        assert_eq!(ids, vec![99, 100, 101]);

        // The sequence continues past the fixture ids.
        let kumar = PrincipalId::new("kumar").expect("fixture owner is valid");
        let created = cards
            .insert(&kumar, Amount::try_from(5.0).expect("fixture amount"))
            .await
            .expect("insert succeeds");
        assert_eq!(created.id().value(), 103);
    }
}
