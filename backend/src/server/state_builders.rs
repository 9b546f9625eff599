//! Assembly of the handler state from adapters and domain services.

use std::sync::Arc;

use crate::demo_data::{DemoDataSettings, seed_demo_data};
use crate::domain::{CardCommandService, CardQueryService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{MemoryCardStore, MemoryPrincipalDirectory};

/// Wire the in-memory adapters and card services into handler state.
///
/// Seeding happens here, while the directory is still exclusively owned,
/// so the shared state never changes shape after construction.
pub(crate) fn build_http_state(demo_data: &DemoDataSettings) -> std::io::Result<HttpState> {
    let mut directory = MemoryPrincipalDirectory::new();
    let cards = MemoryCardStore::new();

    seed_demo_data(demo_data, &mut directory, &cards)
        .map_err(|e| std::io::Error::other(format!("demo data seeding failed: {e}")))?;

    let cards = Arc::new(cards);
    Ok(HttpState::new(
        Arc::new(CardCommandService::new(Arc::clone(&cards))),
        Arc::new(CardQueryService::new(cards)),
        Arc::new(directory),
    ))
}
