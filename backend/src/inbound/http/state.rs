//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CardCommand, CardQuery, PrincipalDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cards: Arc<dyn CardCommand>,
    pub cards_query: Arc<dyn CardQuery>,
    pub principals: Arc<dyn PrincipalDirectory>,
}

impl HttpState {
    /// Construct state from the card ports and the principal directory.
    pub fn new(
        cards: Arc<dyn CardCommand>,
        cards_query: Arc<dyn CardQuery>,
        principals: Arc<dyn PrincipalDirectory>,
    ) -> Self {
        Self {
            cards,
            cards_query,
            principals,
        }
    }
}
