//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod card_command;
mod card_query;
mod card_repository;
mod principal_directory;

#[cfg(test)]
pub use card_command::MockCardCommand;
pub use card_command::{
    CardCommand, CreateCardRequest, CreateCardResponse, DeleteCardRequest, UpdateCardRequest,
};
#[cfg(test)]
pub use card_query::MockCardQuery;
pub use card_query::{
    CardQuery, GetCardRequest, GetCardResponse, ListCardsRequest, ListCardsResponse,
};
#[cfg(test)]
pub use card_repository::MockCardRepository;
pub use card_repository::{CardRepository, CardRepositoryError};
#[cfg(test)]
pub use principal_directory::MockPrincipalDirectory;
pub use principal_directory::PrincipalDirectory;
