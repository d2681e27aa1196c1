//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod predictions;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tricks;
pub mod visibility;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_predictions;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use rules::{PlayerCount, RuleSet};
pub use session::{ActionOutcome, GameSession, SeatInfo};
pub use snapshot::PlayerSnapshot;
pub use state::{Phase, PlayerId, Seat};
