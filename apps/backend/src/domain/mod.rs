//! Domain layer: pure Klondike types, rules and state transitions.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod moves;
pub mod piles;
pub mod prediction;
pub mod reducer;
pub mod rules;
pub mod table;
pub mod validator;

#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use cards_parsing::try_parse_card_ids;
pub use cards_types::{Card, CardId, Color, Rank, Suit};
pub use dealing::{deal, deal_with_seed, fresh_seed};
pub use moves::{DrawCount, ProposedMove, Rejection, Rule};
pub use piles::PileId;
pub use prediction::PredictedTable;
pub use reducer::{reduce, reduce_all, Action};
pub use rules::{check_move, is_won, RuleVerdict};
pub use table::TableState;
pub use validator::{validate, validate_auto_finish, Validated};
