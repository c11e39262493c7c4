//! Move requests and rejection outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cards_types::CardId;
use super::piles::PileId;
use crate::errors::domain::{DomainError, ValidationKind};

/// A proposed movement of named cards from one pile to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedMove {
    pub cards: Vec<CardId>,
    #[serde(rename = "src")]
    pub source: PileId,
    #[serde(rename = "dst")]
    pub target: PileId,
}

impl ProposedMove {
    pub fn new(cards: Vec<CardId>, source: PileId, target: PileId) -> Self {
        Self {
            cards,
            source,
            target,
        }
    }
}

/// How many cards a stock draw turns over.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DrawCount {
    #[default]
    One,
    Three,
}

impl DrawCount {
    pub const fn count(self) -> usize {
        match self {
            DrawCount::One => 1,
            DrawCount::Three => 3,
        }
    }

    /// Parse the game option label. `"Draw 3"` selects three; anything
    /// else selects one.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("draw 3") {
            DrawCount::Three
        } else {
            DrawCount::One
        }
    }

    pub fn from_count(count: i16) -> Self {
        if count == 3 {
            DrawCount::Three
        } else {
            DrawCount::One
        }
    }
}

/// Named rule checks; the name is reported back to the client on rejection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    DifferentColor,
    DescendingRank,
    AscendingFoundation,
    MovableRun,
    SingleCard,
    TopCards,
    StockDraw,
    WasteRecycle,
    AutoFinish,
}

impl Rule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::DifferentColor => "different_color",
            Rule::DescendingRank => "is_descending_rank_onto_tableau",
            Rule::AscendingFoundation => "is_ascending_rank_onto_foundation",
            Rule::MovableRun => "is_movable_run",
            Rule::SingleCard => "single_card",
            Rule::TopCards => "top_cards",
            Rule::StockDraw => "stock_draw",
            Rule::WasteRecycle => "waste_recycle",
            Rule::AutoFinish => "auto_finish",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a proposed move was refused. Rejections never change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A rule predicate failed.
    Illegal { rule: Rule, reason: &'static str },
    /// The source/target combination is never a legal move.
    IllegalRoute { source: PileId, target: PileId },
    /// A named card is not in the source pile.
    CardNotInSource { card: CardId, source: PileId },
    /// The move names no cards, or names a card twice.
    Malformed(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Illegal { rule, reason } => write!(f, "{rule}: {reason}"),
            Rejection::IllegalRoute { source, target } => {
                write!(f, "cannot move cards from {source} to {target}")
            }
            Rejection::CardNotInSource { card, source } => {
                write!(f, "card {card} is not in {source}")
            }
            Rejection::Malformed(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for Rejection {}

impl From<Rejection> for DomainError {
    fn from(rejection: Rejection) -> Self {
        let kind = match rejection {
            Rejection::CardNotInSource { .. } => ValidationKind::CardNotInPile,
            _ => ValidationKind::IllegalMove,
        };
        DomainError::validation(kind, rejection.to_string())
    }
}
