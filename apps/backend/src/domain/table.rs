//! The table layout and its structural invariants.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, CardId};
use super::piles::{PileId, FOUNDATION_COUNT, TABLEAU_COUNT};
use crate::errors::domain::{DomainError, ValidationKind};

pub const DECK_SIZE: usize = 52;

/// All piles of a Klondike table. The last element of each pile is its top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TableDocument", try_from = "TableDocument")]
pub struct TableState {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub tableau: [Vec<Card>; TABLEAU_COUNT],
}

impl TableState {
    pub fn pile(&self, id: PileId) -> &[Card] {
        match id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Foundation(i) => &self.foundations[i],
            PileId::Tableau(i) => &self.tableau[i],
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Vec<Card> {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Foundation(i) => &mut self.foundations[i],
            PileId::Tableau(i) => &mut self.tableau[i],
        }
    }

    pub fn top(&self, id: PileId) -> Option<&Card> {
        self.pile(id).last()
    }

    pub fn card_count(&self) -> usize {
        PileId::all().map(|p| self.pile(p).len()).sum()
    }

    pub fn cards_on_foundations(&self) -> usize {
        self.foundations.iter().map(Vec::len).sum()
    }

    /// Cards not yet built onto the foundations.
    pub fn cards_remaining(&self) -> usize {
        DECK_SIZE.saturating_sub(self.cards_on_foundations())
    }

    /// Where a card currently lies, if anywhere.
    pub fn locate(&self, card: CardId) -> Option<(PileId, usize)> {
        PileId::all().find_map(|pile| {
            self.pile(pile)
                .iter()
                .position(|c| c.id() == card)
                .map(|pos| (pile, pos))
        })
    }

    /// Turn the top card of every tableau pile face up.
    pub fn reveal_tableau_tops(&mut self) {
        for pile in self.tableau.iter_mut() {
            if let Some(top) = pile.last_mut() {
                if !top.face_up {
                    *top = top.turned(true);
                }
            }
        }
    }

    /// Every card appears exactly once and the deck is complete.
    pub fn check_conservation(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for pile in PileId::all() {
            for card in self.pile(pile) {
                if !seen.insert(card.id()) {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidTable,
                        format!("Card {} appears more than once", card.id()),
                    ));
                }
            }
        }
        if seen.len() != DECK_SIZE {
            return Err(DomainError::validation(
                ValidationKind::InvalidTable,
                format!("Table holds {} cards, expected {DECK_SIZE}", seen.len()),
            ));
        }
        Ok(())
    }

    /// Full structural check: conservation, foundation sequences, tableau
    /// runs and revealed tops.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        self.check_conservation()?;

        for (slot, foundation) in self.foundations.iter().enumerate() {
            for (i, card) in foundation.iter().enumerate() {
                if card.rank.index() != i || card.suit.foundation_slot() != slot {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidTable,
                        format!("Foundation stack{} is out of sequence at {}", slot + 1, card.id()),
                    ));
                }
            }
        }

        for (index, pile) in self.tableau.iter().enumerate() {
            let name = PileId::Tableau(index);
            if let Some(top) = pile.last() {
                if !top.face_up {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidTable,
                        format!("Top card of {name} is face down"),
                    ));
                }
            }
            let first_up = pile.iter().position(|c| c.face_up).unwrap_or(pile.len());
            if pile[first_up..].iter().any(|c| !c.face_up) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidTable,
                    format!("{name} has a face-down card above a face-up one"),
                ));
            }
            for pair in pile[first_up..].windows(2) {
                let (lower, upper) = (pair[0], pair[1]);
                if lower.color() == upper.color() || lower.rank.index() != upper.rank.index() + 1 {
                    return Err(DomainError::validation(
                        ValidationKind::InvalidTable,
                        format!("{name} has {} on {}", upper.id(), lower.id()),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Stored document shape: one field per boundary pile name.
#[derive(Serialize, Deserialize)]
struct TableDocument {
    pile1: Vec<Card>,
    pile2: Vec<Card>,
    pile3: Vec<Card>,
    pile4: Vec<Card>,
    pile5: Vec<Card>,
    pile6: Vec<Card>,
    pile7: Vec<Card>,
    stack1: Vec<Card>,
    stack2: Vec<Card>,
    stack3: Vec<Card>,
    stack4: Vec<Card>,
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl From<TableState> for TableDocument {
    fn from(state: TableState) -> Self {
        let [pile1, pile2, pile3, pile4, pile5, pile6, pile7] = state.tableau;
        let [stack1, stack2, stack3, stack4] = state.foundations;
        Self {
            pile1,
            pile2,
            pile3,
            pile4,
            pile5,
            pile6,
            pile7,
            stack1,
            stack2,
            stack3,
            stack4,
            draw: state.stock,
            discard: state.waste,
        }
    }
}

impl TryFrom<TableDocument> for TableState {
    type Error = DomainError;

    fn try_from(doc: TableDocument) -> Result<Self, Self::Error> {
        let state = TableState {
            stock: doc.draw,
            waste: doc.discard,
            foundations: [doc.stack1, doc.stack2, doc.stack3, doc.stack4],
            tableau: [
                doc.pile1, doc.pile2, doc.pile3, doc.pile4, doc.pile5, doc.pile6, doc.pile7,
            ],
        };
        state.check_conservation()?;
        Ok(state)
    }
}
