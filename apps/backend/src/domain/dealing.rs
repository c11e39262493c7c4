//! Deterministic shuffling and the initial Klondike deal.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::cards_types::{Card, CardId, Rank, Suit};
use super::piles::TABLEAU_COUNT;
use super::table::{TableState, DECK_SIZE};
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate a full 52-card deck in standard order, all face down.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher-Yates shuffle driven by ChaCha20 seeded from `seed`.
///
/// `random_range` samples without modulo bias, so every permutation is
/// equally likely for a uniformly random seed.
pub fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

pub fn new_shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);
    deck
}

/// A fresh seed from the OS-seeded thread RNG. Stored with the game so the
/// deal can be reproduced.
pub fn fresh_seed() -> u64 {
    rand::rng().random::<u64>()
}

/// Lay out a deck as a Klondike table.
///
/// Cards are dealt row by row: the first row puts one card on each of the
/// seven tableau piles, the next row starts at the second pile, and so on,
/// so pile *i* (1-based) ends up with *i* cards. Only the last card of each
/// pile is face up. The remaining 24 cards form the face-down stock, with
/// the last card of the deck on top.
pub fn deal(deck: &[Card]) -> Result<TableState, DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeal,
            format!("Deck must hold {DECK_SIZE} cards, got {}", deck.len()),
        ));
    }
    let unique: HashSet<CardId> = deck.iter().map(Card::id).collect();
    if unique.len() != DECK_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeal,
            "Deck contains duplicate cards",
        ));
    }

    Ok(lay_out(deck.iter().copied()))
}

/// Shuffle a fresh deck with `seed` and deal it.
pub fn deal_with_seed(seed: u64) -> TableState {
    lay_out(new_shuffled_deck(seed).into_iter())
}

fn lay_out(mut cards: impl Iterator<Item = Card>) -> TableState {
    let mut state = TableState::default();
    for row in 0..TABLEAU_COUNT {
        for pile in state.tableau.iter_mut().skip(row) {
            pile.extend(cards.next().map(|c| c.turned(false)));
        }
    }
    state.stock.extend(cards.map(|c| c.turned(false)));
    state.reveal_tableau_tops();
    state
}
