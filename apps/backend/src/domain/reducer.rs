//! Pure state transitions over [`TableState`].
//!
//! `reduce` never mutates its input and never re-checks legality of plain
//! moves; that is the caller's job via `rules::check_move`. Every action is
//! atomic: on error the caller keeps the original state.

use super::cards_types::{Card, CardId};
use super::dealing::deal_with_seed;
use super::piles::PileId;
use super::rules;
use super::table::TableState;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Discard the current table and deal from `seed`.
    Deal { seed: u64 },
    /// Same as `Deal`; kept distinct so logs say what the player asked for.
    Reset { seed: u64 },
    /// Remove the named cards from `source` and append them to `target` in
    /// the order given.
    MoveCards {
        cards: Vec<CardId>,
        source: PileId,
        target: PileId,
    },
    /// Set the face-up flag of the named cards in `pile`.
    FlipCard {
        cards: Vec<CardId>,
        pile: PileId,
        face_up: bool,
    },
    /// Move every tableau card to the foundations in one batch.
    AutoFinish,
}

pub fn reduce(state: &TableState, action: &Action) -> Result<TableState, DomainError> {
    let mut next = match action {
        Action::Deal { seed } | Action::Reset { seed } => deal_with_seed(*seed),
        Action::MoveCards {
            cards,
            source,
            target,
        } => {
            let mut next = state.clone();
            move_cards(&mut next, cards, *source, *target)?;
            next
        }
        Action::FlipCard {
            cards,
            pile,
            face_up,
        } => {
            let mut next = state.clone();
            flip_cards(&mut next, cards, *pile, *face_up)?;
            next
        }
        Action::AutoFinish => {
            let plan = rules::auto_finish_plan(state).map_err(DomainError::from)?;
            reduce_all(state, &plan)?
        }
    };
    next.reveal_tableau_tops();
    Ok(next)
}

/// Apply a batch of actions as one step.
pub fn reduce_all(state: &TableState, actions: &[Action]) -> Result<TableState, DomainError> {
    let mut current = state.clone();
    for action in actions {
        current = reduce(&current, action)?;
    }
    Ok(current)
}

fn check_pile(pile: PileId) -> Result<(), DomainError> {
    if pile.is_valid() {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidPile,
            format!("Unknown pile: {pile:?}"),
        ))
    }
}

fn missing(card: CardId, pile: PileId) -> DomainError {
    DomainError::validation(
        ValidationKind::CardNotInPile,
        format!("Card {card} is not in {pile}"),
    )
}

fn move_cards(
    state: &mut TableState,
    cards: &[CardId],
    source: PileId,
    target: PileId,
) -> Result<(), DomainError> {
    check_pile(source)?;
    check_pile(target)?;

    let from = state.pile(source);
    let mut moving: Vec<Card> = Vec::with_capacity(cards.len());
    for id in cards {
        let card = from
            .iter()
            .find(|c| c.id() == *id)
            .copied()
            .ok_or_else(|| missing(*id, source))?;
        if moving.iter().any(|c| c.id() == *id) {
            return Err(DomainError::validation(
                ValidationKind::IllegalMove,
                format!("Card {id} named twice"),
            ));
        }
        moving.push(card);
    }

    state
        .pile_mut(source)
        .retain(|c| !cards.contains(&c.id()));
    state.pile_mut(target).extend(moving);
    Ok(())
}

fn flip_cards(
    state: &mut TableState,
    cards: &[CardId],
    pile: PileId,
    face_up: bool,
) -> Result<(), DomainError> {
    check_pile(pile)?;
    if let Some(id) = cards
        .iter()
        .find(|id| !state.pile(pile).iter().any(|c| c.id() == **id))
    {
        return Err(missing(*id, pile));
    }
    for card in state.pile_mut(pile).iter_mut() {
        if cards.contains(&card.id()) {
            *card = card.turned(face_up);
        }
    }
    Ok(())
}
