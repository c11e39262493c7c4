//! Klondike rule predicates.
//!
//! This module is the only place legality is decided. The server-side
//! validator and the client prediction store both go through
//! [`check_move`] and [`auto_finish_plan`], which reduce a proposed move to
//! the reducer actions that carry it out.

use super::cards_types::{Card, CardId, Rank, Suit};
use super::moves::{DrawCount, ProposedMove, Rejection, Rule};
use super::piles::PileId;
use super::reducer::Action;
use super::table::TableState;

/// Outcome of a single predicate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    pub legal: bool,
    pub reason: &'static str,
}

impl RuleVerdict {
    pub const LEGAL: RuleVerdict = RuleVerdict {
        legal: true,
        reason: "ok",
    };

    pub const fn illegal(reason: &'static str) -> Self {
        Self {
            legal: false,
            reason,
        }
    }

    pub fn require(self, rule: Rule) -> Result<(), Rejection> {
        if self.legal {
            Ok(())
        } else {
            Err(Rejection::Illegal {
                rule,
                reason: self.reason,
            })
        }
    }
}

/// Legal iff the target is empty or its top differs in color from the
/// first candidate card.
pub fn different_color(candidate: &[Card], target: &[Card]) -> RuleVerdict {
    match (candidate.first(), target.last()) {
        (None, _) => RuleVerdict::illegal("no card to place"),
        (Some(_), None) => RuleVerdict::LEGAL,
        (Some(card), Some(top)) if card.color() != top.color() => RuleVerdict::LEGAL,
        _ => RuleVerdict::illegal("colors must alternate"),
    }
}

/// Legal iff the first candidate is one rank below the target's face-up
/// top, or the target is empty and the candidate is a King.
pub fn is_descending_rank_onto_tableau(candidate: &[Card], target: &[Card]) -> RuleVerdict {
    match (candidate.first(), target.last()) {
        (None, _) => RuleVerdict::illegal("no card to place"),
        (Some(card), None) if card.rank == Rank::King => RuleVerdict::LEGAL,
        (Some(_), None) => RuleVerdict::illegal("only a king may start an empty column"),
        (Some(_), Some(top)) if !top.face_up => RuleVerdict::illegal("target card is face down"),
        (Some(card), Some(top)) if top.rank.index() == card.rank.index() + 1 => {
            RuleVerdict::LEGAL
        }
        _ => RuleVerdict::illegal("rank must be one below the target card"),
    }
}

/// Legal iff exactly one card of the slot's suit whose rank index equals
/// the foundation's current length (Ace onto empty, Two onto Ace, ...).
pub fn is_ascending_rank_onto_foundation(
    candidate: &[Card],
    foundation: &[Card],
    slot: usize,
) -> RuleVerdict {
    let [card] = candidate else {
        return RuleVerdict::illegal("foundations take one card at a time");
    };
    if Suit::for_foundation_slot(slot) != Some(card.suit) {
        return RuleVerdict::illegal("foundation holds another suit");
    }
    if foundation.len() != card.rank.index() {
        return RuleVerdict::illegal("rank must be next in sequence");
    }
    RuleVerdict::LEGAL
}

/// Legal iff every card is face up and the cards form a strictly
/// descending, color-alternating run.
pub fn is_movable_run(candidate: &[Card]) -> RuleVerdict {
    if candidate.is_empty() {
        return RuleVerdict::illegal("no card to move");
    }
    if candidate.iter().any(|c| !c.face_up) {
        return RuleVerdict::illegal("face-down cards cannot move");
    }
    let ordered = candidate.windows(2).all(|pair| {
        pair[0].color() != pair[1].color() && pair[0].rank.index() == pair[1].rank.index() + 1
    });
    if ordered {
        RuleVerdict::LEGAL
    } else {
        RuleVerdict::illegal("cards must form a descending run of alternating colors")
    }
}

pub fn stock_and_waste_empty(state: &TableState) -> bool {
    state.stock.is_empty() && state.waste.is_empty()
}

pub fn all_tableau_revealed(state: &TableState) -> bool {
    state.tableau.iter().flatten().all(|c| c.face_up)
}

pub fn foundation_slot(suit: Suit) -> usize {
    suit.foundation_slot()
}

pub fn is_won(state: &TableState) -> bool {
    state.foundations.iter().all(|f| f.len() == Rank::ALL.len())
}

/// Decide a proposed move against `state` and return the actions that
/// perform it, in canonical card order.
pub fn check_move(
    state: &TableState,
    mv: &ProposedMove,
    draw: DrawCount,
) -> Result<Vec<Action>, Rejection> {
    if mv.cards.is_empty() {
        return Err(Rejection::Malformed("move names no cards"));
    }
    let mut seen = mv.cards.clone();
    seen.sort();
    seen.dedup();
    if seen.len() != mv.cards.len() {
        return Err(Rejection::Malformed("move names a card twice"));
    }

    let route = Rejection::IllegalRoute {
        source: mv.source,
        target: mv.target,
    };
    if !mv.source.is_valid() || !mv.target.is_valid() || mv.source == mv.target {
        return Err(route);
    }

    match (mv.source, mv.target) {
        (PileId::Stock, PileId::Waste) => check_draw(state, &mv.cards, draw),
        (PileId::Waste, PileId::Stock) => check_recycle(state, &mv.cards),
        (PileId::Waste | PileId::Tableau(_) | PileId::Foundation(_), PileId::Tableau(_)) => {
            check_onto_tableau(state, mv)
        }
        (PileId::Waste | PileId::Tableau(_), PileId::Foundation(slot)) => {
            check_onto_foundation(state, mv, slot)
        }
        _ => Err(route),
    }
}

/// The named cards must be exactly the top `named.len()` cards of `pile`.
fn named_suffix<'a>(
    pile: &'a [Card],
    named: &[CardId],
    source: PileId,
) -> Result<&'a [Card], Rejection> {
    if let Some(card) = named
        .iter()
        .find(|id| !pile.iter().any(|c| c.id() == **id))
    {
        return Err(Rejection::CardNotInSource {
            card: *card,
            source,
        });
    }
    let suffix = &pile[pile.len() - named.len()..];
    if suffix.iter().all(|c| named.contains(&c.id())) {
        Ok(suffix)
    } else {
        Err(Rejection::Illegal {
            rule: Rule::TopCards,
            reason: "cards must come from the top of the source pile",
        })
    }
}

fn ids(cards: &[Card]) -> Vec<CardId> {
    cards.iter().map(Card::id).collect()
}

fn check_onto_tableau(state: &TableState, mv: &ProposedMove) -> Result<Vec<Action>, Rejection> {
    if !mv.source.is_tableau() && mv.cards.len() != 1 {
        return Err(Rejection::Illegal {
            rule: Rule::SingleCard,
            reason: "only one card may leave the waste or a foundation",
        });
    }
    let candidate = named_suffix(state.pile(mv.source), &mv.cards, mv.source)?;
    let target = state.pile(mv.target);

    is_movable_run(candidate).require(Rule::MovableRun)?;
    different_color(candidate, target).require(Rule::DifferentColor)?;
    is_descending_rank_onto_tableau(candidate, target).require(Rule::DescendingRank)?;

    Ok(vec![Action::MoveCards {
        cards: ids(candidate),
        source: mv.source,
        target: mv.target,
    }])
}

fn check_onto_foundation(
    state: &TableState,
    mv: &ProposedMove,
    slot: usize,
) -> Result<Vec<Action>, Rejection> {
    if mv.cards.len() != 1 {
        return Err(Rejection::Illegal {
            rule: Rule::SingleCard,
            reason: "foundations take one card at a time",
        });
    }
    let candidate = named_suffix(state.pile(mv.source), &mv.cards, mv.source)?;

    is_movable_run(candidate).require(Rule::MovableRun)?;
    is_ascending_rank_onto_foundation(candidate, &state.foundations[slot], slot)
        .require(Rule::AscendingFoundation)?;

    Ok(vec![Action::MoveCards {
        cards: ids(candidate),
        source: mv.source,
        target: mv.target,
    }])
}

/// Turn over the top `min(draw, len)` stock cards onto the waste. The
/// stock's top card is turned first, so it ends up deepest in the waste.
fn check_draw(
    state: &TableState,
    named: &[CardId],
    draw: DrawCount,
) -> Result<Vec<Action>, Rejection> {
    if state.stock.is_empty() {
        return Err(Rejection::Illegal {
            rule: Rule::StockDraw,
            reason: "stock is empty",
        });
    }
    let expected = draw.count().min(state.stock.len());
    if named.len() != expected {
        return Err(Rejection::Illegal {
            rule: Rule::StockDraw,
            reason: "must draw the configured number of cards",
        });
    }
    let drawn = named_suffix(&state.stock, named, PileId::Stock)?;
    let cards: Vec<CardId> = drawn.iter().rev().map(Card::id).collect();

    Ok(vec![
        Action::MoveCards {
            cards: cards.clone(),
            source: PileId::Stock,
            target: PileId::Waste,
        },
        Action::FlipCard {
            cards,
            pile: PileId::Waste,
            face_up: true,
        },
    ])
}

/// Return the whole waste to an empty stock, face down, so the next draw
/// turns the waste's bottom card first.
fn check_recycle(state: &TableState, named: &[CardId]) -> Result<Vec<Action>, Rejection> {
    if !state.stock.is_empty() {
        return Err(Rejection::Illegal {
            rule: Rule::WasteRecycle,
            reason: "stock still has cards",
        });
    }
    if named.len() != state.waste.len() {
        return Err(Rejection::Illegal {
            rule: Rule::WasteRecycle,
            reason: "the whole waste must be recycled",
        });
    }
    let recycled = named_suffix(&state.waste, named, PileId::Waste)?;
    let cards: Vec<CardId> = recycled.iter().rev().map(Card::id).collect();

    Ok(vec![
        Action::MoveCards {
            cards: cards.clone(),
            source: PileId::Waste,
            target: PileId::Stock,
        },
        Action::FlipCard {
            cards,
            pile: PileId::Stock,
            face_up: false,
        },
    ])
}

/// Plan the auto-finish: every tableau card onto its foundation in
/// ascending rank order, checking the foundation predicate at each step.
///
/// Requires an empty stock and waste and a fully revealed tableau.
pub fn auto_finish_plan(state: &TableState) -> Result<Vec<Action>, Rejection> {
    if !stock_and_waste_empty(state) {
        return Err(Rejection::Illegal {
            rule: Rule::AutoFinish,
            reason: "stock and waste must be empty",
        });
    }
    if !all_tableau_revealed(state) {
        return Err(Rejection::Illegal {
            rule: Rule::AutoFinish,
            reason: "all tableau cards must be face up",
        });
    }

    let mut pending: Vec<(usize, Card)> = state
        .tableau
        .iter()
        .enumerate()
        .flat_map(|(pile, cards)| cards.iter().map(move |c| (pile, *c)))
        .collect();
    pending.sort_by_key(|(_, card)| (card.rank, card.suit));

    let mut work = state.clone();
    let mut actions = Vec::with_capacity(pending.len());
    for (pile, card) in pending {
        if work.tableau[pile].last().map(Card::id) != Some(card.id()) {
            return Err(Rejection::Illegal {
                rule: Rule::AutoFinish,
                reason: "a tableau card is blocked",
            });
        }
        let slot = foundation_slot(card.suit);
        is_ascending_rank_onto_foundation(&[card], &work.foundations[slot], slot)
            .require(Rule::AscendingFoundation)?;

        work.tableau[pile].pop();
        work.foundations[slot].push(card);
        actions.push(Action::MoveCards {
            cards: vec![card.id()],
            source: PileId::Tableau(pile),
            target: PileId::Foundation(slot),
        });
    }

    Ok(actions)
}
