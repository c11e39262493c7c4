//! Optimistic client-side table.
//!
//! Holds the last authoritative table from the server and a predicted table
//! with locally accepted moves applied on top. Predictions go through the
//! same validator as the server, so a move the server would refuse is never
//! shown. The server response always wins on reconcile.

use super::cards_types::CardId;
use super::moves::{DrawCount, ProposedMove, Rejection};
use super::piles::{PileId, TABLEAU_COUNT};
use super::rules;
use super::table::TableState;
use super::validator::{self, Validated};

#[derive(Debug, Clone)]
pub struct PredictedTable {
    authoritative: TableState,
    predicted: TableState,
    pending: Vec<ProposedMove>,
    draw: DrawCount,
}

impl PredictedTable {
    pub fn new(authoritative: TableState, draw: DrawCount) -> Self {
        Self {
            predicted: authoritative.clone(),
            authoritative,
            pending: Vec::new(),
            draw,
        }
    }

    pub fn authoritative(&self) -> &TableState {
        &self.authoritative
    }

    /// What the player currently sees.
    pub fn predicted(&self) -> &TableState {
        &self.predicted
    }

    /// Moves applied locally but not yet confirmed.
    pub fn pending(&self) -> &[ProposedMove] {
        &self.pending
    }

    pub fn draw_count(&self) -> DrawCount {
        self.draw
    }

    /// Apply `mv` to the predicted table if the shared rules accept it.
    /// A rejected move leaves the prediction untouched.
    pub fn propose(&mut self, mv: ProposedMove) -> Result<&TableState, Rejection> {
        let Validated { state, .. } = validator::validate(&self.predicted, &mv, self.draw)?;
        self.predicted = state;
        self.pending.push(mv);
        Ok(&self.predicted)
    }

    /// Accept the server's table as truth. Returns `true` when the local
    /// prediction disagreed and had to be replaced.
    pub fn reconcile(&mut self, server: TableState) -> bool {
        let diverged = server != self.predicted;
        if diverged {
            tracing::debug!(pending = self.pending.len(), "prediction replaced by server table");
        }
        self.authoritative = server;
        self.predicted = self.authoritative.clone();
        self.pending.clear();
        diverged
    }

    /// Drop every unconfirmed move, e.g. after the server refused one.
    pub fn rollback(&mut self) {
        self.predicted = self.authoritative.clone();
        self.pending.clear();
    }

    /// Where a double-clicked card should go: its foundation if that is
    /// legal, otherwise the first tableau pile that accepts it.
    pub fn double_click_target(&self, card: CardId) -> Option<ProposedMove> {
        let (source, position) = self.predicted.locate(card)?;
        let pile = self.predicted.pile(source);
        if !matches!(source, PileId::Waste | PileId::Tableau(_)) || !pile[position].face_up {
            return None;
        }

        let to_foundation = ProposedMove::new(
            vec![card],
            source,
            PileId::Foundation(rules::foundation_slot(card.suit)),
        );
        if validator::validate(&self.predicted, &to_foundation, self.draw).is_ok() {
            return Some(to_foundation);
        }

        let run: Vec<CardId> = pile[position..].iter().map(|c| c.id()).collect();
        (0..TABLEAU_COUNT)
            .map(PileId::Tableau)
            .filter(|target| *target != source)
            .map(|target| ProposedMove::new(run.clone(), source, target))
            .find(|mv| validator::validate(&self.predicted, mv, self.draw).is_ok())
    }
}
