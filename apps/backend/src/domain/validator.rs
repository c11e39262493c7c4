//! Server-side move authority.
//!
//! Re-derives legality from the stored state with the shared rule
//! predicates and applies accepted moves through the reducer.

use super::moves::{DrawCount, ProposedMove, Rejection, Rule};
use super::reducer::{reduce_all, Action};
use super::rules;
use super::table::TableState;

/// An accepted move: the resulting state plus the actions that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub state: TableState,
    pub actions: Vec<Action>,
}

/// Decide `proposed` against `state`. The input is never modified; the
/// same illegal move yields the same rejection every time.
pub fn validate(
    state: &TableState,
    proposed: &ProposedMove,
    draw: DrawCount,
) -> Result<Validated, Rejection> {
    let actions = rules::check_move(state, proposed, draw)?;
    apply(state, actions)
}

/// Decide an auto-finish request against `state`.
pub fn validate_auto_finish(state: &TableState) -> Result<Validated, Rejection> {
    let actions = rules::auto_finish_plan(state)?;
    apply(state, actions)
}

fn apply(state: &TableState, actions: Vec<Action>) -> Result<Validated, Rejection> {
    // check_move has already matched every card against its pile, so a
    // reducer failure here means the plan and the state disagree.
    let next = reduce_all(state, &actions).map_err(|_| Rejection::Illegal {
        rule: Rule::TopCards,
        reason: "move could not be applied to the current table",
    })?;
    debug_assert!(next.check_invariants().is_ok() || state.check_invariants().is_err());
    Ok(Validated {
        state: next,
        actions,
    })
}
