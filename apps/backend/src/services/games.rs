//! Game lifecycle: create, move, auto-finish, reset, read.
//!
//! Every mutation loads the stored table, re-validates with the shared rule
//! module, and writes back under the game's `lock_version`. Callers hold the
//! per-game lock from `GameLocks` around the transaction.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{
    deal_with_seed, fresh_seed, reduce, try_parse_card_ids, validate, validate_auto_finish,
    Action, DrawCount, PileId, ProposedMove, Rejection,
};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::games::{self, Game, NewGame};
use crate::repos::moves::{self, GameMove};

/// Options for a new game as the client sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub game: String,
    pub color: String,
    /// `"Draw 1"` or `"Draw 3"`; anything else draws one
    #[serde(default)]
    pub draw: String,
}

impl CreateGame {
    fn normalized(&self) -> Result<(String, String, DrawCount), DomainError> {
        let variant = self.game.trim().to_lowercase();
        let color = self.color.trim().to_lowercase();
        if variant.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidGameOptions,
                "Game variant is required",
            ));
        }
        if color.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidGameOptions,
                "Card color is required",
            ));
        }
        Ok((variant, color, DrawCount::from_label(&self.draw)))
    }
}

/// A card named in a move request: either a bare token or a pile entry.
/// The face-up flag a client sends is ignored; the stored table decides.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MoveCard {
    Token(String),
    Entry {
        id: String,
        #[serde(default, rename = "up")]
        _up: Option<bool>,
    },
}

impl MoveCard {
    fn token(&self) -> &str {
        match self {
            MoveCard::Token(token) => token,
            MoveCard::Entry { id, .. } => id,
        }
    }
}

/// A move as the client sends it, with boundary pile names.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub cards: Vec<MoveCard>,
    pub src: String,
    pub dst: String,
}

impl MoveRequest {
    /// Parse card tokens and pile names into a domain move.
    pub fn to_proposed(&self) -> Result<ProposedMove, DomainError> {
        let cards = try_parse_card_ids(self.cards.iter().map(MoveCard::token))?;
        let source: PileId = self.src.trim().parse()?;
        let target: PileId = self.dst.trim().parse()?;
        Ok(ProposedMove::new(cards, source, target))
    }
}

/// Result of a move submission. A rejection leaves the stored game untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Accepted { game: Game },
    Rejected(Rejection),
}

impl MoveOutcome {
    /// The accepted game, or the rejection as an error.
    pub fn into_result(self) -> Result<Game, AppError> {
        match self {
            MoveOutcome::Accepted { game } => Ok(game),
            MoveOutcome::Rejected(rejection) => Err(rejection.into()),
        }
    }
}

/// A game plus, when asked for, its move log.
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    pub game: Game,
    pub moves: Option<Vec<GameMove>>,
}

#[derive(Debug, Default)]
pub struct GameService;

/// Card movements among `actions`, in applied order, as move-log entries.
fn logged_moves(actions: &[Action]) -> Vec<ProposedMove> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::MoveCards {
                cards,
                source,
                target,
            } => Some(ProposedMove::new(cards.clone(), *source, *target)),
            _ => None,
        })
        .collect()
}

impl GameService {
    pub fn new() -> Self {
        Self
    }

    /// Deal a fresh table for `owner_sub` and store it.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        owner_sub: &str,
        options: &CreateGame,
    ) -> Result<Game, AppError> {
        let (variant, color, draw) = options.normalized()?;
        let seed = fresh_seed();

        let game = games::create_game(
            txn,
            NewGame {
                owner_sub: owner_sub.to_string(),
                variant,
                color,
                draw,
                rng_seed: seed,
                table: deal_with_seed(seed),
            },
        )
        .await?;

        info!(game_id = game.id, draw = draw.count(), "Game created");
        Ok(game)
    }

    /// Validate `request` against the stored table and persist it if legal.
    ///
    /// `expected_version` comes from `If-Match`; when present a stale value
    /// is an `OPTIMISTIC_LOCK` conflict before any rule is checked.
    pub async fn submit_move(
        &self,
        txn: &DatabaseTransaction,
        user_sub: &str,
        game_id: i64,
        request: &MoveRequest,
        expected_version: Option<i32>,
    ) -> Result<MoveOutcome, AppError> {
        let proposed = request.to_proposed()?;
        let game = load_for_write(txn, user_sub, game_id, expected_version).await?;

        let validated = match validate(&game.table, &proposed, game.draw) {
            Ok(validated) => validated,
            Err(rejection) => {
                debug!(game_id, %rejection, "Move rejected");
                return Ok(MoveOutcome::Rejected(rejection));
            }
        };

        let saved = games::save_table(txn, &game, &validated.state, game.move_count + 1, None)
            .await?;
        // log the cards in the order they were applied, not as sent
        let logged = logged_moves(&validated.actions)
            .into_iter()
            .next()
            .unwrap_or_else(|| proposed.clone());
        moves::record_move(txn, game_id, user_sub, &logged).await?;

        debug!(
            game_id,
            src = %logged.source,
            dst = %logged.target,
            cards = logged.cards.len(),
            version = saved.lock_version,
            "Move accepted"
        );
        if saved.won {
            info!(game_id, moves = saved.move_count, "Game won");
        }
        Ok(MoveOutcome::Accepted { game: saved })
    }

    /// Move every tableau card to the foundations in one step. Each card
    /// movement is logged as its own move.
    pub async fn auto_finish(
        &self,
        txn: &DatabaseTransaction,
        user_sub: &str,
        game_id: i64,
        expected_version: Option<i32>,
    ) -> Result<MoveOutcome, AppError> {
        let game = load_for_write(txn, user_sub, game_id, expected_version).await?;

        let validated = match validate_auto_finish(&game.table) {
            Ok(validated) => validated,
            Err(rejection) => {
                debug!(game_id, %rejection, "Auto-finish rejected");
                return Ok(MoveOutcome::Rejected(rejection));
            }
        };

        let logged = logged_moves(&validated.actions);

        let move_count = game.move_count + logged.len() as i32;
        let saved = games::save_table(txn, &game, &validated.state, move_count, None).await?;
        for mv in &logged {
            moves::record_move(txn, game_id, user_sub, mv).await?;
        }

        info!(game_id, moved = logged.len(), won = saved.won, "Auto-finish applied");
        Ok(MoveOutcome::Accepted { game: saved })
    }

    /// Redeal from a new seed, clear the move log and reopen the game.
    pub async fn reset(
        &self,
        txn: &DatabaseTransaction,
        user_sub: &str,
        game_id: i64,
        expected_version: Option<i32>,
    ) -> Result<Game, AppError> {
        let game = load_owned(txn, user_sub, game_id, expected_version).await?;

        let seed = fresh_seed();
        let table = reduce(&game.table, &Action::Reset { seed })?;
        let saved = games::save_table(txn, &game, &table, 0, Some(seed)).await?;
        let cleared = moves::clear_for_game(txn, game_id).await?;

        info!(game_id, cleared, "Game reset");
        Ok(saved)
    }

    /// Read a game; `include_moves` adds the move log, oldest first.
    pub async fn get_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        include_moves: bool,
    ) -> Result<GameView, AppError> {
        let game = games::require_game(conn, game_id).await?;
        let moves = if include_moves {
            Some(moves::list_for_game(conn, game_id).await?)
        } else {
            None
        };
        Ok(GameView { game, moves })
    }
}

/// Load a game the caller owns, honoring an optional expected version.
async fn load_owned(
    txn: &DatabaseTransaction,
    user_sub: &str,
    game_id: i64,
    expected_version: Option<i32>,
) -> Result<Game, AppError> {
    let game = games::require_game(txn, game_id).await?;

    if game.owner_sub != user_sub {
        security::foreign_game_access(user_sub, game_id);
        return Err(AppError::forbidden(
            ErrorCode::Forbidden,
            "Only the game's owner may change it",
        ));
    }

    if let Some(expected) = expected_version {
        if expected != game.lock_version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game was modified concurrently (expected version {expected}, actual version {}). Please refresh and retry.",
                    game.lock_version
                ),
            )
            .into());
        }
    }

    Ok(game)
}

/// `load_owned`, and the game must still be in play.
async fn load_for_write(
    txn: &DatabaseTransaction,
    user_sub: &str,
    game_id: i64,
    expected_version: Option<i32>,
) -> Result<Game, AppError> {
    let game = load_owned(txn, user_sub, game_id, expected_version).await?;
    if game.won || !game.active {
        return Err(DomainError::conflict(
            ConflictKind::GameFinished,
            format!("Game {game_id} is already finished"),
        )
        .into());
    }
    Ok(game)
}
