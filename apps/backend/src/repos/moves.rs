//! Move-log repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::moves_sea as moves_adapter;
use crate::domain::{CardId, PileId, ProposedMove};
use crate::entities::game_moves;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// An accepted move as recorded in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct GameMove {
    pub id: i64,
    pub game_id: i64,
    pub user_sub: String,
    pub cards: Vec<CardId>,
    pub source: PileId,
    pub target: PileId,
    pub created_at: OffsetDateTime,
}

fn corrupt(id: i64, what: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("move {id} has an unreadable {what}: {e}"),
    )
}

impl TryFrom<game_moves::Model> for GameMove {
    type Error = DomainError;

    fn try_from(model: game_moves::Model) -> Result<Self, Self::Error> {
        let cards: Vec<CardId> =
            serde_json::from_str(&model.cards).map_err(|e| corrupt(model.id, "card list", e))?;
        let source: PileId = model.src.parse().map_err(|e| corrupt(model.id, "source", e))?;
        let target: PileId = model.dst.parse().map_err(|e| corrupt(model.id, "target", e))?;

        Ok(GameMove {
            id: model.id,
            game_id: model.game_id,
            user_sub: model.user_sub,
            cards,
            source,
            target,
            created_at: model.created_at,
        })
    }
}

pub async fn record_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    user_sub: &str,
    mv: &ProposedMove,
) -> Result<GameMove, DomainError> {
    let cards = serde_json::to_string(&mv.cards).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("card list could not be encoded: {e}"),
        )
    })?;

    let dto = moves_adapter::MoveCreate {
        game_id,
        user_sub: user_sub.to_string(),
        cards,
        src: mv.source.to_string(),
        dst: mv.target.to_string(),
    };
    let model = moves_adapter::create_move(conn, dto).await?;
    GameMove::try_from(model)
}

pub async fn list_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<GameMove>, DomainError> {
    moves_adapter::find_all_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(GameMove::try_from)
        .collect()
}

pub async fn count_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(moves_adapter::count_by_game(conn, game_id).await?)
}

pub async fn clear_for_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(moves_adapter::delete_by_game(conn, game_id).await?)
}
