//! Game repository functions for the service layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::domain::{DrawCount, TableState};
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// A stored game with its table decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub owner_sub: String,
    pub variant: String,
    pub color: String,
    pub draw: DrawCount,
    pub rng_seed: u64,
    pub table: TableState,
    pub active: bool,
    pub won: bool,
    pub move_count: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub lock_version: i32,
}

impl Game {
    pub fn cards_remaining(&self) -> usize {
        self.table.cards_remaining()
    }
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let table: TableState = serde_json::from_str(&model.state).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {} has an unreadable table: {e}", model.id),
            )
        })?;

        Ok(Game {
            id: model.id,
            owner_sub: model.owner_sub,
            variant: model.variant,
            color: model.color,
            draw: DrawCount::from_count(model.draw_count),
            rng_seed: model.rng_seed as u64,
            table,
            active: model.active,
            won: model.won,
            move_count: model.move_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        })
    }
}

/// Fields a new game starts with.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub owner_sub: String,
    pub variant: String,
    pub color: String,
    pub draw: DrawCount,
    pub rng_seed: u64,
    pub table: TableState,
}

fn encode_table(table: &TableState) -> Result<String, DomainError> {
    serde_json::to_string(table).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Serialize".into()),
            format!("table could not be encoded: {e}"),
        )
    })
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    games_adapter::find_by_id(conn, game_id)
        .await?
        .map(Game::try_from)
        .transpose()
}

/// Load a game that must exist; a missing row is `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let model = games_adapter::require_game(conn, game_id).await?;
    Game::try_from(model)
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, DomainError> {
    Ok(games_adapter::exists(conn, game_id).await?)
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new_game: NewGame,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameCreate::new(
        new_game.owner_sub,
        encode_table(&new_game.table)?,
        new_game.rng_seed as i64,
    )
    .with_variant(new_game.variant)
    .with_color(new_game.color)
    .with_draw_count(new_game.draw.count() as i16);

    let model = games_adapter::create_game(conn, dto).await?;
    Game::try_from(model)
}

/// Persist a new table for `game`, guarded by `game.lock_version`.
///
/// `won` and `active` follow the table; `reseed` replaces the stored seed.
pub async fn save_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    table: &TableState,
    move_count: i32,
    reseed: Option<u64>,
) -> Result<Game, DomainError> {
    let mut dto = games_adapter::GameTableUpdate::new(game.id, game.lock_version, encode_table(table)?)
        .with_move_count(move_count)
        .with_won(crate::domain::is_won(table));
    if let Some(seed) = reseed {
        dto = dto.with_rng_seed(seed as i64);
    }

    let model = games_adapter::update_table(conn, dto).await?;
    Game::try_from(model)
}
