//! SeaORM adapter for the games table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::games;
use crate::infra::db_errors::{game_not_found_err, optimistic_lock_err};

pub mod dto;

pub use dto::{GameCreate, GameTableUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Like `find_by_id`, but a missing row is a `GAME_NOT_FOUND` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found_err(game_id))
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        owner_sub: Set(dto.owner_sub),
        variant: Set(dto.variant),
        color: Set(dto.color),
        draw_count: Set(dto.draw_count),
        rng_seed: Set(dto.rng_seed),
        state: Set(dto.state),
        active: Set(true),
        won: Set(false),
        move_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    };

    game_active.insert(conn).await
}

/// Write a new table with a compare-and-set on `lock_version`, then refetch.
///
/// Zero rows affected means either the game is gone (`GAME_NOT_FOUND`) or
/// another writer got there first (`OPTIMISTIC_LOCK`).
pub async fn update_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameTableUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = games::Entity::update_many()
        .col_expr(games::Column::State, Expr::value(dto.state))
        .col_expr(games::Column::MoveCount, Expr::value(dto.move_count))
        .col_expr(games::Column::Won, Expr::value(dto.won))
        .col_expr(games::Column::Active, Expr::value(!dto.won))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        );
    if let Some(seed) = dto.rng_seed {
        update = update.col_expr(games::Column::RngSeed, Expr::value(seed));
    }

    let result = update
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::LockVersion.eq(dto.expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, dto.id).await? {
            Some(game) => Err(optimistic_lock_err(dto.expected_version, game.lock_version)),
            None => Err(game_not_found_err(dto.id)),
        };
    }

    require_game(conn, dto.id).await
}
