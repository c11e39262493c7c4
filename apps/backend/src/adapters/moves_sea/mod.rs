//! SeaORM adapter for the game_moves log.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::game_moves;

pub mod dto;

pub use dto::MoveCreate;

pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MoveCreate,
) -> Result<game_moves::Model, sea_orm::DbErr> {
    let active = game_moves::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        user_sub: Set(dto.user_sub),
        cards: Set(dto.cards),
        src: Set(dto.src),
        dst: Set(dto.dst),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

/// Moves for a game, oldest first.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_moves::Model>, sea_orm::DbErr> {
    game_moves::Entity::find()
        .filter(game_moves::Column::GameId.eq(game_id))
        .order_by_asc(game_moves::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    game_moves::Entity::find()
        .filter(game_moves::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

/// Clear the log; used when a game is reset.
pub async fn delete_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_moves::Entity::delete_many()
        .filter(game_moves::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
