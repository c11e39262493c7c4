use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "owner_sub")]
    pub owner_sub: String,
    pub variant: String,
    pub color: String,
    #[sea_orm(column_name = "draw_count", column_type = "SmallInteger")]
    pub draw_count: i16,
    /// u64 seed stored bit-for-bit
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: i64,
    /// Pile document as JSON text
    #[sea_orm(column_type = "Text")]
    pub state: String,
    pub active: bool,
    pub won: bool,
    #[sea_orm(column_name = "move_count")]
    pub move_count: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_moves::Entity")]
    GameMoves,
}

impl Related<super::game_moves::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameMoves.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
