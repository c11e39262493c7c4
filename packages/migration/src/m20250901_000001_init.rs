use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Games {
    Table,
    Id,
    OwnerSub,
    Variant,
    Color,
    DrawCount,
    RngSeed,
    State,
    Active,
    Won,
    MoveCount,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum GameMoves {
    Table,
    Id,
    GameId,
    UserSub,
    Cards,
    Src,
    Dst,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games: one row per dealt table; `state` holds the pile document as JSON text
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::OwnerSub).string().not_null())
                    .col(ColumnDef::new(Games::Variant).string().not_null())
                    .col(ColumnDef::new(Games::Color).string().not_null())
                    .col(
                        ColumnDef::new(Games::DrawCount)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Games::RngSeed).big_integer().not_null())
                    .col(ColumnDef::new(Games::State).text().not_null())
                    .col(
                        ColumnDef::new(Games::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Games::Won)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::MoveCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_owner_sub")
                    .table(Games::Table)
                    .col(Games::OwnerSub)
                    .to_owned(),
            )
            .await?;

        // game_moves: append-only log of accepted moves
        manager
            .create_table(
                Table::create()
                    .table(GameMoves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameMoves::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameMoves::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GameMoves::UserSub).string().not_null())
                    .col(ColumnDef::new(GameMoves::Cards).text().not_null())
                    .col(ColumnDef::new(GameMoves::Src).string().not_null())
                    .col(ColumnDef::new(GameMoves::Dst).string().not_null())
                    .col(
                        ColumnDef::new(GameMoves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_moves_game_id")
                            .from(GameMoves::Table, GameMoves::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_moves_game_id")
                    .table(GameMoves::Table)
                    .col(GameMoves::GameId)
                    .col(GameMoves::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameMoves::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
