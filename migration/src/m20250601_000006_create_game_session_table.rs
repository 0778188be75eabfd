use sea_orm_migration::prelude::*;

/// Creates the `game_session` table: one real-world game.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameSession {
    Table,
    Id,
    GameDate,
    WinCondition,
    Comments,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSession::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameSession::GameDate).date().not_null())
                    .col(ColumnDef::new(GameSession::WinCondition).text().null())
                    .col(ColumnDef::new(GameSession::Comments).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameSession::Table).to_owned())
            .await
    }
}
