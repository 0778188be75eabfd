use sea_orm_migration::prelude::*;

/// Creates the `game_result` table: one player's finish within a session.
///
/// Results go away with their session. Players and decks that still have results
/// cannot be deleted; an eliminating player is cleared instead.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameResult {
    Table,
    Id,
    SessionId,
    PlayerId,
    DeckId,
    Finish,
    EliminatedById,
}

#[derive(DeriveIden)]
enum GameSession {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Deck {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameResult::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameResult::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameResult::SessionId).integer().not_null())
                    .col(ColumnDef::new(GameResult::PlayerId).integer().not_null())
                    .col(ColumnDef::new(GameResult::DeckId).integer().not_null())
                    .col(ColumnDef::new(GameResult::Finish).integer().not_null())
                    .col(ColumnDef::new(GameResult::EliminatedById).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_result_session_id")
                            .from(GameResult::Table, GameResult::SessionId)
                            .to(GameSession::Table, GameSession::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_result_player_id")
                            .from(GameResult::Table, GameResult::PlayerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_result_deck_id")
                            .from(GameResult::Table, GameResult::DeckId)
                            .to(Deck::Table, Deck::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_result_eliminated_by_id")
                            .from(GameResult::Table, GameResult::EliminatedById)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_game_result_session_id", GameResult::SessionId),
            ("idx_game_result_player_id", GameResult::PlayerId),
            ("idx_game_result_deck_id", GameResult::DeckId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(GameResult::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameResult::Table).to_owned())
            .await
    }
}
