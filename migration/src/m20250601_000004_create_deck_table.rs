use sea_orm_migration::prelude::*;

/// Creates the `deck` table. Decks are removed together with their owner.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Deck {
    Table,
    Id,
    DeckName,
    ColorIdentityCode,
    OwnerId,
}

#[derive(DeriveIden)]
enum ColorIdentity {
    Table,
    Code,
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deck::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deck::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deck::DeckName)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Deck::ColorIdentityCode)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Deck::OwnerId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deck_color_identity_code")
                            .from(Deck::Table, Deck::ColorIdentityCode)
                            .to(ColorIdentity::Table, ColorIdentity::Code)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deck_owner_id")
                            .from(Deck::Table, Deck::OwnerId)
                            .to(Player::Table, Player::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deck_owner_id")
                    .table(Deck::Table)
                    .col(Deck::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deck::Table).to_owned())
            .await
    }
}
