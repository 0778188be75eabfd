use sea_orm_migration::prelude::*;

/// Creates the `deck_color` association between decks and single-color tags.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum DeckColor {
    Table,
    Id,
    DeckId,
    ColorId,
}

#[derive(DeriveIden)]
enum Deck {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ColorIdentity {
    Table,
    Code,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeckColor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeckColor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeckColor::DeckId).integer().not_null())
                    .col(ColumnDef::new(DeckColor::ColorId).string_len(5).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deck_color_deck_id")
                            .from(DeckColor::Table, DeckColor::DeckId)
                            .to(Deck::Table, Deck::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deck_color_color_id")
                            .from(DeckColor::Table, DeckColor::ColorId)
                            .to(ColorIdentity::Table, ColorIdentity::Code)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A deck carries each color tag at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_deck_color_deck_id_color_id")
                    .table(DeckColor::Table)
                    .col(DeckColor::DeckId)
                    .col(DeckColor::ColorId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeckColor::Table).to_owned())
            .await
    }
}
