use sea_orm_migration::prelude::*;

/// Creates the `color_identity` lookup table keyed by its short color code.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ColorIdentity {
    Table,
    Code,
    IdentityName,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ColorIdentity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ColorIdentity::Code)
                            .string_len(5)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ColorIdentity::IdentityName)
                            .string_len(20)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ColorIdentity::Table).to_owned())
            .await
    }
}
