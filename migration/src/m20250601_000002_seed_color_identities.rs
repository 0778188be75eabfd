use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Every commander color identity, single colors first, in WUBRG order.
#[rustfmt::skip]
const IDENTITIES: &[(&str, &str)] = &[
    // Single colors
    ("W", "White"), ("U", "Blue"), ("B", "Black"), ("R", "Red"), ("G", "Green"), ("C", "Colorless"),
    // Guilds
    ("WU", "Azorius"), ("UB", "Dimir"), ("BR", "Rakdos"), ("RG", "Gruul"), ("WG", "Selesnya"),
    ("WB", "Orzhov"), ("UR", "Izzet"), ("BG", "Golgari"), ("WR", "Boros"), ("UG", "Simic"),
    // Shards and wedges
    ("WUG", "Bant"), ("WUB", "Esper"), ("UBR", "Grixis"), ("BRG", "Jund"), ("WRG", "Naya"),
    ("WBG", "Abzan"), ("WUR", "Jeskai"), ("UBG", "Sultai"), ("WBR", "Mardu"), ("URG", "Temur"),
    // Four colors
    ("WUBR", "Yore-Tiller"), ("UBRG", "Glint-Eye"), ("WBRG", "Dune-Brood"),
    ("WURG", "Ink-Treader"), ("WUBG", "Witch-Maw"),
    ("WUBRG", "Five-Color"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(ColorIdentity::Table)
            .columns([ColorIdentity::Code, ColorIdentity::IdentityName]);

        for (code, name) in IDENTITIES {
            insert
                .values([(*code).into(), (*name).into()])
                .map_err(|e| DbErr::Custom(format!("Invalid seed row {code}: {e}")))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ColorIdentity::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ColorIdentity {
    Table,
    Code,
    IdentityName,
}
