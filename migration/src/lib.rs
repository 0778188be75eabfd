pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_color_identity_table;
mod m20250601_000002_seed_color_identities;
mod m20250601_000003_create_player_table;
mod m20250601_000004_create_deck_table;
mod m20250601_000005_create_deck_color_table;
mod m20250601_000006_create_game_session_table;
mod m20250601_000007_create_game_result_table;
mod m20250601_000008_create_user_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_color_identity_table::Migration),
            Box::new(m20250601_000002_seed_color_identities::Migration),
            Box::new(m20250601_000003_create_player_table::Migration),
            Box::new(m20250601_000004_create_deck_table::Migration),
            Box::new(m20250601_000005_create_deck_color_table::Migration),
            Box::new(m20250601_000006_create_game_session_table::Migration),
            Box::new(m20250601_000007_create_game_result_table::Migration),
            Box::new(m20250601_000008_create_user_table::Migration),
        ]
    }
}
