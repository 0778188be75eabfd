use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One player's outcome within one game session. `finish == 1` is a win.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_result")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub session_id: i32,
    #[sea_orm(indexed)]
    pub player_id: i32,
    #[sea_orm(indexed)]
    pub deck_id: i32,
    pub finish: i32,
    pub eliminated_by_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_session::Entity",
        from = "Column::SessionId",
        to = "super::game_session::Column::Id",
        on_delete = "Cascade"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
    #[sea_orm(
        belongs_to = "super::deck::Entity",
        from = "Column::DeckId",
        to = "super::deck::Column::Id"
    )]
    Deck,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::EliminatedById",
        to = "super::player::Column::Id",
        on_delete = "SetNull"
    )]
    EliminatedBy,
}

impl Related<super::game_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::deck::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
