use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deck")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub deck_name: String,
    pub color_identity_code: String,
    pub owner_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::color_identity::Entity",
        from = "Column::ColorIdentityCode",
        to = "super::color_identity::Column::Code"
    )]
    ColorIdentity,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::OwnerId",
        to = "super::player::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::deck_color::Entity")]
    DeckColors,
    #[sea_orm(has_many = "super::game_result::Entity")]
    GameResults,
}

impl Related<super::color_identity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ColorIdentity.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::deck_color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeckColors.def()
    }
}

impl Related<super::game_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
