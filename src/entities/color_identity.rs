use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "color_identity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub identity_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deck::Entity")]
    Decks,
    #[sea_orm(has_many = "super::deck_color::Entity")]
    DeckColors,
}

impl Related<super::deck::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Decks.def()
    }
}

impl Related<super::deck_color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeckColors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
