use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Single-color tag attached to a deck, independent of its commander identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deck_color")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub deck_id: i32,
    pub color_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::deck::Entity",
        from = "Column::DeckId",
        to = "super::deck::Column::Id",
        on_delete = "Cascade"
    )]
    Deck,
    #[sea_orm(
        belongs_to = "super::color_identity::Entity",
        from = "Column::ColorId",
        to = "super::color_identity::Column::Code",
        on_delete = "Cascade"
    )]
    Color,
}

impl Related<super::deck::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deck.def()
    }
}

impl Related<super::color_identity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Color.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
