use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_session")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub game_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub win_condition: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_result::Entity")]
    GameResults,
}

impl Related<super::game_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
