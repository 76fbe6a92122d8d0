//! Rating entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// At most one rating per swap
    #[sea_orm(unique)]
    pub swap_request_id: i32,
    /// 1-5 stars
    pub score: i32,
    #[sea_orm(column_type = "Text")]
    pub feedback: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::swap_request::Entity",
        from = "Column::SwapRequestId",
        to = "super::swap_request::Column::Id",
        on_delete = "Cascade"
    )]
    SwapRequest,
}

impl Related<super::swap_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SwapRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
