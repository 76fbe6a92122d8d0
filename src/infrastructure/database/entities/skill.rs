//! Skill entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Skill model. `name` is lowercase and unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_skill_offered::Entity")]
    OfferedBy,
    #[sea_orm(has_many = "super::user_skill_wanted::Entity")]
    WantedBy,
}

impl ActiveModelBehavior for ActiveModel {}
