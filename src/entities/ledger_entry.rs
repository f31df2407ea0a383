use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// One applied migration. `seq` orders entries; the greatest is the most
/// recent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "migrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i32,

    #[sea_orm(unique)]
    pub id: String,

    pub applied_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(id: &str) -> Self {
        Self {
            id: Set(id.to_string()),
            applied_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
