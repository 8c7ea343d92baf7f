use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::garden_entry::Entity")]
    GardenEntry,
}

impl Related<super::garden_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GardenEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
