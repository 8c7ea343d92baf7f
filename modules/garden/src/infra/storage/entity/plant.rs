use sea_orm::entity::prelude::*;

/// Species catalog row. `common_name` is the dedup key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub plant_id: Uuid,
    #[sea_orm(unique)]
    pub common_name: String,
    pub water_frequency: i32,
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
