//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction. The dedup paths are single `INSERT .. ON CONFLICT ..
//! RETURNING` statements and watering is an in-place `UPDATE .. RETURNING`,
//! so each concurrent caller observes the row exactly as its own statement
//! left it.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::contract::model::{GardenEntry, GardenPlant, Health, Species, User, VerifiedIdentity};
use crate::domain::repo::GardenRepository;
use crate::infra::storage::entity::{garden_entry, plant, user};
use crate::infra::storage::mapper;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmGardenRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmGardenRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> GardenRepository for SeaOrmGardenRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn upsert_user(
        &self,
        identity: &VerifiedIdentity,
        now: DateTime<Utc>,
    ) -> anyhow::Result<User> {
        let m = user::ActiveModel {
            user_id: Set(identity.subject_id.clone()),
            name: Set(identity.name.clone()),
            email: Set(identity.email.clone()),
            paid: Set(false),
            created_at: Set(now),
        };
        // paid and created_at stay as first written
        let row = user::Entity::insert(m)
            .on_conflict(
                OnConflict::column(user::Column::UserId)
                    .update_columns([user::Column::Name, user::Column::Email])
                    .to_owned(),
            )
            .exec_with_returning(&self.conn)
            .await
            .context("upsert_user failed")?;
        Ok(row.into())
    }

    async fn find_user(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        let found = user::Entity::find_by_id(user_id.to_string())
            .one(&self.conn)
            .await
            .context("find_user failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert_species_if_absent(&self, candidate: Species) -> anyhow::Result<Species> {
        let m = plant::ActiveModel {
            plant_id: Set(candidate.plant_id),
            common_name: Set(candidate.common_name),
            water_frequency: Set(candidate.water_frequency),
        };
        // No-op update so RETURNING yields the existing row on conflict
        let row = plant::Entity::insert(m)
            .on_conflict(
                OnConflict::column(plant::Column::CommonName)
                    .update_column(plant::Column::CommonName)
                    .to_owned(),
            )
            .exec_with_returning(&self.conn)
            .await
            .context("insert_species_if_absent failed")?;
        Ok(row.into())
    }

    async fn find_species(&self, plant_id: Uuid) -> anyhow::Result<Option<Species>> {
        let found = plant::Entity::find_by_id(plant_id)
            .one(&self.conn)
            .await
            .context("find_species failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert_entry(&self, entry: GardenEntry) -> anyhow::Result<()> {
        let m = garden_entry::ActiveModel {
            entry_id: Set(entry.entry_id),
            user_id: Set(entry.user_id),
            plant_id: Set(entry.plant_id),
            watered_count: Set(entry.watered_count),
            health: Set(entry.health.as_str().to_string()),
            added_at: Set(entry.added_at),
            last_watered_at: Set(entry.last_watered_at),
        };
        m.insert(&self.conn).await.context("insert_entry failed")?;
        Ok(())
    }

    async fn list_entries(&self, user_id: &str) -> anyhow::Result<Vec<GardenPlant>> {
        let rows = garden_entry::Entity::find()
            .find_also_related(plant::Entity)
            .filter(garden_entry::Column::UserId.eq(user_id))
            .order_by_asc(garden_entry::Column::AddedAt)
            .all(&self.conn)
            .await
            .context("list_entries failed")?;
        rows.into_iter()
            .map(|(entry, species)| mapper::garden_plant(entry, species))
            .collect()
    }

    async fn increment_watered(
        &self,
        user_id: &str,
        entry_id: Uuid,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<GardenEntry>> {
        let mut rows = garden_entry::Entity::update_many()
            .col_expr(
                garden_entry::Column::WateredCount,
                Expr::col(garden_entry::Column::WateredCount).add(1),
            )
            .col_expr(garden_entry::Column::LastWateredAt, Expr::value(now))
            .filter(garden_entry::Column::EntryId.eq(entry_id))
            .filter(garden_entry::Column::UserId.eq(user_id))
            .exec_with_returning(&self.conn)
            .await
            .context("increment_watered failed")?;

        // entry_id is the primary key, so at most one row comes back
        rows.pop().map(GardenEntry::try_from).transpose()
    }

    async fn set_health(&self, entry_id: Uuid, health: Health) -> anyhow::Result<()> {
        garden_entry::Entity::update_many()
            .col_expr(garden_entry::Column::Health, Expr::value(health.as_str()))
            .filter(garden_entry::Column::EntryId.eq(entry_id))
            .exec(&self.conn)
            .await
            .context("set_health failed")?;
        Ok(())
    }

    async fn delete_entry(&self, user_id: &str, entry_id: Uuid) -> anyhow::Result<bool> {
        let res = garden_entry::Entity::delete_many()
            .filter(garden_entry::Column::EntryId.eq(entry_id))
            .filter(garden_entry::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("delete_entry failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_entries_for_species(
        &self,
        user_id: &str,
        plant_id: Uuid,
    ) -> anyhow::Result<u64> {
        let res = garden_entry::Entity::delete_many()
            .filter(garden_entry::Column::PlantId.eq(plant_id))
            .filter(garden_entry::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("delete_entries_for_species failed")?;
        Ok(res.rows_affected)
    }
}
