use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{GardenEntry, GardenPlant, Health, Species, User, VerifiedIdentity};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Every mutation of a garden entry is scoped by the owning `user_id`.
#[async_trait]
pub trait GardenRepository: Send + Sync {
    /// Insert-if-absent on `user_id`; an existing row gets its name/email refreshed.
    /// Must be a single atomic statement.
    async fn upsert_user(
        &self,
        identity: &VerifiedIdentity,
        now: DateTime<Utc>,
    ) -> anyhow::Result<User>;

    async fn find_user(&self, user_id: &str) -> anyhow::Result<Option<User>>;

    /// Insert-if-absent on `common_name`. Returns the stored row, which is the
    /// candidate only if no species with that name existed.
    async fn insert_species_if_absent(&self, candidate: Species) -> anyhow::Result<Species>;

    async fn find_species(&self, plant_id: Uuid) -> anyhow::Result<Option<Species>>;

    async fn insert_entry(&self, entry: GardenEntry) -> anyhow::Result<()>;

    /// Entries of a user joined with their species, oldest first.
    async fn list_entries(&self, user_id: &str) -> anyhow::Result<Vec<GardenPlant>>;

    /// Atomically bump `watered_count` and stamp `last_watered_at`.
    /// Returns the updated entry, or `None` if the user owns no such entry.
    async fn increment_watered(
        &self,
        user_id: &str,
        entry_id: Uuid,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<GardenEntry>>;

    async fn set_health(&self, entry_id: Uuid, health: Health) -> anyhow::Result<()>;

    /// Returns true if a row was deleted.
    async fn delete_entry(&self, user_id: &str, entry_id: Uuid) -> anyhow::Result<bool>;

    /// Returns the number of the user's entries removed.
    async fn delete_entries_for_species(&self, user_id: &str, plant_id: Uuid)
        -> anyhow::Result<u64>;
}
