use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::GardenError,
    model::{GardenPlant, NewGardenEntry, Species, User, VerifiedIdentity},
};

/// Public API trait for the garden module that other modules can use
#[async_trait]
pub trait GardenApi: Send + Sync {
    /// Return the user for an already-verified identity, creating it on first sight
    async fn bootstrap_user(&self, identity: VerifiedIdentity) -> Result<User, GardenError>;

    /// Get a user by id
    async fn get_user(&self, user_id: &str) -> Result<User, GardenError>;

    /// Register a species, or resolve the existing one with the same common name
    async fn register_species(
        &self,
        common_name: &str,
        water_frequency: Option<i32>,
    ) -> Result<Species, GardenError>;

    /// Add a species instance to a user's garden
    async fn add_to_garden(&self, new_entry: NewGardenEntry) -> Result<GardenPlant, GardenError>;

    /// All entries of a user's garden joined with their species
    async fn list_garden(&self, user_id: &str) -> Result<Vec<GardenPlant>, GardenError>;

    /// Water one of the user's entries
    async fn water(&self, user_id: &str, entry_id: Uuid) -> Result<GardenPlant, GardenError>;

    /// Remove one of the user's entries
    async fn remove_entry(&self, user_id: &str, entry_id: Uuid) -> Result<(), GardenError>;

    /// Remove every entry of a species from the user's garden; returns how many were removed
    async fn remove_species_from_garden(
        &self,
        user_id: &str,
        plant_id: Uuid,
    ) -> Result<u64, GardenError>;
}
