use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::GardenApi,
    error::GardenError,
    model::{GardenPlant, NewGardenEntry, Species, User, VerifiedIdentity},
};
use crate::domain::service::Service;

/// Local implementation of the GardenApi trait that delegates to the domain service
pub struct GardenLocalClient {
    service: Arc<Service>,
}

impl GardenLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl GardenApi for GardenLocalClient {
    async fn bootstrap_user(&self, identity: VerifiedIdentity) -> Result<User, GardenError> {
        self.service
            .bootstrap_user(identity)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, GardenError> {
        self.service.get_user(user_id).await.map_err(Into::into)
    }

    async fn register_species(
        &self,
        common_name: &str,
        water_frequency: Option<i32>,
    ) -> Result<Species, GardenError> {
        self.service
            .register_species(common_name, water_frequency)
            .await
            .map_err(Into::into)
    }

    async fn add_to_garden(&self, new_entry: NewGardenEntry) -> Result<GardenPlant, GardenError> {
        self.service
            .add_to_garden(new_entry)
            .await
            .map_err(Into::into)
    }

    async fn list_garden(&self, user_id: &str) -> Result<Vec<GardenPlant>, GardenError> {
        self.service.list_garden(user_id).await.map_err(Into::into)
    }

    async fn water(&self, user_id: &str, entry_id: Uuid) -> Result<GardenPlant, GardenError> {
        self.service
            .water(user_id, entry_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_entry(&self, user_id: &str, entry_id: Uuid) -> Result<(), GardenError> {
        self.service
            .remove_entry(user_id, entry_id)
            .await
            .map_err(Into::into)
    }

    async fn remove_species_from_garden(
        &self,
        user_id: &str,
        plant_id: Uuid,
    ) -> Result<u64, GardenError> {
        self.service
            .remove_species_from_garden(user_id, plant_id)
            .await
            .map_err(Into::into)
    }
}
