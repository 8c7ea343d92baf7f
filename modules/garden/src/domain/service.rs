use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    GardenEntry, GardenPlant, NewGardenEntry, Species, User, VerifiedIdentity,
};
use crate::domain::error::DomainError;
use crate::domain::ports::IdentityVerifier;
use crate::domain::repo::GardenRepository;
use crate::domain::watering;

/// Domain service with the garden's business rules.
/// Depends only on the repository and identity ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn GardenRepository>,
    identity: Arc<dyn IdentityVerifier>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Watering target used when a species is registered without one.
    pub default_water_frequency: i32,
    pub max_water_frequency: i32,
    pub max_common_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_water_frequency: 2,
            max_water_frequency: 365,
            max_common_name_length: 100,
        }
    }
}

fn db_err(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn GardenRepository>,
        identity: Arc<dyn IdentityVerifier>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            identity,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // --- identity ---

    /// Verify a provider token and bootstrap the user it names.
    #[instrument(name = "garden.service.login", skip_all)]
    pub async fn login(&self, token: &str) -> Result<User, DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::validation("token", "Token is required"));
        }

        let identity = self.identity.verify(token).await?;
        debug!(subject_id = %identity.subject_id, "token verified");
        self.bootstrap_user(identity).await
    }

    #[instrument(
        name = "garden.service.bootstrap_user",
        skip(self, identity),
        fields(subject_id = %identity.subject_id)
    )]
    pub async fn bootstrap_user(&self, identity: VerifiedIdentity) -> Result<User, DomainError> {
        if identity.subject_id.trim().is_empty() {
            return Err(DomainError::validation(
                "subjectId",
                "subject identifier cannot be empty",
            ));
        }

        let user = self
            .repo
            .upsert_user(&identity, Utc::now())
            .await
            .map_err(db_err)?;

        info!("User authenticated");
        Ok(user)
    }

    #[instrument(name = "garden.service.get_user", skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<User, DomainError> {
        let user_id = required("userId", user_id)?;
        self.repo
            .find_user(user_id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    // --- species catalog ---

    #[instrument(name = "garden.service.register_species", skip(self))]
    pub async fn register_species(
        &self,
        common_name: &str,
        water_frequency: Option<i32>,
    ) -> Result<Species, DomainError> {
        let common_name = self.validate_common_name(common_name)?;
        let water_frequency = match water_frequency {
            Some(f) => self.validate_water_frequency(f)?,
            None => self.config.default_water_frequency,
        };

        let candidate = Species {
            plant_id: Uuid::new_v4(),
            common_name,
            water_frequency,
        };
        let candidate_id = candidate.plant_id;

        let species = self
            .repo
            .insert_species_if_absent(candidate)
            .await
            .map_err(db_err)?;

        if species.plant_id == candidate_id {
            info!(plant_id = %species.plant_id, "Registered new species");
        } else {
            debug!(
                plant_id = %species.plant_id,
                water_frequency = species.water_frequency,
                "Species already catalogued; keeping its watering target"
            );
        }
        Ok(species)
    }

    // --- garden registry ---

    #[instrument(
        name = "garden.service.add_to_garden",
        skip(self, new_entry),
        fields(user_id = %new_entry.user_id, common_name = %new_entry.common_name)
    )]
    pub async fn add_to_garden(&self, new_entry: NewGardenEntry) -> Result<GardenPlant, DomainError> {
        let user_id = required("userId", &new_entry.user_id)?;
        required("commonName", &new_entry.common_name)?;

        if self.repo.find_user(user_id).await.map_err(db_err)?.is_none() {
            return Err(DomainError::user_not_found(user_id));
        }

        let species = self
            .register_species(&new_entry.common_name, new_entry.water_frequency)
            .await?;

        let entry = GardenEntry {
            entry_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            plant_id: species.plant_id,
            watered_count: 0,
            health: watering::INITIAL_HEALTH,
            added_at: Utc::now(),
            last_watered_at: None,
        };

        self.repo
            .insert_entry(entry.clone())
            .await
            .map_err(db_err)?;

        info!(entry_id = %entry.entry_id, plant_id = %entry.plant_id, "Plant added to garden");
        Ok(GardenPlant::from_parts(entry, species))
    }

    #[instrument(name = "garden.service.list_garden", skip(self))]
    pub async fn list_garden(&self, user_id: &str) -> Result<Vec<GardenPlant>, DomainError> {
        let user_id = required("userId", user_id)?;
        let plants = self.repo.list_entries(user_id).await.map_err(db_err)?;
        debug!("Listed {} garden entries", plants.len());
        Ok(plants)
    }

    /// Remove exactly one of the user's entries.
    #[instrument(name = "garden.service.remove_entry", skip(self))]
    pub async fn remove_entry(&self, user_id: &str, entry_id: Uuid) -> Result<(), DomainError> {
        let user_id = required("userId", user_id)?;

        let deleted = self
            .repo
            .delete_entry(user_id, entry_id)
            .await
            .map_err(db_err)?;

        if !deleted {
            return Err(DomainError::entry_not_found(entry_id));
        }

        info!("Garden entry removed");
        Ok(())
    }

    /// Remove every entry of one species from the user's garden.
    /// Other users' entries and the catalog row are left alone.
    #[instrument(name = "garden.service.remove_species_from_garden", skip(self))]
    pub async fn remove_species_from_garden(
        &self,
        user_id: &str,
        plant_id: Uuid,
    ) -> Result<u64, DomainError> {
        let user_id = required("userId", user_id)?;

        let removed = self
            .repo
            .delete_entries_for_species(user_id, plant_id)
            .await
            .map_err(db_err)?;

        if removed == 0 {
            return Err(DomainError::plant_not_in_garden(plant_id));
        }

        info!(removed, "Species removed from garden");
        Ok(removed)
    }

    // --- watering state machine ---

    #[instrument(name = "garden.service.water", skip(self))]
    pub async fn water(&self, user_id: &str, entry_id: Uuid) -> Result<GardenPlant, DomainError> {
        let user_id = required("userId", user_id)?;

        let mut entry = self
            .repo
            .increment_watered(user_id, entry_id, Utc::now())
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::entry_not_found(entry_id))?;

        let species = self
            .repo
            .find_species(entry.plant_id)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::species_not_found(entry.plant_id))?;

        let health = watering::after_watering(entry.watered_count, species.water_frequency);
        if health != entry.health {
            self.repo
                .set_health(entry.entry_id, health)
                .await
                .map_err(db_err)?;
            entry.health = health;
        }

        info!(
            watered_count = entry.watered_count,
            health = %entry.health,
            "Plant watered"
        );
        Ok(GardenPlant::from_parts(entry, species))
    }

    // --- validation helpers ---

    fn validate_common_name(&self, common_name: &str) -> Result<String, DomainError> {
        let name = required("commonName", common_name)?;
        let len = name.chars().count();
        if len > self.config.max_common_name_length {
            return Err(DomainError::validation(
                "commonName",
                format!(
                    "too long: {} characters (max: {})",
                    len, self.config.max_common_name_length
                ),
            ));
        }
        Ok(name.to_string())
    }

    fn validate_water_frequency(&self, water_frequency: i32) -> Result<i32, DomainError> {
        if water_frequency < 1 || water_frequency > self.config.max_water_frequency {
            return Err(DomainError::validation(
                "waterFrequency",
                format!(
                    "must be between 1 and {} (got {})",
                    self.config.max_water_frequency, water_frequency
                ),
            ));
        }
        Ok(water_frequency)
    }
}

/// Trimmed value of a required field, or a validation error naming it.
fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            field,
            format!("Missing required field: {field}"),
        ));
    }
    Ok(trimmed)
}
