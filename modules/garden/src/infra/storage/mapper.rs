use anyhow::anyhow;

use crate::contract::model::{GardenEntry, GardenPlant, Health, Species, User};
use crate::infra::storage::entity::{garden_entry, plant, user};

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            user_id: m.user_id,
            name: m.name,
            email: m.email,
            paid: m.paid,
            created_at: m.created_at,
        }
    }
}

impl From<plant::Model> for Species {
    fn from(m: plant::Model) -> Self {
        Self {
            plant_id: m.plant_id,
            common_name: m.common_name,
            water_frequency: m.water_frequency,
        }
    }
}

impl TryFrom<garden_entry::Model> for GardenEntry {
    type Error = anyhow::Error;

    fn try_from(m: garden_entry::Model) -> Result<Self, Self::Error> {
        let health = m
            .health
            .parse::<Health>()
            .map_err(|e: String| anyhow!("garden entry {}: {e}", m.entry_id))?;
        Ok(Self {
            entry_id: m.entry_id,
            user_id: m.user_id,
            plant_id: m.plant_id,
            watered_count: m.watered_count,
            health,
            added_at: m.added_at,
            last_watered_at: m.last_watered_at,
        })
    }
}

/// Join a garden row with its species row.
pub fn garden_plant(
    entry: garden_entry::Model,
    species: Option<plant::Model>,
) -> anyhow::Result<GardenPlant> {
    let species = species
        .ok_or_else(|| anyhow!("garden entry {} has no species row", entry.entry_id))?;
    Ok(GardenPlant::from_parts(entry.try_into()?, species.into()))
}
