use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A garden owner, keyed by the identity provider's subject id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

/// Identity triple produced by a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject_id: String,
    pub name: String,
    pub email: String,
}

/// Catalog entry shared by every garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub plant_id: Uuid,
    pub common_name: String,
    /// Waterings expected per period; fixed by the first registration of the name.
    pub water_frequency: i32,
}

/// Derived health of a garden entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Health {
    Poor,
    Good,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Poor => "Poor",
            Health::Good => "Good",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Health {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Poor" => Ok(Health::Poor),
            "Good" => Ok(Health::Good),
            other => Err(format!("unknown health value '{other}'")),
        }
    }
}

/// One user's instance of a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenEntry {
    pub entry_id: Uuid,
    pub user_id: String,
    pub plant_id: Uuid,
    pub watered_count: i32,
    pub health: Health,
    pub added_at: DateTime<Utc>,
    pub last_watered_at: Option<DateTime<Utc>>,
}

/// A garden entry joined with its species, as shown to the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenPlant {
    pub entry_id: Uuid,
    pub user_id: String,
    pub plant_id: Uuid,
    pub common_name: String,
    pub water_frequency: i32,
    pub watered_count: i32,
    pub health: Health,
    pub added_at: DateTime<Utc>,
    pub last_watered_at: Option<DateTime<Utc>>,
}

impl GardenPlant {
    pub fn from_parts(entry: GardenEntry, species: Species) -> Self {
        Self {
            entry_id: entry.entry_id,
            user_id: entry.user_id,
            plant_id: entry.plant_id,
            common_name: species.common_name,
            water_frequency: species.water_frequency,
            watered_count: entry.watered_count,
            health: entry.health,
            added_at: entry.added_at,
            last_watered_at: entry.last_watered_at,
        }
    }
}

/// Request to put a species into a user's garden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGardenEntry {
    pub user_id: String,
    pub common_name: String,
    pub water_frequency: Option<i32>,
}
