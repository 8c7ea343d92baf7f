use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{GardenPlant, Health, NewGardenEntry, User};

// Required request fields are `Option` so that their absence reaches domain
// validation and comes back as a GARDEN_VALIDATION problem.

/// `POST /login` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginReq {
    /// Identity provider ID token
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResp {
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

/// `POST /plants` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddPlantReq {
    pub user_id: Option<String>,
    pub common_name: Option<String>,
    /// Used only when the species is new; defaults from config when absent.
    pub water_frequency: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPlantResp {
    pub message: String,
    pub plant_id: Uuid,
    pub entry_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HealthDto {
    Poor,
    Good,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenPlantDto {
    pub entry_id: Uuid,
    pub plant_id: Uuid,
    pub user_id: String,
    pub common_name: String,
    pub water_frequency: i32,
    pub watered_count: i32,
    pub health: HealthDto,
    pub added_at: DateTime<Utc>,
    pub last_watered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GardenListResp {
    pub message: String,
    pub plants: Vec<GardenPlantDto>,
}

/// `?userId=` owner filter
#[derive(Debug, Clone, Deserialize, IntoParams, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Garden owner
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResp {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveSpeciesResp {
    pub message: String,
    /// Number of garden entries removed
    pub removed: u64,
}

/// `PUT /plants/water` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct WaterReq {
    pub user_id: Option<String>,
    pub entry_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WaterResp {
    pub message: String,
    pub plant: GardenPlantDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResp {
    pub status: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            paid: user.paid,
            created_at: user.created_at,
        }
    }
}

impl From<Health> for HealthDto {
    fn from(h: Health) -> Self {
        match h {
            Health::Poor => HealthDto::Poor,
            Health::Good => HealthDto::Good,
        }
    }
}

impl From<GardenPlant> for GardenPlantDto {
    fn from(p: GardenPlant) -> Self {
        Self {
            entry_id: p.entry_id,
            plant_id: p.plant_id,
            user_id: p.user_id,
            common_name: p.common_name,
            water_frequency: p.water_frequency,
            watered_count: p.watered_count,
            health: p.health.into(),
            added_at: p.added_at,
            last_watered_at: p.last_watered_at,
        }
    }
}

impl From<AddPlantReq> for NewGardenEntry {
    fn from(req: AddPlantReq) -> Self {
        Self {
            user_id: req.user_id.unwrap_or_default(),
            common_name: req.common_name.unwrap_or_default(),
            water_frequency: req.water_frequency,
        }
    }
}
