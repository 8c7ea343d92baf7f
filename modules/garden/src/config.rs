use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the garden module (`modules.garden`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GardenConfig {
    #[serde(default = "default_water_frequency")]
    pub default_water_frequency: i32,
    #[serde(default = "default_max_water_frequency")]
    pub max_water_frequency: i32,
    #[serde(default = "default_max_common_name_length")]
    pub max_common_name_length: usize,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            default_water_frequency: default_water_frequency(),
            max_water_frequency: default_max_water_frequency(),
            max_common_name_length: default_max_common_name_length(),
            identity: IdentityConfig::default(),
        }
    }
}

impl GardenConfig {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            default_water_frequency: self.default_water_frequency,
            max_water_frequency: self.max_water_frequency,
            max_common_name_length: self.max_common_name_length,
        }
    }
}

/// Identity provider settings used by `/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    #[serde(default = "default_tokeninfo_url")]
    pub tokeninfo_url: String,
    /// Expected `aud` claim. Audience is not checked when unset.
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            tokeninfo_url: default_tokeninfo_url(),
            client_id: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_water_frequency() -> i32 {
    2
}

fn default_max_water_frequency() -> i32 {
    365
}

fn default_max_common_name_length() -> usize {
    100
}

fn default_tokeninfo_url() -> String {
    "https://oauth2.googleapis.com/tokeninfo".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
