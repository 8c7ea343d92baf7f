use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Garden entry not found: {entry_id}")]
    EntryNotFound { entry_id: Uuid },

    #[error("Plant {plant_id} is not in the garden")]
    PlantNotInGarden { plant_id: Uuid },

    #[error("Species not found: {plant_id}")]
    SpeciesNotFound { plant_id: Uuid },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Identity provider unavailable: {message}")]
    IdentityUnavailable { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    pub fn entry_not_found(entry_id: Uuid) -> Self {
        Self::EntryNotFound { entry_id }
    }

    pub fn plant_not_in_garden(plant_id: Uuid) -> Self {
        Self::PlantNotInGarden { plant_id }
    }

    pub fn species_not_found(plant_id: Uuid) -> Self {
        Self::SpeciesNotFound { plant_id }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn identity_unavailable(message: impl Into<String>) -> Self {
        Self::IdentityUnavailable {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
