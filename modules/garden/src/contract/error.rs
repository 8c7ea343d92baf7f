use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GardenError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Internal error")]
    Internal,
}

impl GardenError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for GardenError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            e @ (UserNotFound { .. }
            | EntryNotFound { .. }
            | PlantNotInGarden { .. }
            | SpeciesNotFound { .. }) => Self::not_found(e.to_string()),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            Authentication { message } => Self::unauthenticated(message),
            IdentityUnavailable { .. } | Database { .. } => Self::internal(),
        }
    }
}
