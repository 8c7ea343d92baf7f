use async_trait::async_trait;

use crate::contract::model::VerifiedIdentity;
use crate::domain::error::DomainError;

/// Transport-agnostic port to the external identity provider.
///
/// Implementations turn a bearer assertion into the verified
/// (subject, name, email) triple, or fail with
/// `DomainError::Authentication` when the assertion is rejected.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, DomainError>;
}
