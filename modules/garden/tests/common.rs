#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use sea_orm::{Database, DatabaseConnection};

use garden::api::rest::middleware::apply_layers;
use garden::config::GardenConfig;
use garden::contract::model::VerifiedIdentity;
use garden::domain::error::DomainError;
use garden::domain::ports::IdentityVerifier;
use garden::domain::service::Service;
use garden::Garden;

/// Accepts tokens of the form `valid:<subject>` and rejects everything else.
pub struct StaticVerifier;

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, DomainError> {
        match token.strip_prefix("valid:") {
            Some(sub) if !sub.is_empty() => Ok(VerifiedIdentity {
                subject_id: sub.to_string(),
                name: format!("Gardener {sub}"),
                email: format!("{sub}@example.com"),
            }),
            _ => Err(DomainError::authentication("Invalid token")),
        }
    }
}

/// Fresh in-memory SQLite database with migrations applied.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Garden::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn create_test_module() -> Garden {
    let db = create_test_db().await;
    Garden::with_verifier(db, &GardenConfig::default(), Arc::new(StaticVerifier))
}

pub async fn create_test_service() -> Arc<Service> {
    create_test_module().await.service()
}

/// Real routes behind the full middleware stack.
pub async fn create_test_router() -> Router {
    let module = create_test_module().await;
    apply_layers(
        module.router(),
        Some(Duration::from_secs(30)),
        &["http://localhost:5173".to_string()],
    )
}

pub fn identity(sub: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        subject_id: sub.to_string(),
        name: format!("Gardener {sub}"),
        email: format!("{sub}@example.com"),
    }
}
