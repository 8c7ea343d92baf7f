use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    AddPlantReq, AddPlantResp, GardenListResp, GardenPlantDto, HealthCheckResp, LoginReq,
    LoginResp, MessageResp, RemoveSpeciesResp, UserDto, UserQuery, WaterReq, WaterResp,
};
use crate::api::rest::error::{
    empty_garden, json_rejection, map_domain_error, path_rejection, query_rejection,
};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::service::Service;

/// Verify an identity token and bootstrap the user
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    operation_id = "garden.login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "User authenticated", body = LoginResp),
        (status = 400, description = "Missing token", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Invalid token", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "Identity provider unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<LoginReq>, JsonRejection>,
) -> Result<Json<LoginResp>, ProblemResponse> {
    let Json(req) = body.map_err(|e| json_rejection(e, uri.path()))?;

    match svc.login(req.token.as_deref().unwrap_or_default()).await {
        Ok(user) => Ok(Json(LoginResp {
            message: "User authenticated".to_string(),
            user: UserDto::from(user),
        })),
        Err(e) => {
            debug!("Login failed: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{userId}",
    tag = "users",
    operation_id = "garden.get_user",
    params(("userId" = String, Path, description = "User id issued by the identity provider")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserDto>, ProblemResponse> {
    let Path(user_id) = path.map_err(|e| path_rejection(e, uri.path()))?;
    info!("Getting user with id: {}", user_id);

    match svc.get_user(&user_id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            debug!("Failed to get user {}: {}", user_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Add a plant to a user's garden, registering the species if new
#[utoipa::path(
    post,
    path = "/plants",
    tag = "garden",
    operation_id = "garden.add_plant",
    request_body = AddPlantReq,
    responses(
        (status = 201, description = "Plant added", body = AddPlantResp),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Unknown user", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn add_plant(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<AddPlantReq>, JsonRejection>,
) -> Result<(StatusCode, Json<AddPlantResp>), ProblemResponse> {
    let Json(req) = body.map_err(|e| json_rejection(e, uri.path()))?;
    info!("Adding plant: {:?}", req);

    match svc.add_to_garden(req.into()).await {
        Ok(plant) => Ok((
            StatusCode::CREATED,
            Json(AddPlantResp {
                message: "Plant added successfully".to_string(),
                plant_id: plant.plant_id,
                entry_id: plant.entry_id,
            }),
        )),
        Err(e) => {
            debug!("Failed to add plant: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// List a user's garden
#[utoipa::path(
    get,
    path = "/plants",
    tag = "garden",
    operation_id = "garden.list_plants",
    params(UserQuery),
    responses(
        (status = 200, description = "Garden entries", body = GardenListResp),
        (status = 400, description = "Missing userId", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No plants found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_plants(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<GardenListResp>, ProblemResponse> {
    let Query(query) = query.map_err(|e| query_rejection(e, uri.path()))?;
    let user_id = query.user_id.unwrap_or_default();

    match svc.list_garden(&user_id).await {
        Ok(plants) if plants.is_empty() => Err(empty_garden(uri.path())),
        Ok(plants) => Ok(Json(GardenListResp {
            message: "Plants fetched successfully".to_string(),
            plants: plants.into_iter().map(GardenPlantDto::from).collect(),
        })),
        Err(e) => {
            debug!("Failed to list plants: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Remove one entry from a user's garden
#[utoipa::path(
    delete,
    path = "/garden/{entryId}",
    tag = "garden",
    operation_id = "garden.remove_entry",
    params(
        ("entryId" = Uuid, Path, description = "Garden entry id"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Entry removed", body = MessageResp),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn remove_entry(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<MessageResp>, ProblemResponse> {
    let Path(entry_id) = path.map_err(|e| path_rejection(e, uri.path()))?;
    let Query(query) = query.map_err(|e| query_rejection(e, uri.path()))?;
    let user_id = query.user_id.unwrap_or_default();

    match svc.remove_entry(&user_id, entry_id).await {
        Ok(()) => Ok(Json(MessageResp {
            message: "Plant deleted successfully".to_string(),
        })),
        Err(e) => {
            debug!("Failed to remove entry {}: {}", entry_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Remove every entry of a species from a user's garden
#[utoipa::path(
    delete,
    path = "/plants/{plantId}",
    tag = "garden",
    operation_id = "garden.remove_species",
    params(
        ("plantId" = Uuid, Path, description = "Species id"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Entries removed", body = RemoveSpeciesResp),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn remove_species(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<RemoveSpeciesResp>, ProblemResponse> {
    let Path(plant_id) = path.map_err(|e| path_rejection(e, uri.path()))?;
    let Query(query) = query.map_err(|e| query_rejection(e, uri.path()))?;
    let user_id = query.user_id.unwrap_or_default();

    match svc.remove_species_from_garden(&user_id, plant_id).await {
        Ok(removed) => Ok(Json(RemoveSpeciesResp {
            message: "Plant deleted successfully".to_string(),
            removed,
        })),
        Err(e) => {
            debug!("Failed to remove species {}: {}", plant_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Water one of the user's plants
#[utoipa::path(
    put,
    path = "/plants/water",
    tag = "garden",
    operation_id = "garden.water_plant",
    request_body = WaterReq,
    responses(
        (status = 200, description = "Plant watered", body = WaterResp),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn water_plant(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<WaterReq>, JsonRejection>,
) -> Result<Json<WaterResp>, ProblemResponse> {
    let Json(req) = body.map_err(|e| json_rejection(e, uri.path()))?;
    let Some(entry_id) = req.entry_id else {
        return Err(map_domain_error(
            &crate::domain::error::DomainError::validation(
                "entryId",
                "Missing required field: entryId",
            ),
            uri.path(),
        ));
    };
    let user_id = req.user_id.unwrap_or_default();

    match svc.water(&user_id, entry_id).await {
        Ok(plant) => Ok(Json(WaterResp {
            message: format!("Plant {} has been watered", plant.entry_id),
            plant: plant.into(),
        })),
        Err(e) => {
            debug!("Failed to water {}: {}", entry_id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    operation_id = "garden.health",
    responses((status = 200, description = "Service is up", body = HealthCheckResp))
)]
pub async fn health_check() -> Json<HealthCheckResp> {
    Json(HealthCheckResp {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::Database;
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::config::GardenConfig;
    use crate::contract::model::VerifiedIdentity;
    use crate::domain::error::DomainError;
    use crate::domain::ports::IdentityVerifier;
    use crate::Garden;

    struct RejectingVerifier;

    #[async_trait]
    impl IdentityVerifier for RejectingVerifier {
        async fn verify(&self, _token: &str) -> Result<VerifiedIdentity, DomainError> {
            Err(DomainError::authentication("Invalid token"))
        }
    }

    async fn router() -> axum::Router {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        Garden::migrate(&conn).await.unwrap();
        Garden::with_verifier(conn, &GardenConfig::default(), Arc::new(RejectingVerifier)).router()
    }

    #[tokio::test]
    #[traced_test]
    async fn client_errors_are_logged_below_error_level() {
        let app = router().await;

        let resp = app
            .clone()
            .oneshot(Request::get("/users/ghost").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app
            .oneshot(
                Request::post("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"token":"forged"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        assert!(logs_contain("Failed to get user ghost"));
        assert!(logs_contain("Login failed"));
        assert!(!logs_contain("ERROR"));
    }
}
