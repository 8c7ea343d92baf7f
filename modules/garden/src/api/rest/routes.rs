use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};

use crate::api::rest::{handlers, openapi};
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/login", post(handlers::login))
        .route("/users/{user_id}", get(handlers::get_user))
        .route(
            "/plants",
            post(handlers::add_plant).get(handlers::list_plants),
        )
        .route("/plants/water", put(handlers::water_plant))
        .route("/plants/{plant_id}", delete(handlers::remove_species))
        .route("/garden/{entry_id}", delete(handlers::remove_entry))
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .layer(Extension(service))
}
