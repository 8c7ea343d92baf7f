use utoipa::OpenApi;

use crate::api::rest::{dto, handlers, problem};

#[derive(OpenApi)]
#[openapi(
    info(title = "Garden API", description = "Personal garden and plant-watering tracker"),
    paths(
        handlers::login,
        handlers::get_user,
        handlers::add_plant,
        handlers::list_plants,
        handlers::remove_entry,
        handlers::remove_species,
        handlers::water_plant,
        handlers::health_check,
    ),
    components(schemas(
        dto::LoginReq,
        dto::LoginResp,
        dto::UserDto,
        dto::AddPlantReq,
        dto::AddPlantResp,
        dto::HealthDto,
        dto::GardenPlantDto,
        dto::GardenListResp,
        dto::MessageResp,
        dto::RemoveSpeciesResp,
        dto::WaterReq,
        dto::WaterResp,
        dto::HealthCheckResp,
        problem::Problem,
        problem::ValidationError,
    )),
    tags(
        (name = "auth", description = "Identity bootstrap"),
        (name = "garden", description = "Garden entries and watering"),
        (name = "users", description = "Garden owners"),
        (name = "system", description = "Probes and metadata"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
