use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse, ValidationError};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.garden.local/{}", code))
        .with_code(code)
        .with_instance(instance);

    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::Validation { field, message } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "GARDEN_VALIDATION",
                "Validation error",
                message.clone(),
                instance,
            );
            ProblemResponse(problem.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{field}"),
            }]))
        }
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "GARDEN_USER_NOT_FOUND",
            "User not found",
            format!("{e}"),
            instance,
        ),
        DomainError::EntryNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "GARDEN_ENTRY_NOT_FOUND",
            "Garden entry not found",
            format!("{e}"),
            instance,
        ),
        DomainError::PlantNotInGarden { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "GARDEN_PLANT_NOT_FOUND",
            "Plant not found",
            "Plant not found in the garden",
            instance,
        ),
        DomainError::SpeciesNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "GARDEN_SPECIES_NOT_FOUND",
            "Species not found",
            format!("{e}"),
            instance,
        ),
        DomainError::Authentication { message } => from_parts(
            StatusCode::UNAUTHORIZED,
            "GARDEN_UNAUTHENTICATED",
            "Unauthenticated",
            message.clone(),
            instance,
        ),
        DomainError::IdentityUnavailable { .. } => {
            tracing::error!(error = ?e, "Identity provider unavailable");
            from_parts(
                StatusCode::SERVICE_UNAVAILABLE,
                "GARDEN_IDENTITY_UNAVAILABLE",
                "Identity provider unavailable",
                "The identity provider could not be reached",
                instance,
            )
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// 404 for a garden with no entries.
pub fn empty_garden(instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::NOT_FOUND,
        "GARDEN_EMPTY",
        "No plants found",
        "No plants found for the given user",
        instance,
    )
}

pub fn json_rejection(rejection: JsonRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "GARDEN_BAD_REQUEST",
        "Malformed request body",
        rejection.body_text(),
        instance,
    )
}

pub fn path_rejection(rejection: PathRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "GARDEN_BAD_REQUEST",
        "Invalid path parameter",
        rejection.body_text(),
        instance,
    )
}

pub fn query_rejection(rejection: QueryRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "GARDEN_BAD_REQUEST",
        "Invalid query string",
        rejection.body_text(),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn validation_maps_to_400_with_pointer() {
        let e = DomainError::validation("commonName", "Missing required field: commonName");
        let p = map_domain_error(&e, "/plants").0;
        assert_eq!(p.status, 400);
        assert_eq!(p.code, "GARDEN_VALIDATION");
        assert_eq!(p.instance, "/plants");
        let errors = p.errors.unwrap();
        assert_eq!(errors[0].pointer, "/commonName");
    }

    #[test]
    fn not_found_variants_map_to_404_codes() {
        let id = Uuid::new_v4();
        let cases = [
            (DomainError::user_not_found("u1"), "GARDEN_USER_NOT_FOUND"),
            (DomainError::entry_not_found(id), "GARDEN_ENTRY_NOT_FOUND"),
            (DomainError::plant_not_in_garden(id), "GARDEN_PLANT_NOT_FOUND"),
            (DomainError::species_not_found(id), "GARDEN_SPECIES_NOT_FOUND"),
        ];
        for (e, code) in cases {
            let p = map_domain_error(&e, "/x").0;
            assert_eq!(p.status, 404, "{code}");
            assert_eq!(p.code, code);
        }
    }

    #[test]
    fn authentication_maps_to_401() {
        let p = map_domain_error(&DomainError::authentication("Invalid token"), "/login").0;
        assert_eq!(p.status, 401);
        assert_eq!(p.detail, "Invalid token");
    }

    #[test]
    fn database_error_detail_is_generic() {
        let e = DomainError::database("UNIQUE constraint failed: secret.table");
        let p = map_domain_error(&e, "/plants").0;
        assert_eq!(p.status, 500);
        assert_eq!(p.code, "INTERNAL_DB");
        assert!(!p.detail.contains("secret"));
    }

    #[test]
    fn identity_outage_maps_to_503() {
        let e = DomainError::identity_unavailable("connection refused");
        let p = map_domain_error(&e, "/login").0;
        assert_eq!(p.status, 503);
        assert!(!p.detail.contains("refused"));
    }
}
