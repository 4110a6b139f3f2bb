use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use afterschool_core::DomainError;

/// Map a domain failure to its client-facing response.
///
/// Status codes are assigned here and nowhere else. Storage and unexpected
/// failures keep their detail in the operator log; the client only ever sees
/// a generic message.
pub fn error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(reason) => json_error(StatusCode::BAD_REQUEST, reason),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "lesson not found"),
        DomainError::CapacityExhausted => {
            json_error(StatusCode::BAD_REQUEST, "no spaces available")
        }
        DomainError::Storage(detail) => {
            tracing::error!(%detail, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
        DomainError::Unexpected(detail) => {
            tracing::error!(%detail, "unexpected failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}
