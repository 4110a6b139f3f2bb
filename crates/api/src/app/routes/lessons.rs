use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use afterschool_catalog::LessonPatch;
use afterschool_core::{DomainError, LessonId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_lessons))
        .route("/:id", put(update_lesson))
}

pub async fn list_lessons(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog().list().await {
        Ok(lessons) => {
            let items: Vec<_> = lessons.iter().map(dto::lesson_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}

/// Update any subset of a lesson's attributes.
pub async fn update_lesson(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<LessonPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: LessonId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            return errors::error_to_response(DomainError::validation(rejection.body_text()));
        }
    };
    if let Err(e) = patch.validate() {
        return errors::error_to_response(e);
    }

    match services.catalog().update_fields(id, &patch).await {
        Ok(outcome) if outcome.matched => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "matched": 1,
                "modified": u32::from(outcome.modified),
                "id": id.to_string(),
                "updated": patch,
            })),
        )
            .into_response(),
        Ok(_) => errors::error_to_response(DomainError::not_found()),
        Err(e) => errors::error_to_response(e),
    }
}
