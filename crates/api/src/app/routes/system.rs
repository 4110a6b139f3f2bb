use axum::http::StatusCode;
use axum::response::IntoResponse;

pub async fn root() -> impl IntoResponse {
    "After School Lessons API is running"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
