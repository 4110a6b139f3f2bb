use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use afterschool_booking::BookingRequest;
use afterschool_core::DomainError;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(create_order).get(list_orders))
}

/// Book one seat on a lesson.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<BookingRequest>, JsonRejection>,
) -> axum::response::Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return errors::error_to_response(DomainError::validation(rejection.body_text()));
        }
    };

    match services.intake().place_order(&request).await {
        Ok(order) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "order created successfully",
                "orderId": order.id.to_string(),
                "order": dto::order_to_json(&order),
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.orders().list().await {
        Ok(orders) => {
            let items: Vec<_> = orders.iter().map(dto::order_to_json).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}
