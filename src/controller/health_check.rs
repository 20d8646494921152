use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use crate::controller::AppState;
use crate::repositories::places_gateway::PlacesGateway;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route_layer(Extension(app_state.gateway))
}

/// Liveness plus whether the places credential is present
async fn get_health_check(
    Extension(gateway): Extension<Arc<PlacesGateway>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "places_api_configured": gateway.is_configured(),
        })),
    )
}
