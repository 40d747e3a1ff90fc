use axum::{Json, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Liveness probe. Deliberately independent of the like store: the process
/// being up is a different question from the store being reachable.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        message: "Portfolio API is running",
    })
}
