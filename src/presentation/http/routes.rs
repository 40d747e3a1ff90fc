use super::{
    handlers::{health, likes, ws},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{Router, middleware, routing::get};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness, independent of the store
        .route("/health", get(health::health_check))
        // Like counter
        .route("/api/likes", get(likes::get_likes).post(likes::submit_like))
        .route("/api/likes/check", get(likes::check_liked))
        // Real-time count feed
        .route("/ws/likes", get(ws::ws_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
