use crate::{application::like_portfolio::use_case::LikeUseCase, config::Config};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Owned service handles, built once in `main` and injected into handlers.
/// Nothing here is ambient or module-global.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub likes: Arc<LikeUseCase>,
    pub ws_broadcaster: Arc<broadcast::Sender<String>>,
}
