use crate::application::like_portfolio::dto::{
    LikeCountResponse, LikeStatusResponse, SubmitLikeResponse,
};
use crate::presentation::http::{errors::AppError, extractors::Visitor, state::AppState};
use axum::{Json, extract::State};

pub async fn get_likes(State(state): State<AppState>) -> Result<Json<LikeCountResponse>, AppError> {
    let count = state.likes.get_count().await?;
    Ok(Json(LikeCountResponse {
        success: true,
        count,
    }))
}

pub async fn check_liked(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
) -> Result<Json<LikeStatusResponse>, AppError> {
    let has_liked = state.likes.check_liked(&visitor).await?;
    Ok(Json(LikeStatusResponse {
        success: true,
        has_liked,
    }))
}

pub async fn submit_like(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
) -> Result<Json<SubmitLikeResponse>, AppError> {
    let count = state.likes.submit_like(&visitor).await?;
    tracing::info!(visitor = visitor.as_str(), count, "like recorded");
    Ok(Json(SubmitLikeResponse {
        success: true,
        message: "Thanks for the like!".into(),
        count,
    }))
}
