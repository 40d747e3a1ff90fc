use super::state::LikeError;
use crate::application::like_portfolio::dto::{
    LikeCountResponse, LikeStatusResponse, SubmitLikeResponse,
};
use reqwest::StatusCode;
use std::time::Duration;

/// REST access to the like endpoints. This is the authoritative path; the
/// feed only hints at when to expect a new value. Every call is bounded by
/// the configured request timeout.
pub struct LikeApi {
    http: reqwest::Client,
    base_url: String,
}

impl LikeApi {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, LikeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|_| LikeError::Unknown)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_count(&self) -> Result<u64, LikeError> {
        let res = self
            .http
            .get(format!("{}/api/likes", self.base_url))
            .send()
            .await
            .map_err(transport_error)?;
        let body: LikeCountResponse = classify(res)?.json().await.map_err(|_| LikeError::Unknown)?;
        Ok(body.count)
    }

    pub async fn check_liked(&self) -> Result<bool, LikeError> {
        let res = self
            .http
            .get(format!("{}/api/likes/check", self.base_url))
            .send()
            .await
            .map_err(transport_error)?;
        let body: LikeStatusResponse =
            classify(res)?.json().await.map_err(|_| LikeError::Unknown)?;
        Ok(body.has_liked)
    }

    pub async fn submit_like(&self) -> Result<u64, LikeError> {
        let res = self
            .http
            .post(format!("{}/api/likes", self.base_url))
            .send()
            .await
            .map_err(transport_error)?;
        let body: SubmitLikeResponse =
            classify(res)?.json().await.map_err(|_| LikeError::Unknown)?;
        Ok(body.count)
    }
}

fn classify(res: reqwest::Response) -> Result<reqwest::Response, LikeError> {
    match res.status() {
        status if status.is_success() => Ok(res),
        StatusCode::BAD_REQUEST => Err(LikeError::AlreadyLiked),
        status if status.is_server_error() => Err(LikeError::StoreUnavailable),
        _ => Err(LikeError::Unknown),
    }
}

fn transport_error(err: reqwest::Error) -> LikeError {
    if err.is_timeout() || err.is_connect() {
        LikeError::NetworkUnavailable
    } else {
        LikeError::Unknown
    }
}
