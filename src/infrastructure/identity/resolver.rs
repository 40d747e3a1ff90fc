use crate::domain::like::{errors::DomainError, value_objects::VisitorId};
use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Derives the visitor identity from transport metadata.
///
/// Precedence: first `x-forwarded-for` entry, then `x-real-ip`, then the peer
/// socket address. A request that yields none of these is rejected with
/// [`DomainError::MissingIdentity`].
///
/// This is a best-effort one-vote-per-visitor heuristic; keeping it behind
/// this function means a cookie or token scheme can replace it without
/// touching the store or the REST layer.
pub fn resolve_visitor(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> Result<VisitorId, DomainError> {
    let from_headers = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string);

    from_headers
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .and_then(|value| VisitorId::new(value).ok())
        .ok_or(DomainError::MissingIdentity)
}
