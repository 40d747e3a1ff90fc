use crate::domain::like::value_objects::VisitorId;
use crate::infrastructure::identity::resolver::resolve_visitor;
use crate::presentation::http::errors::AppError;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::net::SocketAddr;

/// Extracts the visitor identity for the current request.
///
/// Rejects with a 400 when neither the forwarded headers nor the peer address
/// yield an identity.
pub struct Visitor(pub VisitorId);

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let visitor = resolve_visitor(&parts.headers, peer)?;
        Ok(Visitor(visitor))
    }
}
