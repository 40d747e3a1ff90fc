use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DomainError {
    #[error("You have already liked this portfolio")]
    AlreadyLiked,
    #[error("Could not resolve a visitor identity")]
    MissingIdentity,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}
