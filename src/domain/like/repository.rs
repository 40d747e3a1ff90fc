use super::{errors::DomainError, value_objects::VisitorId};
use async_trait::async_trait;

/// Store contract for like records.
///
/// `insert` must rely on the store's own uniqueness guarantee: two concurrent
/// inserts for the same visitor may both pass an `exists_for` pre-check, and
/// exactly one of them is allowed to win.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn count_all(&self) -> Result<u64, DomainError>;

    async fn exists_for(&self, visitor: &VisitorId) -> Result<bool, DomainError>;

    /// Records a like and returns the new total. Fails with
    /// [`DomainError::AlreadyLiked`] when the visitor is already recorded,
    /// including the race where the duplicate only surfaces at insert time.
    async fn insert(&self, visitor: &VisitorId) -> Result<u64, DomainError>;
}
