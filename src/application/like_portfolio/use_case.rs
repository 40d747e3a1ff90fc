use crate::domain::like::{
    errors::DomainError, events::LikeFeedMessage, repository::LikeRepository,
    value_objects::VisitorId,
};
use std::sync::Arc;
use tokio::sync::broadcast;

pub struct LikeUseCase {
    repository: Arc<dyn LikeRepository>,
    broadcaster: Arc<broadcast::Sender<String>>,
}

impl LikeUseCase {
    pub fn new(
        repository: Arc<dyn LikeRepository>,
        broadcaster: Arc<broadcast::Sender<String>>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    pub async fn get_count(&self) -> Result<u64, DomainError> {
        self.repository.count_all().await
    }

    pub async fn check_liked(&self, visitor: &VisitorId) -> Result<bool, DomainError> {
        self.repository.exists_for(visitor).await
    }

    /// Records a like and fans the new count out to every feed subscriber.
    ///
    /// The `exists_for` pre-check is advisory: it gives the common duplicate
    /// case a fast answer without touching the table. The store's uniqueness
    /// constraint inside `insert` is what actually decides concurrent races.
    pub async fn submit_like(&self, visitor: &VisitorId) -> Result<u64, DomainError> {
        if self.repository.exists_for(visitor).await? {
            return Err(DomainError::AlreadyLiked);
        }

        let count = self.repository.insert(visitor).await?;

        let update = LikeFeedMessage::LikeUpdate { count };
        match serde_json::to_string(&update) {
            // Send only fails when no subscriber is connected.
            Ok(payload) => {
                let _ = self.broadcaster.send(payload);
            }
            Err(err) => tracing::error!(error = %err, "failed to encode like-update event"),
        }

        Ok(count)
    }
}
