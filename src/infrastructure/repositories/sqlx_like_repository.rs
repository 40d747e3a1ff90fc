use crate::domain::like::{
    entity::LikeRecord, errors::DomainError, repository::LikeRepository, value_objects::VisitorId,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxLikeRepository {
    pub pool: PgPool,
}

impl SqlxLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Driver error text may carry connection details; log it, surface a masked
/// message to callers.
fn store_error(err: sqlx::Error) -> DomainError {
    tracing::error!(store_error = %err, "like store query failed");
    DomainError::StoreUnavailable("Like store is unavailable".into())
}

#[async_trait]
impl LikeRepository for SqlxLikeRepository {
    async fn count_all(&self) -> Result<u64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM portfolio_likes")
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(count.max(0) as u64)
    }

    async fn exists_for(&self, visitor: &VisitorId) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM portfolio_likes WHERE visitor_id = $1)"#,
        )
        .bind(visitor.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn insert(&self, visitor: &VisitorId) -> Result<u64, DomainError> {
        let inserted = sqlx::query_as::<_, LikeRecord>(
            "INSERT INTO portfolio_likes (id, visitor_id) VALUES ($1, $2) \
             RETURNING id, visitor_id, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(visitor.as_str())
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(record) => {
                tracing::debug!(like_id = %record.id, "like record created");
                self.count_all().await
            }
            // Concurrent submissions from one visitor both pass the advisory
            // pre-check; the UNIQUE constraint arbitrates and the loser lands
            // here, mapped to the same outcome as the pre-check.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DomainError::AlreadyLiked)
            }
            Err(err) => Err(store_error(err)),
        }
    }
}
