use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use super::{Product, ProductDraft};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type SharedRepository = Arc<dyn ProductRepository>;

/// Product persistence.
///
/// Methods that target an id return `None`/`false` when no row matched. They
/// must be a single conditional write, never a lookup followed by a write, so
/// concurrent requests on the same id cannot act on a row that is already gone.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, highest id first.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, RepositoryError>;

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError>;

    /// Replace every writable field.
    async fn update(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Negate the stored availability.
    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, RepositoryError>;

    /// Hard delete; `false` when nothing was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Cheap liveness probe for `/health`.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
