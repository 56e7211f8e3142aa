//! Persistence contract of the owning resource controller.

use async_trait::async_trait;
use thiserror::Error;

/// Failures of the backing store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No resource under the requested primary key; generated actions
    /// surface this as a 404.
    #[error("resource not found")]
    NotFound,

    /// Any other storage failure.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Lookup and save operations generated actions perform on the resource.
///
/// The crate provides no implementation: the host supplies whatever backs
/// its resources (a database table, an in-memory map in tests). Concurrent
/// requests touching the same persisted entity rely on this layer's own
/// concurrency control; the adapter adds none.
#[async_trait]
pub trait Repository<M>: Send + Sync {
    /// Resolve an instance by primary key.
    async fn find(&self, id: &str) -> Result<M, RepositoryError>;

    /// Persist the (possibly mutated) instance.
    async fn save(&self, model: &M) -> Result<(), RepositoryError>;
}
