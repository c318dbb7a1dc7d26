//! # Item Repository
//!
//! Append-only storage port for [`Item`]s and its in-memory adapter.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::RepositoryError;
use crate::item::Item;

/// Storage for catalog items.
///
/// Implementations must return items from [`list`](Self::list) in the order
/// they were passed to [`add`](Self::add).
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Append an item and return the stored record.
    async fn add(&self, item: Item) -> Result<Item, RepositoryError>;

    /// Every stored item, in insertion order.
    async fn list(&self) -> Result<Vec<Item>, RepositoryError>;

    /// Number of stored items.
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Process-local repository. Contents are lost on restart.
///
/// Cloning is cheap and all clones share the same list. The lock is a
/// `parking_lot::RwLock` and is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<Vec<Item>>>,
}

impl InMemoryItemRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn add(&self, item: Item) -> Result<Item, RepositoryError> {
        self.items.write().push(item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.items.read().clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.items.read().len())
    }
}
