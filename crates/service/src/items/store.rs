use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{Item, ItemInput};
use super::repository::ItemRepository;
use crate::errors::ServiceError;

/// Number of records a seeded store starts with.
pub const SEED_COUNT: i64 = 10;

#[derive(Debug)]
struct Inner {
    records: HashMap<i64, Item>,
    // Strictly greater than every id handed out so far, deleted ones included.
    next_id: i64,
}

/// Concurrent in-memory item collection.
///
/// The record map and the id sequence live behind one reader/writer lock:
/// `list`/`get` share it, `create`/`update`/`delete` take it exclusively.
/// Ids are allocated while the write guard is held, so a reader either sees
/// a fully built record or nothing.
#[derive(Debug)]
pub struct ItemStore {
    inner: RwLock<Inner>,
}

impl ItemStore {
    /// Empty store; the first created item gets id 1.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(Inner { records: HashMap::new(), next_id: 1 }),
        })
    }

    /// Store pre-populated with `item-1`..`item-10` (values 10..100) so a
    /// benchmark can start without a seeding step.
    pub fn seeded() -> Arc<Self> {
        let records = (1..=SEED_COUNT).map(|n| (n, Item::seed(n))).collect();
        Arc::new(Self {
            inner: RwLock::new(Inner { records, next_id: SEED_COUNT + 1 }),
        })
    }

    /// All current records. Order follows map iteration and is unspecified.
    pub async fn list(&self) -> Vec<Item> {
        let inner = self.inner.read().await;
        inner.records.values().cloned().collect()
    }

    pub async fn get(&self, id: i64) -> Result<Item, ServiceError> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned().ok_or(ServiceError::NotFound(id))
    }

    pub async fn create(&self, input: ItemInput) -> Item {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let item = Item { id, name: input.name, value: input.value };
        inner.records.insert(id, item.clone());
        debug!(event = "item_created", id, "item created");
        item
    }

    pub async fn update(&self, id: i64, input: ItemInput) -> Result<Item, ServiceError> {
        let mut inner = self.inner.write().await;
        let existing = inner.records.get_mut(&id).ok_or(ServiceError::NotFound(id))?;
        existing.name = input.name;
        existing.value = input.value;
        debug!(event = "item_updated", id, "item updated");
        Ok(existing.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut inner = self.inner.write().await;
        inner.records.remove(&id).ok_or(ServiceError::NotFound(id))?;
        debug!(event = "item_deleted", id, "item deleted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait::async_trait]
impl ItemRepository for ItemStore {
    async fn list(&self) -> Vec<Item> { self.list().await }
    async fn get(&self, id: i64) -> Result<Item, ServiceError> { self.get(id).await }
    async fn create(&self, input: ItemInput) -> Item { self.create(input).await }
    async fn update(&self, id: i64, input: ItemInput) -> Result<Item, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: i64) -> Result<(), ServiceError> { self.delete(id).await }
    async fn len(&self) -> usize { self.len().await }
}
