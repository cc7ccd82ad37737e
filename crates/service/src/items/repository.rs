use async_trait::async_trait;

use super::domain::{Item, ItemInput};
use crate::errors::ServiceError;

/// Storage abstraction the transport layer calls into.
/// All methods are safe to call concurrently.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Snapshot of every record; order is unspecified.
    async fn list(&self) -> Vec<Item>;
    async fn get(&self, id: i64) -> Result<Item, ServiceError>;
    /// Assigns the next id and inserts the record in one step.
    async fn create(&self, input: ItemInput) -> Item;
    /// Full replacement of `name` and `value`; the id is kept.
    async fn update(&self, id: i64, input: ItemInput) -> Result<Item, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
    async fn len(&self) -> usize;
}
