//! Items module: domain records, the repository seam and the in-memory store.

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{Item, ItemInput};
pub use repository::ItemRepository;
pub use store::{ItemStore, SEED_COUNT};
