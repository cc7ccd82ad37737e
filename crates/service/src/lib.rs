//! Service layer holding the in-memory item collection and its CRUD contract.
//! - No HTTP types here; the transport shell maps results to responses.
//! - `ItemRepository` is the seam handlers depend on.

pub mod errors;
pub mod items;

pub use errors::ServiceError;
pub use items::{Item, ItemInput, ItemRepository, ItemStore};
