//! Storage abstraction for shipping records.
//!
//! The host system owns persistence. This module defines what the weighing
//! and label code needs from it ([`ShipStore`]) and ships an in-memory
//! implementation backed by a serializable [`StoreSnapshot`].

mod memory;
mod snapshot;
mod traits;

pub use memory::InMemoryStore;
pub use snapshot::{SnapshotError, StoreSnapshot};
pub use traits::{ShipStore, StoreError, StoreResult};
