//! Chain storage collaborator surface.
//!
//! The sync core only decides what to fetch and where to hand it off; this
//! crate provides the storage interface it hands off to, plus an in-memory
//! implementation used by tests and light deployments.

extern crate parking_lot;

extern crate chain;
extern crate primitives;

mod best_block;
pub mod devtools;
mod error;
mod memory_store;
mod store;

pub use best_block::BestBlock;
pub use error::Error;
pub use memory_store::MemoryStore;
pub use store::{BlockInsertionResult, SharedStore, Store};
