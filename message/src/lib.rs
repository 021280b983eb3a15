//! Protocol message catalog.
//!
//! Messages are plain payload structs: the transport layer owns framing and
//! wire encoding, and hands decoded messages to the sync crate.

extern crate chain;
extern crate primitives;

pub mod common;
pub mod types;

pub use primitives::{hash, bytes};

pub use common::BlockRef;
