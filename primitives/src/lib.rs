//! Fixed-size hashes, big integers and byte containers shared by all crates.

extern crate hex;

pub mod bytes;
pub mod hash;
pub mod uint;
