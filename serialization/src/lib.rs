//! Canonical binary encoding of chain structures.
//!
//! Used to produce the byte strings that get hashed; the network transport
//! has its own framing and is out of scope here.

extern crate byteorder;
extern crate primitives;

mod impls;
mod reader;
mod stream;

pub use primitives::{bytes, hash};

pub use reader::{Reader, Error, Deserializable, deserialize};
pub use stream::{Stream, Serializable, serialize};
