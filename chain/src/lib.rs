extern crate crypto;
extern crate primitives;
extern crate serialization as ser;

mod block;
mod block_header;
mod block_identifier;
mod transaction;

pub use primitives::{hash, bytes, uint};

pub use block::Block;
pub use block_header::BlockHeader;
pub use block_identifier::BlockIdentifier;
pub use transaction::Transaction;
