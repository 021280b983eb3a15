use std::fmt;
use crypto::keccak;
use hash::H256;
use ser::{Deserializable, Reader, Error as ReaderError, Serializable, Stream, serialize};
use uint::U256;

#[derive(PartialEq, Clone)]
pub struct BlockHeader {
	pub parent_hash: H256,
	pub uncles_hash: H256,
	pub transactions_root: H256,
	pub number: u64,
	pub difficulty: U256,
	pub timestamp: u64,
	pub nonce: u64,
}

impl BlockHeader {
	pub fn hash(&self) -> H256 {
		keccak(&serialize(self))
	}
}

impl fmt::Debug for BlockHeader {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("BlockHeader")
			.field("parent_hash", &self.parent_hash)
			.field("uncles_hash", &self.uncles_hash)
			.field("transactions_root", &self.transactions_root)
			.field("number", &self.number)
			.field("difficulty", &self.difficulty)
			.field("timestamp", &self.timestamp)
			.field("nonce", &self.nonce)
			.finish()
	}
}

impl Serializable for BlockHeader {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.parent_hash)
			.append(&self.uncles_hash)
			.append(&self.transactions_root)
			.append(&self.number)
			.append(&self.difficulty)
			.append(&self.timestamp)
			.append(&self.nonce);
	}
}

impl Deserializable for BlockHeader {
	fn deserialize(reader: &mut Reader) -> Result<Self, ReaderError> {
		let block_header = BlockHeader {
			parent_hash: reader.read()?,
			uncles_hash: reader.read()?,
			transactions_root: reader.read()?,
			number: reader.read()?,
			difficulty: reader.read()?,
			timestamp: reader.read()?,
			nonce: reader.read()?,
		};

		Ok(block_header)
	}
}
