use std::fmt;
use bytes::Bytes;
use crypto::keccak;
use hash::H256;
use ser::{Deserializable, Reader, Error as ReaderError, Serializable, Stream, serialize};
use uint::U256;

/// The sync core treats transactions as opaque payloads: it never executes
/// them, only hashes them for body/header consistency checks.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct Transaction {
	pub nonce: u64,
	pub value: U256,
	pub payload: Bytes,
}

impl Transaction {
	pub fn hash(&self) -> H256 {
		keccak(&serialize(self))
	}
}

impl fmt::Display for Transaction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Transaction(nonce: {}, value: {}, payload: {} bytes)", self.nonce, self.value, self.payload.len())
	}
}

impl Serializable for Transaction {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.nonce)
			.append(&self.value)
			.append(&self.payload);
	}
}

impl Deserializable for Transaction {
	fn deserialize(reader: &mut Reader) -> Result<Self, ReaderError> {
		let transaction = Transaction {
			nonce: reader.read()?,
			value: reader.read()?,
			payload: reader.read()?,
		};

		Ok(transaction)
	}
}
