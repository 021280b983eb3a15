use block_header::BlockHeader;
use crypto::keccak;
use hash::H256;
use ser::{Deserializable, Reader, Error as ReaderError, Serializable, Stream};
use transaction::Transaction;

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
	pub block_header: BlockHeader,
	pub transactions: Vec<Transaction>,
	pub uncles: Vec<BlockHeader>,
}

impl Block {
	pub fn new(block_header: BlockHeader, transactions: Vec<Transaction>, uncles: Vec<BlockHeader>) -> Self {
		Block {
			block_header: block_header,
			transactions: transactions,
			uncles: uncles,
		}
	}

	pub fn hash(&self) -> H256 {
		self.block_header.hash()
	}

	pub fn number(&self) -> u64 {
		self.block_header.number
	}

	pub fn parent_hash(&self) -> &H256 {
		&self.block_header.parent_hash
	}

	pub fn header(&self) -> &BlockHeader {
		&self.block_header
	}

	/// Commitment to the transaction list: keccak over the concatenated
	/// transaction hashes. A flat accumulator, not a trie root; consensus
	/// grade commitments are outside this crate's responsibility.
	pub fn transactions_root(transactions: &[Transaction]) -> H256 {
		let mut stream = Stream::new();
		for transaction in transactions {
			stream.append(&transaction.hash());
		}
		keccak(&stream.out())
	}

	/// Commitment to the uncle list, same flat scheme as `transactions_root`.
	pub fn uncles_hash(uncles: &[BlockHeader]) -> H256 {
		let mut stream = Stream::new();
		for uncle in uncles {
			stream.append(&uncle.hash());
		}
		keccak(&stream.out())
	}

	/// Checks that the carried body matches the roots declared by the header.
	pub fn is_body_consistent(&self) -> bool {
		Block::transactions_root(&self.transactions) == self.block_header.transactions_root
			&& Block::uncles_hash(&self.uncles) == self.block_header.uncles_hash
	}
}

impl Serializable for Block {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.block_header)
			.append_list(&self.transactions)
			.append_list(&self.uncles);
	}
}

impl Deserializable for Block {
	fn deserialize(reader: &mut Reader) -> Result<Self, ReaderError> {
		let block = Block {
			block_header: reader.read()?,
			transactions: reader.read_list()?,
			uncles: reader.read_list()?,
		};

		Ok(block)
	}
}
