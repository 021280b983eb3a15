//! Deterministic chain builders for tests.

use chain::{Block, BlockHeader, Transaction};
use chain::uint::U256;
use primitives::hash::H256;

/// Build a block on top of `parent` (`None` for genesis). `nonce` varies the
/// hash so forks at the same height stay distinct.
pub fn build_block(parent: Option<&Block>, nonce: u64, difficulty: u64) -> Block {
	build_block_with_body(parent, nonce, difficulty, Vec::new(), Vec::new())
}

pub fn build_block_with_body(
	parent: Option<&Block>,
	nonce: u64,
	difficulty: u64,
	transactions: Vec<Transaction>,
	uncles: Vec<BlockHeader>,
) -> Block {
	let (parent_hash, number) = match parent {
		Some(parent) => (parent.hash(), parent.number() + 1),
		None => (H256::default(), 0),
	};
	let header = BlockHeader {
		parent_hash: parent_hash,
		uncles_hash: Block::uncles_hash(&uncles),
		transactions_root: Block::transactions_root(&transactions),
		number: number,
		difficulty: U256::from(difficulty),
		timestamp: number * 10,
		nonce: nonce,
	};
	Block::new(header, transactions, uncles)
}

/// Linear chain of `len` blocks starting at genesis, difficulty 1 each.
pub fn build_chain(len: usize) -> Vec<Block> {
	let mut blocks: Vec<Block> = Vec::with_capacity(len);
	for _ in 0..len {
		let block = build_block(blocks.last(), 0, 1);
		blocks.push(block);
	}
	blocks
}

/// `len` linked blocks on top of `parent`.
pub fn extend(parent: &Block, len: usize, nonce: u64, difficulty: u64) -> Vec<Block> {
	let mut blocks: Vec<Block> = Vec::with_capacity(len);
	for _ in 0..len {
		let block = build_block(Some(blocks.last().unwrap_or(parent)), nonce, difficulty);
		blocks.push(block);
	}
	blocks
}

#[cfg(test)]
mod tests {
	use super::{build_chain, extend};

	#[test]
	fn test_build_chain_is_linked() {
		let blocks = build_chain(4);
		for (number, block) in blocks.iter().enumerate() {
			assert_eq!(block.number(), number as u64);
		}
		for pair in blocks.windows(2) {
			assert_eq!(*pair[1].parent_hash(), pair[0].hash());
		}
	}

	#[test]
	fn test_build_chain_is_deterministic() {
		assert_eq!(build_chain(3), build_chain(3));
	}

	#[test]
	fn test_forks_are_distinct() {
		let blocks = build_chain(2);
		let fork = extend(&blocks[0], 1, 7, 1);
		assert_eq!(fork[0].number(), blocks[1].number());
		assert!(fork[0].hash() != blocks[1].hash());
	}
}
