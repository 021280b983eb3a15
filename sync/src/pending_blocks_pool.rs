use std::collections::{HashMap, HashSet, VecDeque};
use std::collections::hash_map::Entry;
use chain::{Block, BlockHeader};
use primitives::hash::H256;

/// Storage for blocks that cannot be connected to the chain yet, plus
/// placeholder headers saved so repeated announcements do not trigger
/// duplicate block requests.
#[derive(Debug, Default)]
pub struct PendingBlocksPool {
	/// Pending blocks by hash.
	blocks: HashMap<H256, Block>,
	/// Hashes of pending blocks, grouped by parent hash.
	blocks_by_parent: HashMap<H256, HashSet<H256>>,
	/// Headers for which the full block has already been requested.
	headers: HashMap<H256, BlockHeader>,
}

impl PendingBlocksPool {
	pub fn new() -> Self {
		PendingBlocksPool::default()
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn contains_block(&self, hash: &H256) -> bool {
		self.blocks.contains_key(hash)
	}

	pub fn contains_header(&self, hash: &H256) -> bool {
		self.headers.contains_key(hash)
	}

	pub fn block(&self, hash: &H256) -> Option<Block> {
		self.blocks.get(hash).cloned()
	}

	/// Insert a block whose parent is not connected yet. Drops the matching
	/// placeholder header, if any: the full block supersedes it.
	pub fn insert_block(&mut self, block: Block) {
		let hash = block.hash();
		self.headers.remove(&hash);
		self.blocks_by_parent
			.entry(block.parent_hash().clone())
			.or_insert_with(HashSet::new)
			.insert(hash.clone());
		self.blocks.insert(hash, block);
	}

	/// Remember that the full block behind this header was already requested.
	pub fn insert_header(&mut self, header: BlockHeader) {
		let hash = header.hash();
		if self.blocks.contains_key(&hash) {
			return;
		}
		self.headers.insert(hash, header);
	}

	/// Remove and return all pending blocks that become connectable once
	/// `hash` is in the chain, including their own pending descendants.
	pub fn remove_blocks_for_parent(&mut self, hash: &H256) -> Vec<Block> {
		let mut queue: VecDeque<H256> = VecDeque::new();
		queue.push_back(hash.clone());

		let mut removed: Vec<Block> = Vec::new();
		while let Some(parent_hash) = queue.pop_front() {
			if let Entry::Occupied(entry) = self.blocks_by_parent.entry(parent_hash) {
				let (_, children) = entry.remove_entry();
				for child_hash in children {
					queue.push_back(child_hash.clone());
					if let Some(block) = self.blocks.remove(&child_hash) {
						removed.push(block);
					}
				}
			}
		}
		// connectable children arrive parent-first by construction
		removed.sort_by_key(Block::number);
		removed
	}
}

#[cfg(test)]
mod tests {
	use db::devtools;
	use super::PendingBlocksPool;

	#[test]
	fn test_pool_empty_on_start() {
		let pool = PendingBlocksPool::new();
		assert_eq!(pool.len(), 0);
	}

	#[test]
	fn test_insert_and_lookup() {
		let blocks = devtools::build_chain(2);
		let mut pool = PendingBlocksPool::new();
		pool.insert_block(blocks[1].clone());

		assert_eq!(pool.len(), 1);
		assert!(pool.contains_block(&blocks[1].hash()));
		assert_eq!(pool.block(&blocks[1].hash()), Some(blocks[1].clone()));
		assert!(!pool.contains_block(&blocks[0].hash()));
	}

	#[test]
	fn test_block_supersedes_header() {
		let blocks = devtools::build_chain(2);
		let mut pool = PendingBlocksPool::new();

		pool.insert_header(blocks[1].header().clone());
		assert!(pool.contains_header(&blocks[1].hash()));

		pool.insert_block(blocks[1].clone());
		assert!(!pool.contains_header(&blocks[1].hash()));

		// a late header announcement is not resurrected either
		pool.insert_header(blocks[1].header().clone());
		assert!(!pool.contains_header(&blocks[1].hash()));
	}

	#[test]
	fn test_remove_blocks_for_parent_is_recursive() {
		let blocks = devtools::build_chain(4);
		let mut pool = PendingBlocksPool::new();
		pool.insert_block(blocks[3].clone());
		pool.insert_block(blocks[1].clone());
		pool.insert_block(blocks[2].clone());

		let removed = pool.remove_blocks_for_parent(&blocks[0].hash());
		assert_eq!(removed, vec![blocks[1].clone(), blocks[2].clone(), blocks[3].clone()]);
		assert_eq!(pool.len(), 0);
	}

	#[test]
	fn test_remove_blocks_for_parent_keeps_unrelated() {
		let blocks = devtools::build_chain(2);
		let other_genesis = devtools::build_block(None, 99, 1);
		let other_child = devtools::build_block(Some(&other_genesis), 99, 1);

		let mut pool = PendingBlocksPool::new();
		pool.insert_block(blocks[1].clone());
		pool.insert_block(other_child.clone());

		let removed = pool.remove_blocks_for_parent(&blocks[0].hash());
		assert_eq!(removed, vec![blocks[1].clone()]);
		assert_eq!(pool.len(), 1);
		assert!(pool.contains_block(&other_child.hash()));
	}
}
