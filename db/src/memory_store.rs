use std::collections::HashMap;
use parking_lot::RwLock;
use chain::Block;
use chain::uint::U256;
use primitives::hash::H256;
use best_block::BestBlock;
use error::Error;
use store::{BlockInsertionResult, Store};

/// In-memory block storage with heaviest-total-difficulty canonical chain
/// selection. Side chains are kept around so that block-by-hash lookups and
/// reorganizations work; nothing is ever evicted.
#[derive(Default)]
pub struct MemoryStore {
	data: RwLock<MemoryStoreData>,
}

#[derive(Default)]
struct MemoryStoreData {
	/// All stored blocks, canonical and side, by hash.
	blocks: HashMap<H256, Block>,
	/// Cumulative difficulty up to and including each stored block.
	cumulative_difficulties: HashMap<H256, U256>,
	/// Canonical chain, indexed by height.
	canon: Vec<H256>,
	/// Canonical height by hash.
	canon_numbers: HashMap<H256, u64>,
}

impl MemoryStore {
	pub fn new() -> Self {
		MemoryStore::default()
	}

	pub fn with_blocks(blocks: &[Block]) -> Self {
		let store = MemoryStore::default();
		for block in blocks {
			store.insert(block.clone()).expect("test blocks are inserted in parent-first order; qed");
		}
		store
	}
}

impl MemoryStoreData {
	fn best_hash(&self) -> Option<&H256> {
		self.canon.last()
	}

	/// Hashes of the side branch ending at `tip_parent`, tip-first, down to
	/// (excluding) the first canonical ancestor, which is returned alongside.
	fn side_branch(&self, tip_parent: &H256) -> Result<(Vec<H256>, u64), Error> {
		let mut branch = Vec::new();
		let mut current = tip_parent.clone();
		while !self.canon_numbers.contains_key(&current) {
			let block = self.blocks.get(&current)
				.ok_or(Error::InconsistentData("side chain parent link points to unknown block"))?;
			branch.push(current.clone());
			current = block.parent_hash().clone();
		}
		let ancestor_number = self.canon_numbers[&current];
		Ok((branch, ancestor_number))
	}
}

impl Store for MemoryStore {
	fn best_block(&self) -> Option<BestBlock> {
		let data = self.data.read();
		data.best_hash().map(|hash| BestBlock {
			number: (data.canon.len() - 1) as u64,
			hash: hash.clone(),
		})
	}

	fn total_difficulty(&self) -> U256 {
		let data = self.data.read();
		match data.best_hash() {
			Some(hash) => data.cumulative_difficulties[hash],
			None => U256::zero(),
		}
	}

	fn block(&self, hash: &H256) -> Option<Block> {
		self.data.read().blocks.get(hash).cloned()
	}

	fn block_at(&self, number: u64) -> Option<Block> {
		let data = self.data.read();
		data.canon.get(number as usize).map(|hash| data.blocks[hash].clone())
	}

	fn block_hash(&self, number: u64) -> Option<H256> {
		self.data.read().canon.get(number as usize).cloned()
	}

	fn block_number(&self, hash: &H256) -> Option<u64> {
		self.data.read().canon_numbers.get(hash).cloned()
	}

	fn contains(&self, hash: &H256) -> bool {
		self.data.read().blocks.contains_key(hash)
	}

	fn insert(&self, block: Block) -> Result<BlockInsertionResult, Error> {
		let hash = block.hash();
		let mut data = self.data.write();

		if data.blocks.contains_key(&hash) {
			return Ok(BlockInsertionResult::AlreadyKnown);
		}

		// genesis
		if data.canon.is_empty() {
			if block.number() != 0 {
				return Err(Error::UnknownParent);
			}
			let difficulty = block.block_header.difficulty;
			data.cumulative_difficulties.insert(hash.clone(), difficulty);
			data.blocks.insert(hash.clone(), block);
			data.canon.push(hash.clone());
			data.canon_numbers.insert(hash, 0);
			return Ok(BlockInsertionResult::Connected { reorganized: false });
		}

		if block.number() == 0 {
			return Err(Error::DuplicateGenesis);
		}

		let parent_hash = block.parent_hash().clone();
		let parent_cumulative = match data.cumulative_difficulties.get(&parent_hash) {
			Some(cumulative) => *cumulative,
			None => return Err(Error::UnknownParent),
		};
		let parent_number = data.blocks[&parent_hash].number();
		if block.number() != parent_number + 1 {
			return Err(Error::InconsistentData("block number does not follow parent"));
		}

		let cumulative = parent_cumulative + block.block_header.difficulty;
		let number = block.number();
		data.cumulative_difficulties.insert(hash.clone(), cumulative);
		data.blocks.insert(hash.clone(), block);

		// extends the canonical tip
		if data.best_hash() == Some(&parent_hash) {
			data.canon.push(hash.clone());
			data.canon_numbers.insert(hash, number);
			return Ok(BlockInsertionResult::Connected { reorganized: false });
		}

		// heavier side chain replaces the canonical suffix
		let best_cumulative = {
			let best_hash = data.best_hash().expect("canon is non-empty here; qed").clone();
			data.cumulative_difficulties[&best_hash]
		};
		if cumulative > best_cumulative {
			let (branch, ancestor_number) = data.side_branch(&parent_hash)?;
			let retired: Vec<_> = data.canon.drain(ancestor_number as usize + 1..).collect();
			for retired_hash in retired {
				data.canon_numbers.remove(&retired_hash);
			}
			for branch_hash in branch.into_iter().rev().chain(Some(hash)) {
				let branch_number = data.blocks[&branch_hash].number();
				data.canon.push(branch_hash.clone());
				data.canon_numbers.insert(branch_hash, branch_number);
			}
			return Ok(BlockInsertionResult::Connected { reorganized: true });
		}

		Ok(BlockInsertionResult::SideChain)
	}
}
