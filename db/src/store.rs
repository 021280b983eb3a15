use std::sync::Arc;
use chain::Block;
use chain::uint::U256;
use primitives::hash::H256;
use best_block::BestBlock;
use error::Error;

/// Outcome of a block insertion attempt.
#[derive(Debug, PartialEq)]
pub enum BlockInsertionResult {
	/// Block extends a known chain. `reorganized` is true when a side chain
	/// became heavier than the canonical one and replaced its suffix.
	Connected { reorganized: bool },
	/// Block is stored on a side chain that is still lighter than canon.
	SideChain,
	/// Block was already stored; nothing changed.
	AlreadyKnown,
}

/// Blockchain storage interface required by the sync core.
///
/// Lookup conventions: `block` resolves hashes on any stored chain
/// (canonical or side), while the `*_at`/`*_hash` height accessors resolve
/// against the canonical chain only.
pub trait Store: Send + Sync {
	/// Best canonical block, `None` for an empty store.
	fn best_block(&self) -> Option<BestBlock>;

	/// Cumulative difficulty of the canonical chain.
	fn total_difficulty(&self) -> U256;

	/// Block by hash, any chain.
	fn block(&self, hash: &H256) -> Option<Block>;

	/// Canonical block at the given height.
	fn block_at(&self, number: u64) -> Option<Block>;

	/// Canonical block hash at the given height.
	fn block_hash(&self, number: u64) -> Option<H256>;

	/// Canonical height of the given hash, `None` for side chain blocks.
	fn block_number(&self, hash: &H256) -> Option<u64>;

	/// Is the hash stored on any chain?
	fn contains(&self, hash: &H256) -> bool;

	/// Insert a block and attempt to extend the canonical chain with it.
	fn insert(&self, block: Block) -> Result<BlockInsertionResult, Error>;
}

/// Reference to storage
pub type SharedStore = Arc<dyn Store>;
