use chain::uint::U256;
use hash::H256;

/// A peer's announced chain head. Fire-and-forget, no request id.
#[derive(Debug, PartialEq, Clone)]
pub struct Status {
	pub best_hash: H256,
	pub best_number: u64,
	pub total_difficulty: U256,
}
