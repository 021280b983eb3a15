use chain;

/// Full block propagation.
#[derive(Debug, PartialEq, Clone)]
pub struct Block {
	pub block: chain::Block,
}
