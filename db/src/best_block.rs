use primitives::hash::H256;

/// Best canonical block descriptor.
#[derive(Debug, PartialEq, Clone)]
pub struct BestBlock {
	pub number: u64,
	pub hash: H256,
}
