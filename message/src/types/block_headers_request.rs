use hash::H256;

/// Request for `count` headers walking the parent links backwards,
/// starting at (and including) `hash`.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockHeadersRequest {
	pub id: u64,
	pub hash: H256,
	pub count: u32,
}
