use hash::H256;

#[derive(Debug, PartialEq, Clone)]
pub struct BlockHashResponse {
	pub id: u64,
	pub hash: H256,
}
