use hash::H256;

#[derive(Debug, PartialEq, Clone)]
pub struct BodyRequest {
	pub id: u64,
	pub hash: H256,
}
