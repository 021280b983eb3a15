use chain;

#[derive(Debug, PartialEq, Clone)]
pub struct BlockResponse {
	pub id: u64,
	pub block: chain::Block,
}
