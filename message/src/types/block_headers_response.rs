use chain::BlockHeader;

#[derive(Debug, PartialEq, Clone)]
pub struct BlockHeadersResponse {
	pub id: u64,
	pub headers: Vec<BlockHeader>,
}
