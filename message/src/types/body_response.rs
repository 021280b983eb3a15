use chain::{BlockHeader, Transaction};

#[derive(Debug, PartialEq, Clone)]
pub struct BodyResponse {
	pub id: u64,
	pub transactions: Vec<Transaction>,
	pub uncles: Vec<BlockHeader>,
}
