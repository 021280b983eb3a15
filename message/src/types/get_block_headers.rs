use common::BlockRef;

/// Ethereum-style header range request. Reverse traversal is part of the
/// wire format but is not served by this implementation.
#[derive(Debug, PartialEq, Clone)]
pub struct GetBlockHeaders {
	pub block: BlockRef,
	pub max_headers: u32,
	pub skip: u32,
	pub reverse: bool,
}
