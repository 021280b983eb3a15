use chain::BlockHeader;

/// Header list, either the answer to `GetBlockHeaders` or an unsolicited
/// announcement.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockHeaders {
	pub headers: Vec<BlockHeader>,
}
