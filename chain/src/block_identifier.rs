use hash::H256;

/// Coarse block locator carried by skeleton responses.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockIdentifier {
	pub hash: H256,
	pub number: u64,
}

impl BlockIdentifier {
	pub fn new(hash: H256, number: u64) -> Self {
		BlockIdentifier {
			hash: hash,
			number: number,
		}
	}
}
