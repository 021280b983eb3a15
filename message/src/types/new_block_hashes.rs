use chain::BlockIdentifier;

/// Announcement of freshly mined or relayed blocks. Fire-and-forget.
#[derive(Debug, PartialEq, Clone)]
pub struct NewBlockHashes {
	pub identifiers: Vec<BlockIdentifier>,
}
