use chain::BlockIdentifier;

/// Evenly spaced block identifiers, strictly increasing in number, always
/// terminated by the responder's best block.
#[derive(Debug, PartialEq, Clone)]
pub struct SkeletonResponse {
	pub id: u64,
	pub identifiers: Vec<BlockIdentifier>,
}
