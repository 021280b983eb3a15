/// Request for the hash of the canonical block at the given height. Used by
/// the connection-point bisection.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockHashRequest {
	pub id: u64,
	pub height: u64,
}
