use hash::H256;

/// Legacy full-block request, no request id: the answer (if any) is a
/// fire-and-forget `Block`.
#[derive(Debug, PartialEq, Clone)]
pub struct GetBlock {
	pub hash: H256,
}
