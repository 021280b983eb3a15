use hash::H256;

/// Block reference, as carried by `GetBlockHeaders`: either a concrete hash
/// or a canonical chain height.
#[derive(Debug, PartialEq, Clone)]
pub enum BlockRef {
	Hash(H256),
	Number(u64),
}
