extern crate primitives;
extern crate tiny_keccak;

use primitives::hash::H256;
use tiny_keccak::{Hasher, Keccak};

/// Keccak-256
#[inline]
pub fn keccak(input: &[u8]) -> H256 {
	let mut keccak = Keccak::v256();
	keccak.update(input);
	let mut result = [0u8; 32];
	keccak.finalize(&mut result);
	result.into()
}

#[cfg(test)]
mod tests {
	use super::keccak;
	use primitives::hash::H256;

	#[test]
	fn test_keccak_empty() {
		let expected = H256::from("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
		assert_eq!(keccak(&[]), expected);
	}

	#[test]
	fn test_keccak_abc() {
		let expected = H256::from("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45");
		assert_eq!(keccak(b"abc"), expected);
	}
}
