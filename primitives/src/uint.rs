//! 256-bit unsigned integer, as needed for cumulative difficulty accounting.
//!
//! Only the operations the sync core relies on are implemented: construction,
//! addition and comparison. Anything fancier belongs to a consensus engine.

use std::{fmt, ops, cmp};

/// Little-endian 64-bit limbs.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct U256([u64; 4]);

impl U256 {
	pub fn zero() -> Self {
		U256([0; 4])
	}

	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|limb| *limb == 0)
	}

	/// Raw little-endian limbs.
	pub fn to_le_limbs(&self) -> [u64; 4] {
		self.0
	}

	pub fn from_le_limbs(limbs: [u64; 4]) -> Self {
		U256(limbs)
	}

	pub fn overflowing_add(self, other: U256) -> (U256, bool) {
		let mut result = [0u64; 4];
		let mut carry = false;
		for i in 0..4 {
			let (sum, overflow1) = self.0[i].overflowing_add(other.0[i]);
			let (sum, overflow2) = sum.overflowing_add(if carry { 1 } else { 0 });
			result[i] = sum;
			carry = overflow1 || overflow2;
		}
		(U256(result), carry)
	}
}

impl From<u64> for U256 {
	fn from(value: u64) -> Self {
		U256([value, 0, 0, 0])
	}
}

impl From<u128> for U256 {
	fn from(value: u128) -> Self {
		U256([value as u64, (value >> 64) as u64, 0, 0])
	}
}

impl ops::Add for U256 {
	type Output = U256;

	fn add(self, other: U256) -> U256 {
		let (result, overflow) = self.overflowing_add(other);
		assert!(!overflow, "U256 addition overflow");
		result
	}
}

impl ops::AddAssign for U256 {
	fn add_assign(&mut self, other: U256) {
		*self = *self + other;
	}
}

impl cmp::PartialOrd for U256 {
	fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl cmp::Ord for U256 {
	fn cmp(&self, other: &Self) -> cmp::Ordering {
		for i in (0..4).rev() {
			match self.0[i].cmp(&other.0[i]) {
				cmp::Ordering::Equal => continue,
				ordering => return ordering,
			}
		}
		cmp::Ordering::Equal
	}
}

impl fmt::LowerHex for U256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut non_zero = false;
		for limb in self.0.iter().rev() {
			if non_zero {
				write!(f, "{:016x}", limb)?;
			} else if *limb != 0 {
				write!(f, "{:x}", limb)?;
				non_zero = true;
			}
		}
		if !non_zero {
			f.write_str("0")?;
		}
		Ok(())
	}
}

impl fmt::Debug for U256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:x}", self)
	}
}

impl fmt::Display for U256 {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:x}", self)
	}
}

#[cfg(test)]
mod tests {
	use super::U256;

	#[test]
	fn test_add_with_carry() {
		let max_limb = U256::from(u64::max_value());
		let one = U256::from(1u64);
		let sum = max_limb + one;
		assert_eq!(sum.to_le_limbs(), [0, 1, 0, 0]);
	}

	#[test]
	fn test_ordering() {
		assert!(U256::from(2u64) > U256::from(1u64));
		assert!(U256::from_le_limbs([0, 1, 0, 0]) > U256::from(u64::max_value()));
		assert_eq!(U256::from(42u64).cmp(&U256::from(42u64)), ::std::cmp::Ordering::Equal);
	}

	#[test]
	fn test_format() {
		assert_eq!(format!("{}", U256::zero()), "0x0");
		assert_eq!(format!("{}", U256::from(255u64)), "0xff");
		assert_eq!(format!("{}", U256::from_le_limbs([1, 1, 0, 0])), "0x10000000000000001");
	}

	#[test]
	#[should_panic]
	fn test_add_overflow() {
		let max = U256::from_le_limbs([u64::max_value(); 4]);
		let _ = max + U256::from(1u64);
	}
}
