use bytes::Bytes;
use hash::{H160, H256};
use primitives::uint::U256;
use reader::{Reader, Error, Deserializable};
use stream::{Stream, Serializable};

impl Serializable for u8 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u8(*self);
	}
}

impl Deserializable for u8 {
	#[inline]
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		reader.read_u8()
	}
}

impl Serializable for u32 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u32(*self);
	}
}

impl Deserializable for u32 {
	#[inline]
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		reader.read_u32()
	}
}

impl Serializable for u64 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u64(*self);
	}
}

impl Deserializable for u64 {
	#[inline]
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		reader.read_u64()
	}
}

impl Serializable for bool {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u8(if *self { 1 } else { 0 });
	}
}

impl Deserializable for bool {
	#[inline]
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		Ok(reader.read_u8()? != 0)
	}
}

macro_rules! impl_ser_for_hash {
	($name: ident, $size: expr) => {
		impl Serializable for $name {
			fn serialize(&self, stream: &mut Stream) {
				stream.append_slice(&**self);
			}
		}

		impl Deserializable for $name {
			fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
				let slice = reader.read_slice($size)?;
				Ok(slice.into())
			}
		}
	}
}

impl_ser_for_hash!(H160, 20);
impl_ser_for_hash!(H256, 32);

impl Serializable for U256 {
	fn serialize(&self, stream: &mut Stream) {
		for limb in self.to_le_limbs().iter() {
			stream.write_u64(*limb);
		}
	}
}

impl Deserializable for U256 {
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		let mut limbs = [0u64; 4];
		for limb in limbs.iter_mut() {
			*limb = reader.read_u64()?;
		}
		Ok(U256::from_le_limbs(limbs))
	}
}

impl Serializable for Bytes {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&(self.len() as u64));
		stream.append_slice(self);
	}
}

impl Deserializable for Bytes {
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		let len: u64 = reader.read()?;
		let slice = reader.read_slice(len as usize)?;
		Ok(slice.into())
	}
}

impl<T> Serializable for Vec<T> where T: Serializable {
	fn serialize(&self, stream: &mut Stream) {
		stream.append_list(self);
	}
}

impl<T> Deserializable for Vec<T> where T: Deserializable {
	fn deserialize(reader: &mut Reader) -> Result<Self, Error> {
		reader.read_list()
	}
}

#[cfg(test)]
mod tests {
	use bytes::Bytes;
	use hash::H256;
	use super::super::{serialize, deserialize, Error};

	#[test]
	fn test_serialize_integers() {
		assert_eq!(serialize(&1u8), "01".into());
		assert_eq!(serialize(&1u32), "01000000".into());
		assert_eq!(serialize(&1u64), "0100000000000000".into());
	}

	#[test]
	fn test_roundtrip_bytes() {
		let bytes: Bytes = "0badc0de".into();
		let serialized = serialize(&bytes);
		assert_eq!(deserialize::<Bytes>(&serialized), Ok(bytes));
	}

	#[test]
	fn test_deserialize_rejects_trailing_data() {
		let serialized = serialize(&1u32);
		assert_eq!(deserialize::<u8>(&serialized), Err(Error::UnreadData));
	}

	#[test]
	fn test_deserialize_rejects_short_data() {
		assert_eq!(deserialize::<H256>(&[0u8; 31]), Err(Error::UnexpectedEnd));
	}

	#[test]
	fn test_deserialize_rejects_bad_list_length() {
		// u64 length prefix promising way too many elements
		let serialized = serialize(&u64::max_value());
		assert_eq!(deserialize::<Vec<u8>>(&serialized), Err(Error::InvalidLength));
	}
}
