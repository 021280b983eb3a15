//! Reader used for deserialization of chain structures.

use byteorder::{LittleEndian, ReadBytesExt};

pub fn deserialize<T>(data: &[u8]) -> Result<T, Error> where T: Deserializable {
	let mut reader = Reader::new(data);
	let result = reader.read()?;
	if !reader.is_finished() {
		return Err(Error::UnreadData);
	}
	Ok(result)
}

#[derive(Debug, PartialEq)]
pub enum Error {
	/// The stream ended before the structure was fully read.
	UnexpectedEnd,
	/// Trailing bytes left after the structure was read.
	UnreadData,
	/// Length prefix too large for the remaining data.
	InvalidLength,
}

pub trait Deserializable: Sized {
	fn deserialize(reader: &mut Reader) -> Result<Self, Error>;
}

/// Reader used for deserialization of chain structures.
pub struct Reader<'a> {
	buffer: &'a [u8],
	position: usize,
}

impl<'a> Reader<'a> {
	pub fn new(buffer: &'a [u8]) -> Self {
		Reader {
			buffer: buffer,
			position: 0,
		}
	}

	pub fn read<T>(&mut self) -> Result<T, Error> where T: Deserializable {
		T::deserialize(self)
	}

	pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], Error> {
		if self.buffer.len() - self.position < len {
			return Err(Error::UnexpectedEnd);
		}
		let result = &self.buffer[self.position..self.position + len];
		self.position += len;
		Ok(result)
	}

	pub fn read_list<T>(&mut self) -> Result<Vec<T>, Error> where T: Deserializable {
		let len: u64 = self.read()?;
		// a length prefix cannot promise more elements than there are bytes left
		if len > (self.buffer.len() - self.position) as u64 {
			return Err(Error::InvalidLength);
		}
		let mut result = Vec::with_capacity(len as usize);
		for _ in 0..len {
			result.push(self.read()?);
		}
		Ok(result)
	}

	pub fn read_u8(&mut self) -> Result<u8, Error> {
		let mut slice = self.read_slice(1)?;
		slice.read_u8().map_err(|_| Error::UnexpectedEnd)
	}

	pub fn read_u32(&mut self) -> Result<u32, Error> {
		let mut slice = self.read_slice(4)?;
		slice.read_u32::<LittleEndian>().map_err(|_| Error::UnexpectedEnd)
	}

	pub fn read_u64(&mut self) -> Result<u64, Error> {
		let mut slice = self.read_slice(8)?;
		slice.read_u64::<LittleEndian>().map_err(|_| Error::UnexpectedEnd)
	}

	pub fn is_finished(&self) -> bool {
		self.position == self.buffer.len()
	}
}
