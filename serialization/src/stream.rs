//! Stream used for serialization of chain structures.

use std::borrow::Borrow;
use std::io::Write;
use byteorder::{LittleEndian, WriteBytesExt};
use bytes::Bytes;

pub fn serialize<T>(t: &T) -> Bytes where T: Serializable {
	let mut stream = Stream::default();
	stream.append(t);
	stream.out()
}

pub trait Serializable {
	/// Serialize the struct and append it to the end of stream.
	fn serialize(&self, s: &mut Stream);
}

/// Stream used for serialization of chain structures.
#[derive(Default)]
pub struct Stream {
	buffer: Vec<u8>,
}

impl Stream {
	pub fn new() -> Self {
		Stream::default()
	}

	/// Serializes the struct and appends it to the end of stream.
	pub fn append<T>(&mut self, t: &T) -> &mut Self where T: Serializable {
		t.serialize(self);
		self
	}

	/// Appends raw bytes to the end of the stream.
	pub fn append_slice(&mut self, bytes: &[u8]) -> &mut Self {
		// discard error for now, since we write to simple vector
		self.buffer.write(bytes).unwrap();
		self
	}

	/// Appends a list of serializable structs to the end of the stream,
	/// prefixed with the element count.
	pub fn append_list<T, K>(&mut self, t: &[K]) -> &mut Self where T: Serializable, K: Borrow<T> {
		self.append(&(t.len() as u64));
		for i in t {
			i.borrow().serialize(self);
		}
		self
	}

	pub fn write_u8(&mut self, v: u8) {
		self.buffer.write_u8(v).unwrap();
	}

	pub fn write_u32(&mut self, v: u32) {
		self.buffer.write_u32::<LittleEndian>(v).unwrap();
	}

	pub fn write_u64(&mut self, v: u64) {
		self.buffer.write_u64::<LittleEndian>(v).unwrap();
	}

	/// Full stream.
	pub fn out(self) -> Bytes {
		self.buffer.into()
	}
}
