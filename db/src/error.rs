use std::fmt;

/// Storage integrity errors. Unlike protocol anomalies these are never
/// swallowed: the triggering operation must halt.
#[derive(Debug, PartialEq)]
pub enum Error {
	/// Parent of the inserted block is not stored.
	UnknownParent,
	/// Attempt to insert a second genesis block.
	DuplicateGenesis,
	/// Persisted data violates an invariant.
	InconsistentData(&'static str),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::UnknownParent => write!(f, "parent block is not stored"),
			Error::DuplicateGenesis => write!(f, "genesis block is already stored"),
			Error::InconsistentData(details) => write!(f, "inconsistent storage: {}", details),
		}
	}
}

impl ::std::error::Error for Error {}
