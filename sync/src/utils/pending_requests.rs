use linked_hash_map::LinkedHashMap;
use types::RequestId;

/// How long an outstanding request stays correlatable before it is treated
/// as never answered.
pub const REQUEST_TIMEOUT_S: f64 = 60_f64;

/// Outstanding request correlation table: request id to whatever context is
/// needed to validate the eventual response.
///
/// Request ids are monotonically increasing, so insertion order doubles as
/// deadline order and expiry sweeps pop from the front.
#[derive(Debug)]
pub struct PendingRequests<V> {
	entries: LinkedHashMap<RequestId, PendingEntry<V>>,
}

#[derive(Debug)]
struct PendingEntry<V> {
	value: V,
	deadline: f64,
}

impl<V> PendingRequests<V> {
	pub fn new() -> Self {
		PendingRequests {
			entries: LinkedHashMap::new(),
		}
	}

	/// Register an outstanding request. Ids are never reused while
	/// outstanding, so double insertion is a caller bug.
	pub fn insert(&mut self, id: RequestId, value: V, now: f64) {
		let previous = self.entries.insert(id, PendingEntry {
			value: value,
			deadline: now + REQUEST_TIMEOUT_S,
		});
		debug_assert!(previous.is_none(), "request ids are unique while outstanding");
	}

	pub fn get(&self, id: RequestId) -> Option<&V> {
		self.entries.get(&id).map(|entry| &entry.value)
	}

	/// Consume the entry. Call only after the response has been matched
	/// against the recorded context.
	pub fn remove(&mut self, id: RequestId) -> Option<V> {
		self.entries.remove(&id).map(|entry| entry.value)
	}

	/// Drop all entries whose deadline has passed, oldest first, and return
	/// them so the caller can react (e.g. re-drive sync off another peer).
	pub fn expire(&mut self, now: f64) -> Vec<(RequestId, V)> {
		let mut expired = Vec::new();
		loop {
			match self.entries.front() {
				Some((_, entry)) if entry.deadline <= now => (),
				_ => break,
			}
			let (id, entry) = self.entries.pop_front().expect("front() just returned an entry; qed");
			expired.push((id, entry.value));
		}
		expired
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::{PendingRequests, REQUEST_TIMEOUT_S};

	#[test]
	fn test_insert_get_remove() {
		let mut pending: PendingRequests<usize> = PendingRequests::new();
		pending.insert(1, 420, 0.0);
		assert_eq!(pending.get(1), Some(&420));
		assert_eq!(pending.get(2), None);
		assert_eq!(pending.remove(1), Some(420));
		assert_eq!(pending.remove(1), None);
		assert!(pending.is_empty());
	}

	#[test]
	fn test_expire_oldest_first() {
		let mut pending: PendingRequests<usize> = PendingRequests::new();
		pending.insert(1, 10, 0.0);
		pending.insert(2, 20, 10.0);
		pending.insert(3, 30, 1000.0);

		let expired = pending.expire(REQUEST_TIMEOUT_S + 10.0);
		assert_eq!(expired, vec![(1, 10), (2, 20)]);
		assert_eq!(pending.len(), 1);
		assert_eq!(pending.get(3), Some(&30));
	}

	#[test]
	fn test_nothing_expires_before_deadline() {
		let mut pending: PendingRequests<usize> = PendingRequests::new();
		pending.insert(1, 10, 0.0);
		assert!(pending.expire(REQUEST_TIMEOUT_S / 2.0).is_empty());
		assert_eq!(pending.len(), 1);
	}
}
