/// Binary search for the highest block height shared by the local chain and
/// a peer's chain.
///
/// Each probe asks the peer for its canonical hash at a height; the caller
/// reports whether that hash is known locally. Found answers raise the lower
/// bound, not-found answers lower the upper bound, so the search needs
/// O(log(peer height)) round trips instead of a bulk header download.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPointFinder {
	state: State,
}

#[derive(Debug, Clone, PartialEq)]
enum State {
	/// No search has been started for this peer.
	Idle,
	/// Searching. `low` is the highest height known to be shared (genesis is
	/// assumed shared), `high` the highest height that can still be shared,
	/// `probe` the height currently in flight.
	Bisecting { low: u64, high: u64, probe: u64 },
	/// Terminal: the connection point for this sync session.
	Found(u64),
}

impl ConnectionPointFinder {
	pub fn new() -> Self {
		ConnectionPointFinder {
			state: State::Idle,
		}
	}

	/// Start a search over `[0, peer_best]`, probing the peer's announced
	/// best first: its head may already be known locally.
	pub fn start(&mut self, peer_best: u64) {
		self.state = if peer_best == 0 {
			State::Found(0)
		} else {
			State::Bisecting { low: 0, high: peer_best, probe: peer_best }
		};
	}

	/// Height to ask the peer about, `None` when idle or finished.
	pub fn probe(&self) -> Option<u64> {
		match self.state {
			State::Bisecting { probe, .. } => Some(probe),
			_ => None,
		}
	}

	/// The discovered connection point, once fixed.
	pub fn connection_point(&self) -> Option<u64> {
		match self.state {
			State::Found(height) => Some(height),
			_ => None,
		}
	}

	/// The probed hash is known locally.
	pub fn on_found(&mut self) {
		if let State::Bisecting { high, probe, .. } = self.state {
			self.state = Self::next(probe, high);
		}
	}

	/// The probed hash is unknown locally.
	pub fn on_not_found(&mut self) {
		if let State::Bisecting { low, probe, .. } = self.state {
			self.state = Self::next(low, probe.saturating_sub(1));
		}
	}

	fn next(low: u64, high: u64) -> State {
		if low >= high {
			State::Found(low)
		} else {
			// upper midpoint, so the interval always shrinks
			State::Bisecting { low: low, high: high, probe: (low + high + 1) / 2 }
		}
	}
}

#[cfg(test)]
mod tests {
	use super::ConnectionPointFinder;

	/// Drive the finder against a local chain that knows heights `0..=known`.
	fn converge(peer_best: u64, known: u64) -> (u64, usize) {
		let mut finder = ConnectionPointFinder::new();
		finder.start(peer_best);

		let mut probes = 0;
		while let Some(probe) = finder.probe() {
			probes += 1;
			assert!(probes <= 64, "bisection must terminate");
			if probe <= known {
				finder.on_found();
			} else {
				finder.on_not_found();
			}
		}
		(finder.connection_point().expect("loop only ends when found; qed"), probes)
	}

	#[test]
	fn test_converges_to_common_height() {
		let (point, probes) = converge(100, 40);
		assert_eq!(point, 40);
		// ceil(log2(100)) == 7
		assert!(probes <= 8, "expected logarithmic probe count, got {}", probes);
	}

	#[test]
	fn test_peer_head_already_known() {
		let (point, probes) = converge(100, 200);
		assert_eq!(point, 100);
		assert_eq!(probes, 1);
	}

	#[test]
	fn test_only_genesis_shared() {
		let (point, _) = converge(100, 0);
		assert_eq!(point, 0);
	}

	#[test]
	fn test_zero_height_peer() {
		let mut finder = ConnectionPointFinder::new();
		finder.start(0);
		assert_eq!(finder.probe(), None);
		assert_eq!(finder.connection_point(), Some(0));
	}

	#[test]
	fn test_found_state_is_terminal() {
		let mut finder = ConnectionPointFinder::new();
		finder.start(1);
		finder.on_found();
		assert_eq!(finder.connection_point(), Some(1));
		finder.on_not_found();
		assert_eq!(finder.connection_point(), Some(1));
	}

	#[test]
	fn test_idle_ignores_updates() {
		let mut finder = ConnectionPointFinder::new();
		finder.on_found();
		assert_eq!(finder.probe(), None);
		assert_eq!(finder.connection_point(), None);
	}
}
