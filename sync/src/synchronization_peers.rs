use std::collections::{HashMap, HashSet};
use linked_hash_map::LinkedHashMap;
use chain::BlockIdentifier;
use chain::uint::U256;
use message::types;
use primitives::hash::H256;
use types::PeerIndex;
use utils::ConnectionPointFinder;

/// Max number of block hashes tracked by the block-knowledge map.
const MAX_KNOWN_BLOCKS: usize = 4096;

/// Per-peer state tracked by the sync driver.
#[derive(Debug, Default)]
pub struct Peers {
	/// Last announced status per peer. Last one wins.
	statuses: HashMap<PeerIndex, types::Status>,
	/// Active sync session per peer, created lazily.
	sessions: HashMap<PeerIndex, SyncPeerStatus>,
}

/// Active-sync session with a single peer.
#[derive(Debug)]
pub struct SyncPeerStatus {
	/// Connection point bisection state.
	pub connection_point: ConnectionPointFinder,
	/// Most recent skeleton received from this peer.
	pub skeleton: Vec<BlockIdentifier>,
}

/// Information on synchronization peers
#[cfg(test)]
#[derive(Debug, PartialEq)]
pub struct Information {
	/// # of peers which have announced a status.
	pub statuses: usize,
	/// # of peers with an active sync session.
	pub sessions: usize,
}

impl SyncPeerStatus {
	fn new() -> Self {
		SyncPeerStatus {
			connection_point: ConnectionPointFinder::new(),
			skeleton: Vec::new(),
		}
	}
}

impl Peers {
	pub fn new() -> Self {
		Peers::default()
	}

	/// Get information on synchronization peers
	#[cfg(test)]
	pub fn information(&self) -> Information {
		Information {
			statuses: self.statuses.len(),
			sessions: self.sessions.len(),
		}
	}

	/// Record the peer's announced status, replacing any previous one.
	pub fn set_status(&mut self, peer_index: PeerIndex, status: types::Status) {
		self.statuses.insert(peer_index, status);
	}

	pub fn status(&self, peer_index: PeerIndex) -> Option<&types::Status> {
		self.statuses.get(&peer_index)
	}

	/// Number of peers that have announced a status.
	pub fn count(&self) -> usize {
		self.statuses.len()
	}

	/// Number of peers whose announced total difficulty strictly exceeds the
	/// local one. When the local chain status is unavailable every tracked
	/// peer counts as advanced.
	pub fn advanced_count(&self, local_total_difficulty: Option<U256>) -> usize {
		match local_total_difficulty {
			Some(local) => self.statuses.values()
				.filter(|status| status.total_difficulty > local)
				.count(),
			None => self.statuses.len(),
		}
	}

	/// Replace the peer's sync session with a fresh one. A new session starts
	/// whenever a better status from this peer restarts active sync.
	pub fn reset_session(&mut self, peer_index: PeerIndex) -> &mut SyncPeerStatus {
		self.sessions.insert(peer_index, SyncPeerStatus::new());
		self.sessions.get_mut(&peer_index).expect("inserted above; qed")
	}

	/// The peer's sync session, created lazily on first interaction.
	pub fn session_mut(&mut self, peer_index: PeerIndex) -> &mut SyncPeerStatus {
		self.sessions.entry(peer_index).or_insert_with(SyncPeerStatus::new)
	}

	/// Forget everything about the peer.
	pub fn remove(&mut self, peer_index: PeerIndex) {
		self.statuses.remove(&peer_index);
		self.sessions.remove(&peer_index);
	}
}

/// Which peers are known to have which blocks. Bounded: once full, tracking
/// of the oldest hash is dropped.
#[derive(Debug, Default)]
pub struct BlockKnowledge {
	known: LinkedHashMap<H256, HashSet<PeerIndex>>,
}

impl BlockKnowledge {
	pub fn new() -> Self {
		BlockKnowledge::default()
	}

	pub fn insert(&mut self, hash: H256, peer_index: PeerIndex) {
		if let Some(peers) = self.known.get_mut(&hash) {
			peers.insert(peer_index);
			return;
		}
		if self.known.len() >= MAX_KNOWN_BLOCKS {
			self.known.pop_front();
		}
		let mut peers = HashSet::new();
		peers.insert(peer_index);
		self.known.insert(hash, peers);
	}

	pub fn is_known_by(&self, hash: &H256, peer_index: PeerIndex) -> bool {
		self.known.get(hash).map_or(false, |peers| peers.contains(&peer_index))
	}

	pub fn peers_for(&self, hash: &H256) -> Vec<PeerIndex> {
		let mut peers: Vec<_> = self.known.get(hash)
			.map(|peers| peers.iter().cloned().collect())
			.unwrap_or_default();
		// stable output for tests
		peers.sort();
		peers
	}

	pub fn forget_peer(&mut self, peer_index: PeerIndex) {
		for (_, peers) in self.known.iter_mut() {
			peers.remove(&peer_index);
		}
	}
}

#[cfg(test)]
mod tests {
	use chain::uint::U256;
	use message::types;
	use primitives::hash::H256;
	use super::{Peers, BlockKnowledge};

	fn status(total_difficulty: u64) -> types::Status {
		types::Status {
			best_hash: H256::from(total_difficulty as u8),
			best_number: total_difficulty,
			total_difficulty: U256::from(total_difficulty),
		}
	}

	#[test]
	fn test_status_last_one_wins() {
		let mut peers = Peers::new();
		peers.set_status(1, status(10));
		peers.set_status(1, status(20));
		assert_eq!(peers.count(), 1);
		assert_eq!(peers.status(1).unwrap().best_number, 20);
	}

	#[test]
	fn test_advanced_count() {
		let mut peers = Peers::new();
		peers.set_status(1, status(10));
		peers.set_status(2, status(20));
		peers.set_status(3, status(30));

		assert_eq!(peers.advanced_count(Some(U256::from(20u64))), 1);
		assert_eq!(peers.advanced_count(Some(U256::from(5u64))), 3);
		// no local chain status => all peers count as advanced
		assert_eq!(peers.advanced_count(None), 3);
	}

	#[test]
	fn test_session_is_created_lazily_and_reset() {
		let mut peers = Peers::new();
		assert_eq!(peers.information().sessions, 0);

		peers.session_mut(1).connection_point.start(100);
		assert_eq!(peers.information().sessions, 1);
		assert_eq!(peers.session_mut(1).connection_point.probe(), Some(100));

		let session = peers.reset_session(1);
		assert_eq!(session.connection_point.probe(), None);
	}

	#[test]
	fn test_remove_forgets_peer() {
		let mut peers = Peers::new();
		peers.set_status(1, status(10));
		peers.session_mut(1);
		peers.remove(1);
		assert_eq!(peers.information().statuses, 0);
		assert_eq!(peers.information().sessions, 0);
	}

	#[test]
	fn test_block_knowledge() {
		let mut knowledge = BlockKnowledge::new();
		let hash = H256::from(0x42);
		knowledge.insert(hash.clone(), 1);
		knowledge.insert(hash.clone(), 2);
		knowledge.insert(hash.clone(), 2);

		assert!(knowledge.is_known_by(&hash, 1));
		assert!(!knowledge.is_known_by(&hash, 3));
		assert_eq!(knowledge.peers_for(&hash), vec![1, 2]);

		knowledge.forget_peer(2);
		assert_eq!(knowledge.peers_for(&hash), vec![1]);
	}
}
