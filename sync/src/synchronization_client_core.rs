use std::cmp;
use time::precise_time_s;
use chain::{Block, BlockHeader};
use chain::uint::U256;
use message::types;
use config::Config;
use synchronization_executor::{Task, TaskExecutor};
use synchronization_peers::Peers;
use types::{ExecutorRef, PeerIndex, RequestId, StorageRef};
use utils::PendingRequests;

/// Active synchronization driver: finds the connection point with peers
/// that are ahead, walks their skeleton, and pulls the missing headers and
/// bodies. Passive request serving lives in the synchronization server.
pub trait ClientCore {
	fn on_status(&mut self, peer_index: PeerIndex, message: types::Status);
	fn on_block_hash_response(&mut self, peer_index: PeerIndex, message: types::BlockHashResponse);
	fn on_skeleton_response(&mut self, peer_index: PeerIndex, message: types::SkeletonResponse);
	fn on_block_headers_response(&mut self, peer_index: PeerIndex, message: types::BlockHeadersResponse);
	fn on_body_response(&mut self, peer_index: PeerIndex, message: types::BodyResponse);
	fn on_disconnect(&mut self, peer_index: PeerIndex);
}

/// Context recorded for an outstanding body request.
#[derive(Debug)]
struct PendingBody {
	/// The only peer whose response may consume this entry.
	peer_index: PeerIndex,
	/// Header the delivered body will be assembled with.
	header: BlockHeader,
}

/// Synchronization client core implementation.
pub struct SynchronizationClientCore<T: TaskExecutor> {
	/// Storage reference.
	storage: StorageRef,
	/// Executor reference.
	executor: ExecutorRef<T>,
	/// Per-peer statuses and sync sessions.
	peers: Peers,
	/// Outstanding header-range requests: request id to expected sender.
	pending_headers: PendingRequests<PeerIndex>,
	/// Outstanding body requests.
	pending_bodies: PendingRequests<PendingBody>,
	/// Last issued request id. Pre-incremented, so ids start at 1.
	last_request_id: RequestId,
	/// Configuration.
	config: Config,
}

/// Information on current synchronization state.
#[cfg(test)]
#[derive(Debug, PartialEq)]
pub struct Information {
	/// # of peers that have announced a status.
	pub peers: usize,
	/// # of outstanding header-range requests.
	pub pending_headers: usize,
	/// # of outstanding body requests.
	pub pending_bodies: usize,
}

impl<T> SynchronizationClientCore<T> where T: TaskExecutor {
	pub fn new(storage: StorageRef, config: Config, executor: ExecutorRef<T>) -> Self {
		SynchronizationClientCore {
			storage: storage,
			executor: executor,
			peers: Peers::new(),
			pending_headers: PendingRequests::new(),
			pending_bodies: PendingRequests::new(),
			last_request_id: 0,
			config: config,
		}
	}

	pub fn peers_count(&self) -> usize {
		self.peers.count()
	}

	/// Number of peers whose announced total difficulty strictly exceeds
	/// ours. Every tracked peer counts when the local chain is empty.
	pub fn advanced_peers_count(&self) -> usize {
		self.peers.advanced_count(self.local_total_difficulty())
	}

	/// Drop outstanding requests whose deadline has passed and return the
	/// peers that failed to answer, deduplicated, so the caller can re-drive
	/// sync off other peers. A timed-out request is indistinguishable from
	/// one the peer never answered.
	pub fn expire_pending_requests(&mut self, now: f64) -> Vec<PeerIndex> {
		let mut stale_peers = Vec::new();
		for (id, peer_index) in self.pending_headers.expire(now) {
			warn!(target: "sync", "Header request {} to peer#{} has timed out", id, peer_index);
			stale_peers.push(peer_index);
		}
		for (id, pending) in self.pending_bodies.expire(now) {
			warn!(target: "sync", "Body request {} to peer#{} has timed out", id, pending.peer_index);
			stale_peers.push(pending.peer_index);
		}
		stale_peers.sort();
		stale_peers.dedup();
		stale_peers
	}

	/// Get information on current synchronization state.
	#[cfg(test)]
	pub fn information(&self) -> Information {
		Information {
			peers: self.peers.count(),
			pending_headers: self.pending_headers.len(),
			pending_bodies: self.pending_bodies.len(),
		}
	}

	fn local_total_difficulty(&self) -> Option<U256> {
		self.storage.best_block().map(|_| self.storage.total_difficulty())
	}

	fn local_best_number(&self) -> u64 {
		self.storage.best_block().map(|best| best.number).unwrap_or_default()
	}

	fn next_request_id(&mut self) -> RequestId {
		self.last_request_id += 1;
		self.last_request_id
	}

	fn request_block_hash(&mut self, peer_index: PeerIndex, height: u64) {
		let id = self.next_request_id();
		trace!(target: "sync", "Probing peer#{} hash at height {}", peer_index, height);
		self.executor.execute(Task::SendBlockHashRequest(peer_index, types::BlockHashRequest {
			id: id,
			height: height,
		}));
	}

	fn request_skeleton(&mut self, peer_index: PeerIndex, start_number: u64) {
		let id = self.next_request_id();
		trace!(target: "sync", "Requesting skeleton from peer#{} starting at {}", peer_index, start_number);
		self.executor.execute(Task::SendSkeletonRequest(peer_index, types::SkeletonRequest {
			id: id,
			start_number: start_number,
		}));
	}
}

impl<T> ClientCore for SynchronizationClientCore<T> where T: TaskExecutor {
	/// Record the peer's chain view; when it is heavier than ours, start a
	/// fresh sync session by bisecting for the connection point, probing the
	/// peer's announced best first.
	fn on_status(&mut self, peer_index: PeerIndex, message: types::Status) {
		trace!(target: "sync", "Processing `status` with best number {} from peer#{}", message.best_number, peer_index);

		let advanced = match self.local_total_difficulty() {
			Some(local) => message.total_difficulty > local,
			None => true,
		};
		let peer_best = message.best_number;
		self.peers.set_status(peer_index, message);
		if !advanced {
			return;
		}

		info!(target: "sync", "Peer#{} is ahead at {}, searching for connection point", peer_index, peer_best);
		let (connection_point, probe) = {
			let session = self.peers.reset_session(peer_index);
			session.connection_point.start(peer_best);
			(session.connection_point.connection_point(), session.connection_point.probe())
		};
		if let Some(point) = connection_point {
			self.request_skeleton(peer_index, point);
		} else if let Some(height) = probe {
			self.request_block_hash(peer_index, height);
		}
	}

	/// Bisection step: the peer's hash at the probed height is either known
	/// locally or not. Once the interval collapses, walk the peer's skeleton
	/// from the connection point.
	fn on_block_hash_response(&mut self, peer_index: PeerIndex, message: types::BlockHashResponse) {
		trace!(target: "sync", "Processing `blockhashresponse` {} from peer#{}", message.id, peer_index);

		let known = self.storage.contains(&message.hash);
		let (connection_point, probe) = {
			let session = self.peers.session_mut(peer_index);
			if session.connection_point.probe().is_none() {
				trace!(target: "sync", "Ignoring `blockhashresponse` from peer#{}: no probe in flight", peer_index);
				return;
			}
			if known {
				session.connection_point.on_found();
			} else {
				session.connection_point.on_not_found();
			}
			(session.connection_point.connection_point(), session.connection_point.probe())
		};

		if let Some(point) = connection_point {
			info!(target: "sync", "Connection point with peer#{} is at height {}", peer_index, point);
			self.request_skeleton(peer_index, point);
		} else if let Some(height) = probe {
			self.request_block_hash(peer_index, height);
		}
	}

	/// Scan the skeleton for the first identifier above our best and request
	/// the headers covering the gap up to it. One outstanding header-range
	/// request per skeleton response.
	fn on_skeleton_response(&mut self, peer_index: PeerIndex, message: types::SkeletonResponse) {
		trace!(target: "sync", "Processing `skeletonresponse` {} with {} identifiers from peer#{}", message.id, message.identifiers.len(), peer_index);

		let local_best = self.local_best_number();
		let target = message.identifiers.iter()
			.find(|identifier| identifier.number > local_best)
			.cloned();
		self.peers.session_mut(peer_index).skeleton = message.identifiers;

		let target = match target {
			Some(target) => target,
			None => {
				trace!(target: "sync", "Skeleton from peer#{} has nothing above our best {}", peer_index, local_best);
				return;
			},
		};

		// one skeleton interval is the largest chunk requested at once
		let count = cmp::min(target.number - local_best, self.config.skeleton_step) as u32;
		let id = self.next_request_id();
		self.pending_headers.insert(id, peer_index, precise_time_s());
		self.executor.execute(Task::SendBlockHeadersRequest(peer_index, types::BlockHeadersRequest {
			id: id,
			hash: target.hash,
			count: count,
		}));
	}

	/// Headers arrive newest-first; fetch bodies oldest-first so delivered
	/// blocks connect to their already-stored parents. Responses with an
	/// unknown id or from the wrong sender are inert.
	fn on_block_headers_response(&mut self, peer_index: PeerIndex, message: types::BlockHeadersResponse) {
		trace!(target: "sync", "Processing `blockheadersresponse` {} with {} headers from peer#{}", message.id, message.headers.len(), peer_index);

		match self.pending_headers.get(message.id) {
			None => {
				trace!(target: "sync", "Discarding `blockheadersresponse` {} from peer#{}: unknown id", message.id, peer_index);
				return;
			},
			Some(&expected_peer) if expected_peer != peer_index => {
				trace!(target: "sync", "Discarding `blockheadersresponse` {} from peer#{}: expected peer#{}", message.id, peer_index, expected_peer);
				return;
			},
			Some(_) => (),
		}
		self.pending_headers.remove(message.id);

		let mut headers = message.headers;
		headers.sort_by(|left, right| left.number.cmp(&right.number));
		for header in headers {
			let hash = header.hash();
			if self.storage.contains(&hash) {
				continue;
			}
			let id = self.next_request_id();
			self.pending_bodies.insert(id, PendingBody {
				peer_index: peer_index,
				header: header,
			}, precise_time_s());
			self.executor.execute(Task::SendBodyRequest(peer_index, types::BodyRequest {
				id: id,
				hash: hash,
			}));
		}
	}

	/// Assemble the block from the recorded header and the delivered body,
	/// check the body against the header's declared roots, and hand it to
	/// storage. A response from the wrong sender leaves the entry in place:
	/// the real answer is still awaited.
	fn on_body_response(&mut self, peer_index: PeerIndex, message: types::BodyResponse) {
		trace!(target: "sync", "Processing `bodyresponse` {} from peer#{}", message.id, peer_index);

		let sender_matches = match self.pending_bodies.get(message.id) {
			None => {
				trace!(target: "sync", "Discarding `bodyresponse` {} from peer#{}: unknown id", message.id, peer_index);
				return;
			},
			Some(pending) => pending.peer_index == peer_index,
		};
		if !sender_matches {
			trace!(target: "sync", "Discarding `bodyresponse` {} from peer#{}: sender mismatch, still awaiting the recorded peer", message.id, peer_index);
			return;
		}
		let pending = match self.pending_bodies.remove(message.id) {
			Some(pending) => pending,
			None => return,
		};

		let block = Block::new(pending.header, message.transactions, message.uncles);
		let hash = block.hash();
		if !block.is_body_consistent() {
			warn!(target: "sync", "Discarding block {} from peer#{}: body does not match header roots", hash, peer_index);
			return;
		}

		let number = block.number();
		match self.storage.insert(block) {
			Ok(result) => trace!(target: "sync", "Connected synced block {} number {}: {:?}", hash, number, result),
			Err(error) => warn!(target: "sync", "Failed to connect synced block {} number {}: {}", hash, number, error),
		}
	}

	/// Forget the peer. Its outstanding requests are left to expire: their
	/// ids stay poisoned against late responses until the sweep drops them.
	fn on_disconnect(&mut self, peer_index: PeerIndex) {
		trace!(target: "sync", "Removing peer#{} from sync state", peer_index);
		self.peers.remove(peer_index);
	}
}
