use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use message::types;
use config::Config;
use inbound_connection::{InboundConnection, InboundSyncConnectionRef};
use synchronization_client_core::{ClientCore, SynchronizationClientCore};
use synchronization_executor::{OutboundSyncConnectionRef, Task, TaskExecutor};
use synchronization_manager::ManagementWorker;
use synchronization_server::{Server, ServeOutcome, SynchronizationServer};
use types::{ExecutorRef, PeerIndex, StorageRef};

/// Sync coordinator: owns the passive request server and the active sync
/// driver, assigns peer indexes, and routes every inbound message to the
/// component that handles it. Constructed once at node startup.
pub struct LocalNode<T: TaskExecutor> {
	/// Throughout counter of sync peers.
	peer_counter: AtomicUsize,
	/// Task executor.
	executor: ExecutorRef<T>,
	/// Passive request server.
	server: SynchronizationServer<T>,
	/// Active sync driver, shared with the management worker.
	client: Arc<Mutex<SynchronizationClientCore<T>>>,
	/// Pending-request expiry sweeps run for the node's whole lifetime.
	_management: ManagementWorker,
}

impl<T> LocalNode<T> where T: TaskExecutor + 'static {
	pub fn new(storage: StorageRef, config: Config, executor: ExecutorRef<T>) -> Self {
		let server = SynchronizationServer::new(storage.clone(), config.clone(), executor.clone());
		let client = Arc::new(Mutex::new(SynchronizationClientCore::new(storage, config, executor.clone())));
		let management = ManagementWorker::new(client.clone());
		LocalNode {
			peer_counter: AtomicUsize::new(0),
			executor: executor,
			server: server,
			client: client,
			_management: management,
		}
	}

	/// Register a freshly connected peer: assign it an index, remember its
	/// outbound handle, greet it with our status, and hand the transport the
	/// surface to deliver its messages through.
	pub fn create_sync_session(local_node: &Arc<LocalNode<T>>, outbound: OutboundSyncConnectionRef) -> InboundSyncConnectionRef {
		let peer_index = local_node.peer_counter.fetch_add(1, Ordering::SeqCst) + 1;
		trace!(target: "sync", "Starting new sync session with peer#{}", peer_index);
		local_node.executor.add_peer_connection(peer_index, outbound);
		local_node.send_status(peer_index);
		Box::new(InboundConnection::new(local_node.clone(), peer_index))
	}

	/// Peer has disconnected: drop its outbound handle and sync state. Its
	/// outstanding requests are left for the management sweep.
	pub fn on_peer_disconnected(&self, peer_index: PeerIndex) {
		trace!(target: "sync", "Peer#{} has disconnected", peer_index);
		self.executor.remove_peer_connection(peer_index);
		self.server.on_peer_disconnected(peer_index);
		self.client.lock().on_disconnect(peer_index);
	}

	/// Announce our chain view to the peer.
	fn send_status(&self, peer_index: PeerIndex) {
		let best_hash = match self.server.best_block_hash() {
			Some(hash) => hash,
			// nothing to announce from an empty store
			None => return,
		};
		self.executor.execute(Task::SendStatus(peer_index, types::Status {
			best_hash: best_hash,
			best_number: self.server.best_block_number(),
			total_difficulty: self.server.total_difficulty(),
		}));
	}

	// status feeds both sides: the server pushes blocks the peer is
	// missing, the driver decides whether to start active sync

	pub fn on_peer_status(&self, peer_index: PeerIndex, message: types::Status) {
		self.server.on_status(peer_index, message.clone());
		self.client.lock().on_status(peer_index, message);
	}

	pub fn on_peer_new_block_hashes(&self, peer_index: PeerIndex, message: types::NewBlockHashes) {
		self.server.on_new_block_hashes(peer_index, message);
	}

	pub fn on_peer_get_block(&self, peer_index: PeerIndex, message: types::GetBlock) -> ServeOutcome {
		self.server.on_get_block(peer_index, message)
	}

	pub fn on_peer_block(&self, peer_index: PeerIndex, message: types::Block) {
		self.server.on_block(peer_index, message);
	}

	pub fn on_peer_block_request(&self, peer_index: PeerIndex, message: types::BlockRequest) -> ServeOutcome {
		self.server.on_block_request(peer_index, message)
	}

	/// A block delivered in response to an explicit request is processed
	/// the same way an unsolicited one is.
	pub fn on_peer_block_response(&self, peer_index: PeerIndex, message: types::BlockResponse) {
		self.server.on_block(peer_index, types::Block {
			block: message.block,
		});
	}

	pub fn on_peer_block_headers_request(&self, peer_index: PeerIndex, message: types::BlockHeadersRequest) -> ServeOutcome {
		self.server.on_block_headers_request(peer_index, message)
	}

	pub fn on_peer_block_headers_response(&self, peer_index: PeerIndex, message: types::BlockHeadersResponse) {
		self.client.lock().on_block_headers_response(peer_index, message);
	}

	pub fn on_peer_body_request(&self, peer_index: PeerIndex, message: types::BodyRequest) -> ServeOutcome {
		self.server.on_body_request(peer_index, message)
	}

	pub fn on_peer_body_response(&self, peer_index: PeerIndex, message: types::BodyResponse) {
		self.client.lock().on_body_response(peer_index, message);
	}

	pub fn on_peer_block_hash_request(&self, peer_index: PeerIndex, message: types::BlockHashRequest) -> ServeOutcome {
		self.server.on_block_hash_request(peer_index, message)
	}

	pub fn on_peer_block_hash_response(&self, peer_index: PeerIndex, message: types::BlockHashResponse) {
		self.client.lock().on_block_hash_response(peer_index, message);
	}

	pub fn on_peer_skeleton_request(&self, peer_index: PeerIndex, message: types::SkeletonRequest) -> ServeOutcome {
		self.server.on_skeleton_request(peer_index, message)
	}

	pub fn on_peer_skeleton_response(&self, peer_index: PeerIndex, message: types::SkeletonResponse) {
		self.client.lock().on_skeleton_response(peer_index, message);
	}

	pub fn on_peer_get_block_headers(&self, peer_index: PeerIndex, message: types::GetBlockHeaders) -> ServeOutcome {
		self.server.on_get_block_headers(peer_index, message)
	}

	pub fn on_peer_block_headers(&self, peer_index: PeerIndex, message: types::BlockHeaders) {
		self.server.on_block_headers(peer_index, message);
	}

	// node-level chain view, forwarded to the server's storage plumbing

	pub fn best_block_number(&self) -> u64 {
		self.server.best_block_number()
	}

	pub fn has_better_block_to_sync(&self) -> bool {
		self.server.has_better_block_to_sync()
	}

	pub fn is_syncing_blocks(&self) -> bool {
		self.server.is_syncing_blocks()
	}

	pub fn accept_any_block(&self) {
		self.server.accept_any_block()
	}

	pub fn peers_count(&self) -> usize {
		self.client.lock().peers_count()
	}

	pub fn advanced_peers_count(&self) -> usize {
		self.client.lock().advanced_peers_count()
	}
}
