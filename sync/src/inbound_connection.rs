use std::sync::Arc;
use message::types;
use local_node::LocalNode;
use synchronization_executor::TaskExecutor;
use types::PeerIndex;

/// The surface the transport delivers decoded per-peer messages through.
pub trait InboundSyncConnection: Send + Sync {
	fn on_status(&self, message: types::Status);
	fn on_new_block_hashes(&self, message: types::NewBlockHashes);
	fn on_get_block(&self, message: types::GetBlock);
	fn on_block(&self, message: types::Block);
	fn on_block_request(&self, message: types::BlockRequest);
	fn on_block_response(&self, message: types::BlockResponse);
	fn on_block_headers_request(&self, message: types::BlockHeadersRequest);
	fn on_block_headers_response(&self, message: types::BlockHeadersResponse);
	fn on_body_request(&self, message: types::BodyRequest);
	fn on_body_response(&self, message: types::BodyResponse);
	fn on_block_hash_request(&self, message: types::BlockHashRequest);
	fn on_block_hash_response(&self, message: types::BlockHashResponse);
	fn on_skeleton_request(&self, message: types::SkeletonRequest);
	fn on_skeleton_response(&self, message: types::SkeletonResponse);
	fn on_get_block_headers(&self, message: types::GetBlockHeaders);
	fn on_block_headers(&self, message: types::BlockHeaders);
}

/// Reference to the inbound connection of a single peer.
pub type InboundSyncConnectionRef = Box<dyn InboundSyncConnection>;

/// Adapts one peer's inbound message stream onto the local node.
pub struct InboundConnection<T: TaskExecutor> {
	/// Local node.
	local_node: Arc<LocalNode<T>>,
	/// Peer this connection belongs to.
	peer_index: PeerIndex,
}

impl<T> InboundConnection<T> where T: TaskExecutor {
	pub fn new(local_node: Arc<LocalNode<T>>, peer_index: PeerIndex) -> Self {
		InboundConnection {
			local_node: local_node,
			peer_index: peer_index,
		}
	}
}

impl<T> InboundSyncConnection for InboundConnection<T> where T: TaskExecutor + 'static {
	fn on_status(&self, message: types::Status) {
		self.local_node.on_peer_status(self.peer_index, message);
	}

	fn on_new_block_hashes(&self, message: types::NewBlockHashes) {
		self.local_node.on_peer_new_block_hashes(self.peer_index, message);
	}

	fn on_get_block(&self, message: types::GetBlock) {
		self.local_node.on_peer_get_block(self.peer_index, message);
	}

	fn on_block(&self, message: types::Block) {
		self.local_node.on_peer_block(self.peer_index, message);
	}

	fn on_block_request(&self, message: types::BlockRequest) {
		self.local_node.on_peer_block_request(self.peer_index, message);
	}

	fn on_block_response(&self, message: types::BlockResponse) {
		self.local_node.on_peer_block_response(self.peer_index, message);
	}

	fn on_block_headers_request(&self, message: types::BlockHeadersRequest) {
		self.local_node.on_peer_block_headers_request(self.peer_index, message);
	}

	fn on_block_headers_response(&self, message: types::BlockHeadersResponse) {
		self.local_node.on_peer_block_headers_response(self.peer_index, message);
	}

	fn on_body_request(&self, message: types::BodyRequest) {
		self.local_node.on_peer_body_request(self.peer_index, message);
	}

	fn on_body_response(&self, message: types::BodyResponse) {
		self.local_node.on_peer_body_response(self.peer_index, message);
	}

	fn on_block_hash_request(&self, message: types::BlockHashRequest) {
		self.local_node.on_peer_block_hash_request(self.peer_index, message);
	}

	fn on_block_hash_response(&self, message: types::BlockHashResponse) {
		self.local_node.on_peer_block_hash_response(self.peer_index, message);
	}

	fn on_skeleton_request(&self, message: types::SkeletonRequest) {
		self.local_node.on_peer_skeleton_request(self.peer_index, message);
	}

	fn on_skeleton_response(&self, message: types::SkeletonResponse) {
		self.local_node.on_peer_skeleton_response(self.peer_index, message);
	}

	fn on_get_block_headers(&self, message: types::GetBlockHeaders) {
		self.local_node.on_peer_get_block_headers(self.peer_index, message);
	}

	fn on_block_headers(&self, message: types::BlockHeaders) {
		self.local_node.on_peer_block_headers(self.peer_index, message);
	}
}
