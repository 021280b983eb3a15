use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::Mutex;
use message::types;
use types::PeerIndex;

/// Transport handle used to deliver outbound messages to a single peer.
/// Implemented by the networking layer; the sync crate only calls it.
pub trait OutboundSyncConnection: Send + Sync {
	fn send_status(&self, message: &types::Status);
	fn send_get_block(&self, message: &types::GetBlock);
	fn send_block(&self, message: &types::Block);
	fn send_block_response(&self, message: &types::BlockResponse);
	fn send_block_headers_request(&self, message: &types::BlockHeadersRequest);
	fn send_block_headers_response(&self, message: &types::BlockHeadersResponse);
	fn send_body_request(&self, message: &types::BodyRequest);
	fn send_body_response(&self, message: &types::BodyResponse);
	fn send_block_hash_request(&self, message: &types::BlockHashRequest);
	fn send_block_hash_response(&self, message: &types::BlockHashResponse);
	fn send_skeleton_request(&self, message: &types::SkeletonRequest);
	fn send_skeleton_response(&self, message: &types::SkeletonResponse);
	fn send_block_headers(&self, message: &types::BlockHeaders);
}

/// Reference to an outbound connection
pub type OutboundSyncConnectionRef = Arc<dyn OutboundSyncConnection>;

/// Synchronization task to be executed against a peer connection.
#[derive(Debug, PartialEq)]
pub enum Task {
	SendStatus(PeerIndex, types::Status),
	SendGetBlock(PeerIndex, types::GetBlock),
	SendBlock(PeerIndex, types::Block),
	SendBlockResponse(PeerIndex, types::BlockResponse),
	SendBlockHeadersRequest(PeerIndex, types::BlockHeadersRequest),
	SendBlockHeadersResponse(PeerIndex, types::BlockHeadersResponse),
	SendBodyRequest(PeerIndex, types::BodyRequest),
	SendBodyResponse(PeerIndex, types::BodyResponse),
	SendBlockHashRequest(PeerIndex, types::BlockHashRequest),
	SendBlockHashResponse(PeerIndex, types::BlockHashResponse),
	SendSkeletonRequest(PeerIndex, types::SkeletonRequest),
	SendSkeletonResponse(PeerIndex, types::SkeletonResponse),
	SendBlockHeaders(PeerIndex, types::BlockHeaders),
}

/// Synchronization tasks executor.
pub trait TaskExecutor: Send + Sync {
	fn execute(&self, task: Task);
	fn add_peer_connection(&self, peer_index: PeerIndex, connection: OutboundSyncConnectionRef);
	fn remove_peer_connection(&self, peer_index: PeerIndex);
}

/// Executor delivering tasks through registered peer connections. Tasks for
/// peers that have disconnected in the meantime are dropped.
#[derive(Default)]
pub struct LocalSynchronizationTaskExecutor {
	/// Active peer connections.
	peers: Mutex<HashMap<PeerIndex, OutboundSyncConnectionRef>>,
}

impl LocalSynchronizationTaskExecutor {
	pub fn new() -> Arc<Self> {
		Arc::new(LocalSynchronizationTaskExecutor::default())
	}
}

impl TaskExecutor for LocalSynchronizationTaskExecutor {
	fn execute(&self, task: Task) {
		let peers = self.peers.lock();
		macro_rules! deliver {
			($peer_index: expr, $message: expr, $send: ident, $name: expr) => {
				match peers.get(&$peer_index) {
					Some(connection) => {
						trace!(target: "sync", "Sending `{}` message to peer#{}", $name, $peer_index);
						connection.$send(&$message);
					},
					None => warn!(target: "sync", "Dropping `{}` message for unknown peer#{}", $name, $peer_index),
				}
			}
		}

		match task {
			Task::SendStatus(peer_index, message) => deliver!(peer_index, message, send_status, "status"),
			Task::SendGetBlock(peer_index, message) => deliver!(peer_index, message, send_get_block, "getblock"),
			Task::SendBlock(peer_index, message) => deliver!(peer_index, message, send_block, "block"),
			Task::SendBlockResponse(peer_index, message) => deliver!(peer_index, message, send_block_response, "blockresponse"),
			Task::SendBlockHeadersRequest(peer_index, message) => deliver!(peer_index, message, send_block_headers_request, "blockheadersrequest"),
			Task::SendBlockHeadersResponse(peer_index, message) => deliver!(peer_index, message, send_block_headers_response, "blockheadersresponse"),
			Task::SendBodyRequest(peer_index, message) => deliver!(peer_index, message, send_body_request, "bodyrequest"),
			Task::SendBodyResponse(peer_index, message) => deliver!(peer_index, message, send_body_response, "bodyresponse"),
			Task::SendBlockHashRequest(peer_index, message) => deliver!(peer_index, message, send_block_hash_request, "blockhashrequest"),
			Task::SendBlockHashResponse(peer_index, message) => deliver!(peer_index, message, send_block_hash_response, "blockhashresponse"),
			Task::SendSkeletonRequest(peer_index, message) => deliver!(peer_index, message, send_skeleton_request, "skeletonrequest"),
			Task::SendSkeletonResponse(peer_index, message) => deliver!(peer_index, message, send_skeleton_response, "skeletonresponse"),
			Task::SendBlockHeaders(peer_index, message) => deliver!(peer_index, message, send_block_headers, "blockheaders"),
		}
	}

	fn add_peer_connection(&self, peer_index: PeerIndex, connection: OutboundSyncConnectionRef) {
		self.peers.lock().insert(peer_index, connection);
	}

	fn remove_peer_connection(&self, peer_index: PeerIndex) {
		self.peers.lock().remove(&peer_index);
	}
}
