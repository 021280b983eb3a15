use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use parking_lot::Mutex;
use chain::{Block, BlockHeader, BlockIdentifier};
use chain::uint::U256;
use message::common::BlockRef;
use message::types;
use primitives::hash::H256;
use config::Config;
use pending_blocks_pool::PendingBlocksPool;
use synchronization_executor::{Task, TaskExecutor};
use synchronization_peers::BlockKnowledge;
use types::{ExecutorRef, PeerIndex, StorageRef};

/// Unsolicited blocks reaching further than this above our best are dropped
/// (unless `accept_any_block` is set) so a peer cannot flood the pending
/// pool with unverifiable far-future blocks.
const MAX_PENDING_BLOCK_DISTANCE: u64 = 1024;
/// The node counts as actively syncing while the best announced height is
/// this far above the local best.
const SYNCING_DISTANCE: u64 = 24;

/// What a request handler did with an inbound request. Protocol errors never
/// raise; "answer with nothing" is an explicit outcome, not an accident.
#[derive(Debug, PartialEq)]
pub enum ServeOutcome {
	/// A response message was sent.
	Responded,
	/// The request was silently ignored (unknown data, unsupported
	/// parameters). No message is sent: empty responses waste bandwidth.
	Ignored,
}

/// Inbound message handler: answers peer requests from local storage and
/// reacts to unsolicited announcements. Handlers never block and never
/// retry; each call handles exactly one message.
pub trait Server {
	fn on_status(&self, peer_index: PeerIndex, message: types::Status);
	fn on_new_block_hashes(&self, peer_index: PeerIndex, message: types::NewBlockHashes);
	fn on_block_headers(&self, peer_index: PeerIndex, message: types::BlockHeaders);
	fn on_block(&self, peer_index: PeerIndex, message: types::Block);
	fn on_get_block(&self, peer_index: PeerIndex, message: types::GetBlock) -> ServeOutcome;
	fn on_block_request(&self, peer_index: PeerIndex, message: types::BlockRequest) -> ServeOutcome;
	fn on_block_headers_request(&self, peer_index: PeerIndex, message: types::BlockHeadersRequest) -> ServeOutcome;
	fn on_body_request(&self, peer_index: PeerIndex, message: types::BodyRequest) -> ServeOutcome;
	fn on_block_hash_request(&self, peer_index: PeerIndex, message: types::BlockHashRequest) -> ServeOutcome;
	fn on_skeleton_request(&self, peer_index: PeerIndex, message: types::SkeletonRequest) -> ServeOutcome;
	fn on_get_block_headers(&self, peer_index: PeerIndex, message: types::GetBlockHeaders) -> ServeOutcome;
}

/// Synchronization server implementation.
pub struct SynchronizationServer<T: TaskExecutor> {
	/// Storage reference.
	storage: StorageRef,
	/// Executor reference.
	executor: ExecutorRef<T>,
	/// Blocks (and requested headers) that cannot be connected yet.
	pool: Mutex<PendingBlocksPool>,
	/// Which peers are known to have which blocks.
	knowledge: Mutex<BlockKnowledge>,
	/// Highest block number any peer has ever announced.
	last_known_block: AtomicU64,
	/// Accept unsolicited blocks regardless of their height.
	accept_any_block: AtomicBool,
	/// Configuration.
	config: Config,
}

impl<T> SynchronizationServer<T> where T: TaskExecutor {
	pub fn new(storage: StorageRef, config: Config, executor: ExecutorRef<T>) -> Self {
		SynchronizationServer {
			storage: storage,
			executor: executor,
			pool: Mutex::new(PendingBlocksPool::new()),
			knowledge: Mutex::new(BlockKnowledge::new()),
			last_known_block: AtomicU64::new(0),
			accept_any_block: AtomicBool::new(false),
			config: config,
		}
	}

	/// Is the block in the pending pool or on any stored chain?
	pub fn has_block(&self, hash: &H256) -> bool {
		self.pool.lock().contains_block(hash) || self.storage.contains(hash)
	}

	pub fn best_block_number(&self) -> u64 {
		self.storage.best_block().map(|best| best.number).unwrap_or_default()
	}

	pub fn best_block_hash(&self) -> Option<H256> {
		self.storage.best_block().map(|best| best.hash)
	}

	pub fn total_difficulty(&self) -> U256 {
		self.storage.total_difficulty()
	}

	/// Highest block number any peer has ever announced.
	pub fn last_known_block_number(&self) -> u64 {
		self.last_known_block.load(Ordering::SeqCst)
	}

	/// Is some peer known to have a chain reaching higher than ours?
	pub fn has_better_block_to_sync(&self) -> bool {
		self.last_known_block_number() > self.best_block_number()
	}

	pub fn is_syncing_blocks(&self) -> bool {
		self.last_known_block_number() > self.best_block_number() + SYNCING_DISTANCE
	}

	/// Accept unsolicited blocks regardless of their height. Used during
	/// initial import, when everything is far ahead of the local best.
	pub fn accept_any_block(&self) {
		self.accept_any_block.store(true, Ordering::SeqCst);
	}

	/// Peer is gone; stop tracking which blocks it has.
	pub fn on_peer_disconnected(&self, peer_index: PeerIndex) {
		self.knowledge.lock().forget_peer(peer_index);
	}

	/// Legacy single-header request: headers for `hash` itself only.
	pub fn on_get_block_headers_by_hash(&self, peer_index: PeerIndex, hash: H256) -> ServeOutcome {
		self.on_get_block_headers(peer_index, types::GetBlockHeaders {
			block: BlockRef::Hash(hash),
			max_headers: 1,
			skip: 0,
			reverse: false,
		})
	}

	#[cfg(test)]
	pub fn knowledge_peers_for(&self, hash: &H256) -> Vec<PeerIndex> {
		self.knowledge.lock().peers_for(hash)
	}

	/// Block lookup convention: pending store first, canonical/side chains
	/// second.
	fn block_from_pool_or_chain(&self, hash: &H256) -> Option<Block> {
		self.pool.lock().block(hash).or_else(|| self.storage.block(hash))
	}

	fn has_header(&self, hash: &H256) -> bool {
		self.has_block(hash) || self.pool.lock().contains_header(hash)
	}

	fn raise_last_known_block(&self, number: u64) {
		self.last_known_block.fetch_max(number, Ordering::SeqCst);
	}

	/// Walk `skip` parent links down from `block`.
	fn skip_blocks(&self, block: Block, skip: u32) -> Option<Block> {
		let mut current = block;
		for _ in 0..skip {
			current = match self.block_from_pool_or_chain(current.parent_hash()) {
				Some(parent) => parent,
				None => return None,
			};
		}
		Some(current)
	}

	/// Connect a block whose parent is stored, then drain every pending
	/// block that has become connectable.
	fn connect_block(&self, block: Block) {
		let hash = block.hash();
		let number = block.number();
		match self.storage.insert(block) {
			Ok(result) => trace!(target: "sync", "Inserted block {} number {}: {:?}", hash, number, result),
			Err(error) => {
				warn!(target: "sync", "Failed to insert block {} number {}: {}", hash, number, error);
				return;
			},
		}

		let connectable = self.pool.lock().remove_blocks_for_parent(&hash);
		for pending_block in connectable {
			let pending_hash = pending_block.hash();
			match self.storage.insert(pending_block) {
				Ok(result) => trace!(target: "sync", "Connected pending block {}: {:?}", pending_hash, result),
				Err(error) => warn!(target: "sync", "Failed to connect pending block {}: {}", pending_hash, error),
			}
		}
	}
}

impl<T> Server for SynchronizationServer<T> where T: TaskExecutor {
	/// React to a peer's status: fetch its best block if unknown, then
	/// proactively push the canonical blocks the peer is missing, bounded
	/// by `blocks_for_peers`.
	fn on_status(&self, peer_index: PeerIndex, message: types::Status) {
		trace!(target: "sync", "Processing `status` with best number {} from peer#{}", message.best_number, peer_index);

		self.knowledge.lock().insert(message.best_hash.clone(), peer_index);

		if !self.has_block(&message.best_hash) {
			self.executor.execute(Task::SendGetBlock(peer_index, types::GetBlock {
				hash: message.best_hash.clone(),
			}));
		}

		self.raise_last_known_block(message.best_number);

		let best_number = match self.storage.best_block() {
			Some(best) => best.number,
			None => return,
		};
		let push_end = message.best_number.saturating_add(self.config.blocks_for_peers);
		let mut number = message.best_number;
		while number <= best_number && number < push_end {
			if let Some(block) = self.storage.block_at(number) {
				let hash = block.hash();
				let already_known = self.knowledge.lock().is_known_by(&hash, peer_index);
				if !already_known {
					trace!(target: "sync", "Pushing block {} to peer#{}", number, peer_index);
					self.knowledge.lock().insert(hash, peer_index);
					self.executor.execute(Task::SendBlock(peer_index, types::Block {
						block: block,
					}));
				}
			}
			number += 1;
		}
	}

	/// Request every announced block we do not have yet, once per distinct
	/// hash.
	fn on_new_block_hashes(&self, peer_index: PeerIndex, message: types::NewBlockHashes) {
		trace!(target: "sync", "Processing `newblockhashes` with {} identifiers from peer#{}", message.identifiers.len(), peer_index);

		let mut seen: Vec<H256> = Vec::new();
		for identifier in message.identifiers {
			if seen.contains(&identifier.hash) {
				continue;
			}
			seen.push(identifier.hash.clone());

			if self.has_block(&identifier.hash) {
				continue;
			}
			self.knowledge.lock().insert(identifier.hash.clone(), peer_index);
			self.executor.execute(Task::SendGetBlock(peer_index, types::GetBlock {
				hash: identifier.hash,
			}));
		}
	}

	/// Request the full block behind every unknown announced header,
	/// remembering the header so duplicate announcements stay quiet.
	fn on_block_headers(&self, peer_index: PeerIndex, message: types::BlockHeaders) {
		trace!(target: "sync", "Processing `blockheaders` with {} headers from peer#{}", message.headers.len(), peer_index);

		let mut headers = message.headers;
		// process in ascending block order, whatever the wire order was
		headers.sort_by(|left, right| left.number.cmp(&right.number));

		for header in headers {
			let hash = header.hash();
			if self.has_header(&hash) {
				continue;
			}
			self.executor.execute(Task::SendGetBlock(peer_index, types::GetBlock {
				hash: hash,
			}));
			self.pool.lock().insert_header(header);
		}
	}

	/// Unsolicited block: connect it if its parent is stored, otherwise
	/// stash it and ask the sender for the parent.
	fn on_block(&self, peer_index: PeerIndex, message: types::Block) {
		let block = message.block;
		let hash = block.hash();
		trace!(target: "sync", "Processing `block` {} number {} from peer#{}", hash, block.number(), peer_index);

		self.knowledge.lock().insert(hash.clone(), peer_index);
		self.raise_last_known_block(block.number());

		if self.has_block(&hash) {
			return;
		}

		if !self.accept_any_block.load(Ordering::SeqCst)
			&& block.number() > self.best_block_number().saturating_add(MAX_PENDING_BLOCK_DISTANCE) {
			warn!(target: "sync", "Ignoring block {} number {} from peer#{}: too far above best", hash, block.number(), peer_index);
			return;
		}

		let parent_stored = block.number() == 0 || self.storage.contains(block.parent_hash());
		if parent_stored {
			self.connect_block(block);
		} else {
			let parent_hash = block.parent_hash().clone();
			self.pool.lock().insert_block(block);
			self.executor.execute(Task::SendGetBlock(peer_index, types::GetBlock {
				hash: parent_hash,
			}));
		}
	}

	fn on_get_block(&self, peer_index: PeerIndex, message: types::GetBlock) -> ServeOutcome {
		trace!(target: "sync", "Processing `getblock` {} from peer#{}", message.hash, peer_index);

		let block = match self.block_from_pool_or_chain(&message.hash) {
			Some(block) => block,
			None => return ServeOutcome::Ignored,
		};
		self.knowledge.lock().insert(message.hash, peer_index);
		self.executor.execute(Task::SendBlock(peer_index, types::Block {
			block: block,
		}));
		ServeOutcome::Responded
	}

	fn on_block_request(&self, peer_index: PeerIndex, message: types::BlockRequest) -> ServeOutcome {
		trace!(target: "sync", "Processing `blockrequest` {} {} from peer#{}", message.id, message.hash, peer_index);

		let block = match self.block_from_pool_or_chain(&message.hash) {
			Some(block) => block,
			None => return ServeOutcome::Ignored,
		};
		self.knowledge.lock().insert(message.hash, peer_index);
		self.executor.execute(Task::SendBlockResponse(peer_index, types::BlockResponse {
			id: message.id,
			block: block,
		}));
		ServeOutcome::Responded
	}

	/// Up to `count` headers starting at `hash`, walking parent links,
	/// stopping early when an ancestor is missing.
	fn on_block_headers_request(&self, peer_index: PeerIndex, message: types::BlockHeadersRequest) -> ServeOutcome {
		trace!(target: "sync", "Processing `blockheadersrequest` {} {} from peer#{}", message.id, message.hash, peer_index);

		let block = match self.block_from_pool_or_chain(&message.hash) {
			Some(block) => block,
			None => return ServeOutcome::Ignored,
		};

		let mut headers: Vec<BlockHeader> = vec![block.header().clone()];
		let mut current = block;
		for _ in 1..message.count {
			current = match self.block_from_pool_or_chain(current.parent_hash()) {
				Some(parent) => parent,
				None => break,
			};
			headers.push(current.header().clone());
		}

		self.executor.execute(Task::SendBlockHeadersResponse(peer_index, types::BlockHeadersResponse {
			id: message.id,
			headers: headers,
		}));
		ServeOutcome::Responded
	}

	fn on_body_request(&self, peer_index: PeerIndex, message: types::BodyRequest) -> ServeOutcome {
		trace!(target: "sync", "Processing `bodyrequest` {} {} from peer#{}", message.id, message.hash, peer_index);

		let block = match self.block_from_pool_or_chain(&message.hash) {
			Some(block) => block,
			None => return ServeOutcome::Ignored,
		};
		self.executor.execute(Task::SendBodyResponse(peer_index, types::BodyResponse {
			id: message.id,
			transactions: block.transactions,
			uncles: block.uncles,
		}));
		ServeOutcome::Responded
	}

	/// Canonical chain only: pending blocks have no height assigned yet.
	fn on_block_hash_request(&self, peer_index: PeerIndex, message: types::BlockHashRequest) -> ServeOutcome {
		trace!(target: "sync", "Processing `blockhashrequest` {} {} from peer#{}", message.id, message.height, peer_index);

		let hash = match self.storage.block_hash(message.height) {
			Some(hash) => hash,
			None => return ServeOutcome::Ignored,
		};
		self.executor.execute(Task::SendBlockHashResponse(peer_index, types::BlockHashResponse {
			id: message.id,
			hash: hash,
		}));
		ServeOutcome::Responded
	}

	/// Identifiers at every multiple of `skeleton_step` from the aligned
	/// base below `start_number` up to best, terminated by the best block
	/// itself so the requester always learns our head.
	fn on_skeleton_request(&self, peer_index: PeerIndex, message: types::SkeletonRequest) -> ServeOutcome {
		trace!(target: "sync", "Processing `skeletonrequest` {} {} from peer#{}", message.id, message.start_number, peer_index);

		let best = match self.storage.best_block() {
			Some(best) => best,
			None => return ServeOutcome::Ignored,
		};
		if self.storage.block_at(message.start_number).is_none() {
			return ServeOutcome::Ignored;
		}

		let step = self.config.skeleton_step;
		let mut identifiers: Vec<BlockIdentifier> = Vec::new();
		let mut number = (message.start_number / step) * step;
		while number < best.number {
			match self.storage.block_hash(number) {
				Some(hash) => identifiers.push(BlockIdentifier::new(hash, number)),
				None => {
					// cannot happen for heights below best; bail out rather
					// than serve a skeleton with holes
					warn!(target: "sync", "Canonical chain has no block at {} while serving skeleton", number);
					break;
				},
			}
			number += step;
		}
		identifiers.push(BlockIdentifier::new(best.hash, best.number));

		self.executor.execute(Task::SendSkeletonResponse(peer_index, types::SkeletonResponse {
			id: message.id,
			identifiers: identifiers,
		}));
		ServeOutcome::Responded
	}

	/// Ethereum-style header range walk: emit a header, skip `skip`
	/// ancestors, repeat up to `max_headers` times. Reverse traversal is
	/// not implemented; such requests are ignored, never served wrong.
	fn on_get_block_headers(&self, peer_index: PeerIndex, message: types::GetBlockHeaders) -> ServeOutcome {
		trace!(target: "sync", "Processing `getblockheaders` from peer#{}", peer_index);

		if message.reverse {
			warn!(target: "sync", "Reverse header traversal requested by peer#{} is not implemented", peer_index);
			return ServeOutcome::Ignored;
		}

		let mut block = match message.block {
			BlockRef::Hash(hash) => self.block_from_pool_or_chain(&hash),
			BlockRef::Number(number) => self.storage.block_at(number),
		};

		let mut headers: Vec<BlockHeader> = Vec::new();
		for _ in 0..message.max_headers {
			let current = match block {
				Some(current) => current,
				None => break,
			};
			headers.push(current.header().clone());

			block = match self.skip_blocks(current, message.skip) {
				Some(skipped) => self.block_from_pool_or_chain(skipped.parent_hash()),
				None => None,
			};
		}

		if headers.is_empty() {
			return ServeOutcome::Ignored;
		}
		self.executor.execute(Task::SendBlockHeaders(peer_index, types::BlockHeaders {
			headers: headers,
		}));
		ServeOutcome::Responded
	}
}

#[cfg(test)]
pub mod tests {
	use std::sync::Arc;
	use chain::{Block, BlockIdentifier};
	use chain::uint::U256;
	use db::{self, Store};
	use message::common::BlockRef;
	use message::types;
	use primitives::hash::H256;
	use config::Config;
	use synchronization_executor::Task;
	use synchronization_executor::tests::DummyTaskExecutor;
	use super::{Server, ServeOutcome, SynchronizationServer};

	fn create_server(blocks: &[Block]) -> (Arc<DummyTaskExecutor>, Arc<db::MemoryStore>, SynchronizationServer<DummyTaskExecutor>) {
		let storage = Arc::new(db::MemoryStore::with_blocks(blocks));
		let executor = Arc::new(DummyTaskExecutor::default());
		let server = SynchronizationServer::new(storage.clone(), Config::default(), executor.clone());
		(executor, storage, server)
	}

	fn status_for(block: &Block) -> types::Status {
		types::Status {
			best_hash: block.hash(),
			best_number: block.number(),
			total_difficulty: U256::from(block.number() + 1),
		}
	}

	#[test]
	fn test_new_block_hashes_requests_each_unknown_once() {
		let blocks = db::devtools::build_chain(3);
		let (executor, _, server) = create_server(&blocks[..2]);

		let unknown = blocks[2].hash();
		server.on_new_block_hashes(1, types::NewBlockHashes {
			identifiers: vec![
				BlockIdentifier::new(blocks[1].hash(), 1),
				BlockIdentifier::new(unknown.clone(), 2),
				BlockIdentifier::new(unknown.clone(), 2),
			],
		});

		let tasks = executor.take_tasks();
		assert_eq!(tasks, vec![Task::SendGetBlock(1, types::GetBlock { hash: unknown.clone() })]);
		assert_eq!(server.knowledge_peers_for(&unknown), vec![1]);
	}

	#[test]
	fn test_block_headers_processed_in_ascending_order() {
		let blocks = db::devtools::build_chain(4);
		let (executor, _, server) = create_server(&blocks[..1]);

		server.on_block_headers(1, types::BlockHeaders {
			headers: vec![
				blocks[3].header().clone(),
				blocks[1].header().clone(),
				blocks[2].header().clone(),
			],
		});

		let tasks = executor.take_tasks();
		assert_eq!(tasks, vec![
			Task::SendGetBlock(1, types::GetBlock { hash: blocks[1].hash() }),
			Task::SendGetBlock(1, types::GetBlock { hash: blocks[2].hash() }),
			Task::SendGetBlock(1, types::GetBlock { hash: blocks[3].hash() }),
		]);

		// placeholder headers suppress duplicate requests
		server.on_block_headers(1, types::BlockHeaders {
			headers: vec![blocks[2].header().clone()],
		});
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_status_pushes_missing_blocks() {
		let blocks = db::devtools::build_chain(6);
		let storage = Arc::new(db::MemoryStore::with_blocks(&blocks));
		let executor = Arc::new(DummyTaskExecutor::default());
		let config = Config {
			blocks_for_peers: 2,
			..Config::default()
		};
		let server = SynchronizationServer::new(storage, config, executor.clone());

		// peer is at height 2 on a fork we do not know
		let fork = db::devtools::extend(&blocks[1], 1, 7, 1);
		let status = types::Status {
			best_hash: fork[0].hash(),
			best_number: 2,
			total_difficulty: U256::from(3u64),
		};
		server.on_status(1, status);

		let tasks = executor.take_tasks();
		assert_eq!(tasks, vec![
			Task::SendGetBlock(1, types::GetBlock { hash: fork[0].hash() }),
			Task::SendBlock(1, types::Block { block: blocks[2].clone() }),
			Task::SendBlock(1, types::Block { block: blocks[3].clone() }),
		]);
		assert_eq!(server.knowledge_peers_for(&blocks[2].hash()), vec![1]);
		assert_eq!(server.last_known_block_number(), 2);
	}

	#[test]
	fn test_status_with_known_best_is_silent() {
		let blocks = db::devtools::build_chain(3);
		let (executor, _, server) = create_server(&blocks);

		server.on_status(1, status_for(&blocks[2]));

		// peer already has our best: nothing to fetch, nothing to push
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_status_does_not_repush_known_blocks() {
		let blocks = db::devtools::build_chain(6);
		let (executor, _, server) = create_server(&blocks);

		server.on_status(1, status_for(&blocks[2]));

		// the announced best itself is known to the peer, everything above
		// gets pushed once
		assert_eq!(executor.take_tasks(), vec![
			Task::SendBlock(1, types::Block { block: blocks[3].clone() }),
			Task::SendBlock(1, types::Block { block: blocks[4].clone() }),
			Task::SendBlock(1, types::Block { block: blocks[5].clone() }),
		]);

		// a re-announced status pushes nothing again
		server.on_status(1, status_for(&blocks[2]));
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_get_block_for_unknown_hash_is_silent() {
		let blocks = db::devtools::build_chain(1);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_get_block(1, types::GetBlock { hash: H256::from(0x77) });
		assert_eq!(outcome, ServeOutcome::Ignored);
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_block_request_echoes_request_id() {
		let blocks = db::devtools::build_chain(2);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_block_request(1, types::BlockRequest { id: 7, hash: blocks[1].hash() });
		assert_eq!(outcome, ServeOutcome::Responded);
		assert_eq!(executor.take_tasks(), vec![
			Task::SendBlockResponse(1, types::BlockResponse { id: 7, block: blocks[1].clone() }),
		]);
	}

	#[test]
	fn test_block_headers_request_stops_at_missing_ancestor() {
		let blocks = db::devtools::build_chain(5);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_block_headers_request(1, types::BlockHeadersRequest {
			id: 3,
			hash: blocks[3].hash(),
			count: 10,
		});
		assert_eq!(outcome, ServeOutcome::Responded);

		let tasks = executor.take_tasks();
		match tasks.as_slice() {
			&[Task::SendBlockHeadersResponse(1, ref response)] => {
				assert_eq!(response.id, 3);
				let numbers: Vec<_> = response.headers.iter().map(|header| header.number).collect();
				assert_eq!(numbers, vec![3, 2, 1, 0]);
			},
			other => panic!("unexpected tasks: {:?}", other),
		}
	}

	#[test]
	fn test_body_request_served_from_storage() {
		let blocks = db::devtools::build_chain(2);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_body_request(1, types::BodyRequest { id: 5, hash: blocks[1].hash() });
		assert_eq!(outcome, ServeOutcome::Responded);
		assert_eq!(executor.take_tasks(), vec![
			Task::SendBodyResponse(1, types::BodyResponse {
				id: 5,
				transactions: blocks[1].transactions.clone(),
				uncles: blocks[1].uncles.clone(),
			}),
		]);
	}

	#[test]
	fn test_block_hash_request_is_canonical_only() {
		let blocks = db::devtools::build_chain(3);
		let (executor, _, server) = create_server(&blocks);

		assert_eq!(server.on_block_hash_request(1, types::BlockHashRequest { id: 1, height: 2 }), ServeOutcome::Responded);
		assert_eq!(executor.take_tasks(), vec![
			Task::SendBlockHashResponse(1, types::BlockHashResponse { id: 1, hash: blocks[2].hash() }),
		]);

		assert_eq!(server.on_block_hash_request(1, types::BlockHashRequest { id: 2, height: 100 }), ServeOutcome::Ignored);
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_skeleton_response_shape() {
		// local best = 300, step = 192, start = 250 => base 192, then best
		let blocks = db::devtools::build_chain(301);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_skeleton_request(1, types::SkeletonRequest { id: 4, start_number: 250 });
		assert_eq!(outcome, ServeOutcome::Responded);

		let tasks = executor.take_tasks();
		match tasks.as_slice() {
			&[Task::SendSkeletonResponse(1, ref response)] => {
				assert_eq!(response.id, 4);
				assert_eq!(response.identifiers, vec![
					BlockIdentifier::new(blocks[192].hash(), 192),
					BlockIdentifier::new(blocks[300].hash(), 300),
				]);
			},
			other => panic!("unexpected tasks: {:?}", other),
		}
	}

	#[test]
	fn test_skeleton_request_above_best_is_silent() {
		let blocks = db::devtools::build_chain(10);
		let (executor, _, server) = create_server(&blocks);

		assert_eq!(server.on_skeleton_request(1, types::SkeletonRequest { id: 4, start_number: 100 }), ServeOutcome::Ignored);
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_skeleton_always_ends_with_best_block() {
		let blocks = db::devtools::build_chain(200);
		let (executor, _, server) = create_server(&blocks);

		// start = best: only the base step and the best block itself
		server.on_skeleton_request(1, types::SkeletonRequest { id: 4, start_number: 199 });
		let tasks = executor.take_tasks();
		match tasks.as_slice() {
			&[Task::SendSkeletonResponse(1, ref response)] => {
				assert_eq!(response.identifiers, vec![
					BlockIdentifier::new(blocks[192].hash(), 192),
					BlockIdentifier::new(blocks[199].hash(), 199),
				]);
			},
			other => panic!("unexpected tasks: {:?}", other),
		}
	}

	#[test]
	fn test_get_block_headers_with_skip() {
		let blocks = db::devtools::build_chain(10);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_get_block_headers(1, types::GetBlockHeaders {
			block: BlockRef::Number(9),
			max_headers: 3,
			skip: 1,
			reverse: false,
		});
		assert_eq!(outcome, ServeOutcome::Responded);

		let tasks = executor.take_tasks();
		match tasks.as_slice() {
			&[Task::SendBlockHeaders(1, ref response)] => {
				let numbers: Vec<_> = response.headers.iter().map(|header| header.number).collect();
				assert_eq!(numbers, vec![9, 7, 5]);
			},
			other => panic!("unexpected tasks: {:?}", other),
		}
	}

	#[test]
	fn test_single_hash_header_request_yields_one_header() {
		let blocks = db::devtools::build_chain(4);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_get_block_headers_by_hash(1, blocks[2].hash());
		assert_eq!(outcome, ServeOutcome::Responded);

		let tasks = executor.take_tasks();
		match tasks.as_slice() {
			&[Task::SendBlockHeaders(1, ref response)] => {
				assert_eq!(response.headers, vec![blocks[2].header().clone()]);
			},
			other => panic!("unexpected tasks: {:?}", other),
		}
	}

	#[test]
	fn test_get_block_headers_reverse_is_unsupported() {
		let blocks = db::devtools::build_chain(10);
		let (executor, _, server) = create_server(&blocks);

		let outcome = server.on_get_block_headers(1, types::GetBlockHeaders {
			block: BlockRef::Number(9),
			max_headers: 3,
			skip: 0,
			reverse: true,
		});
		assert_eq!(outcome, ServeOutcome::Ignored);
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_unsolicited_block_with_unknown_parent_is_stashed() {
		let blocks = db::devtools::build_chain(3);
		let (executor, storage, server) = create_server(&blocks[..1]);

		server.on_block(1, types::Block { block: blocks[2].clone() });

		// stashed, and the missing parent requested from the sender
		assert!(server.has_block(&blocks[2].hash()));
		assert!(!storage.contains(&blocks[2].hash()));
		assert_eq!(executor.take_tasks(), vec![
			Task::SendGetBlock(1, types::GetBlock { hash: blocks[1].hash() }),
		]);

		// the parent arrives; both blocks get connected
		server.on_block(1, types::Block { block: blocks[1].clone() });
		assert_eq!(storage.best_block().unwrap().number, 2);
		assert_eq!(executor.take_tasks(), vec![]);
	}

	#[test]
	fn test_block_far_above_best_is_ignored_unless_accepting_any() {
		let blocks = db::devtools::build_chain(2);
		let template = db::devtools::build_block(Some(&blocks[1]), 0, 1);
		let mut far_header = template.block_header.clone();
		far_header.parent_hash = H256::from(0xAA);
		far_header.number = 5000;
		let far = Block::new(far_header, Vec::new(), Vec::new());

		let (executor, _, server) = create_server(&blocks);
		server.on_block(1, types::Block { block: far.clone() });
		assert!(!server.has_block(&far.hash()));
		assert_eq!(executor.take_tasks(), vec![]);

		server.accept_any_block();
		server.on_block(1, types::Block { block: far.clone() });
		// now stashed and chased
		assert!(server.has_block(&far.hash()));
		assert_eq!(executor.take_tasks(), vec![
			Task::SendGetBlock(1, types::GetBlock { hash: *far.parent_hash() }),
		]);
	}

	#[test]
	fn test_disconnect_forgets_block_knowledge() {
		let blocks = db::devtools::build_chain(2);
		let (_, _, server) = create_server(&blocks);

		server.on_status(1, status_for(&blocks[1]));
		assert_eq!(server.knowledge_peers_for(&blocks[1].hash()), vec![1]);

		server.on_peer_disconnected(1);
		assert_eq!(server.knowledge_peers_for(&blocks[1].hash()), vec![]);
	}

	#[test]
	fn test_watermark_and_sync_state() {
		let blocks = db::devtools::build_chain(2);
		let (_, _, server) = create_server(&blocks);

		assert!(!server.has_better_block_to_sync());
		assert!(!server.is_syncing_blocks());

		let mut status = status_for(&blocks[1]);
		status.best_number = 500;
		server.on_status(1, status);

		assert_eq!(server.last_known_block_number(), 500);
		assert!(server.has_better_block_to_sync());
		assert!(server.is_syncing_blocks());
	}
}
