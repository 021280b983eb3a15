extern crate linked_hash_map;
#[macro_use]
extern crate log;
extern crate parking_lot;
extern crate time;

extern crate chain;
extern crate db;
extern crate message;
extern crate primitives;

mod config;
mod inbound_connection;
mod local_node;
mod pending_blocks_pool;
mod synchronization_client_core;
mod synchronization_executor;
mod synchronization_manager;
mod synchronization_peers;
mod synchronization_server;
mod types;
mod utils;

pub use config::Config;
pub use inbound_connection::{InboundConnection, InboundSyncConnection, InboundSyncConnectionRef};
pub use local_node::LocalNode;
pub use synchronization_client_core::{ClientCore, SynchronizationClientCore};
pub use synchronization_executor::{LocalSynchronizationTaskExecutor, OutboundSyncConnection,
	OutboundSyncConnectionRef, Task, TaskExecutor};
pub use synchronization_server::{Server, ServeOutcome, SynchronizationServer};
pub use types::{LocalNodeRef, PeerIndex, RequestId, StorageRef};
