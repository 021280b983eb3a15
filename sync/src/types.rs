use std::sync::Arc;
use local_node::LocalNode;
use synchronization_executor::LocalSynchronizationTaskExecutor;

/// Network request id
pub type RequestId = u64;

/// Peer is indexed using this type
pub type PeerIndex = usize;

/// Reference to storage
pub type StorageRef = ::db::SharedStore;

/// Reference to the task executor
pub type ExecutorRef<T> = Arc<T>;

/// Reference to the local node
pub type LocalNodeRef = Arc<LocalNode<LocalSynchronizationTaskExecutor>>;
