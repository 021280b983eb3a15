use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use parking_lot::Mutex;
use time::precise_time_s;
use synchronization_client_core::SynchronizationClientCore;
use synchronization_executor::TaskExecutor;

/// Interval between management sweeps.
const MANAGEMENT_INTERVAL_MS: u64 = 1000;

/// Background worker sweeping expired pending requests so unanswering peers
/// do not leak correlation state.
pub struct ManagementWorker {
	/// Stop flag shared with the worker thread.
	stop: Arc<AtomicBool>,
	/// Worker thread, joined on drop.
	thread: Option<thread::JoinHandle<()>>,
}

impl ManagementWorker {
	pub fn new<T>(client: Arc<Mutex<SynchronizationClientCore<T>>>) -> Self where T: TaskExecutor + 'static {
		let stop = Arc::new(AtomicBool::new(false));
		let thread_stop = stop.clone();
		let thread = thread::Builder::new()
			.name("Sync management thread".to_string())
			.spawn(move || ManagementWorker::worker_proc(thread_stop, client))
			.ok();
		if thread.is_none() {
			warn!(target: "sync", "Failed to spawn sync management thread; pending requests will not expire");
		}
		ManagementWorker {
			stop: stop,
			thread: thread,
		}
	}

	fn worker_proc<T>(stop: Arc<AtomicBool>, client: Arc<Mutex<SynchronizationClientCore<T>>>) where T: TaskExecutor {
		while !stop.load(Ordering::SeqCst) {
			thread::sleep(Duration::from_millis(MANAGEMENT_INTERVAL_MS));
			if stop.load(Ordering::SeqCst) {
				break;
			}
			let stale_peers = client.lock().expire_pending_requests(precise_time_s());
			if !stale_peers.is_empty() {
				trace!(target: "sync", "Management sweep expired requests of {} peers", stale_peers.len());
			}
		}
		trace!(target: "sync", "Stopping sync management thread");
	}
}

impl Drop for ManagementWorker {
	fn drop(&mut self) {
		self.stop.store(true, Ordering::SeqCst);
		if let Some(thread) = self.thread.take() {
			let _ = thread.join();
		}
	}
}
