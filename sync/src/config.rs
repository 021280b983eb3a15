/// Synchronization configuration.
#[derive(Debug, Clone)]
pub struct Config {
	/// Maximal number of blocks proactively pushed to a peer on a single
	/// status exchange.
	pub blocks_for_peers: u64,
	/// Height granularity of skeleton responses.
	pub skeleton_step: u64,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			blocks_for_peers: 100,
			skeleton_step: 192,
		}
	}
}
