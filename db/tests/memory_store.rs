extern crate db;

use db::{BlockInsertionResult, MemoryStore, Store, devtools};

#[test]
fn linear_chain_canonizes_in_order() {
	let blocks = devtools::build_chain(3);
	let store = MemoryStore::new();

	for block in &blocks {
		let result = store.insert(block.clone()).unwrap();
		assert_eq!(result, BlockInsertionResult::Connected { reorganized: false });
	}

	let best = store.best_block().unwrap();
	assert_eq!(best.number, 2);
	assert_eq!(best.hash, blocks[2].hash());
	for (number, block) in blocks.iter().enumerate() {
		assert_eq!(store.block_hash(number as u64), Some(block.hash()));
		assert_eq!(store.block_number(&block.hash()), Some(number as u64));
	}
}

#[test]
fn heavier_fork_takes_over_then_loses_again() {
	let blocks = devtools::build_chain(4);
	let store = MemoryStore::with_blocks(&blocks);

	// fork from height 1: first block only ties the canonical total
	// difficulty (4), the second exceeds it
	let fork = devtools::extend(&blocks[1], 2, 9, 2);
	assert_eq!(store.insert(fork[0].clone()).unwrap(), BlockInsertionResult::SideChain);
	let result = store.insert(fork[1].clone()).unwrap();
	assert_eq!(result, BlockInsertionResult::Connected { reorganized: true });

	let best = store.best_block().unwrap();
	assert_eq!(best.hash, fork[1].hash());
	// decanonized blocks remain reachable by hash, but lose their height
	assert!(store.contains(&blocks[3].hash()));
	assert_eq!(store.block_number(&blocks[3].hash()), None);

	// extending the old chain far enough flips canon back
	let revenge = devtools::extend(&blocks[3], 9, 3, 1);
	for block in &revenge {
		store.insert(block.clone()).unwrap();
	}
	let best = store.best_block().unwrap();
	assert_eq!(best.number, 12);
	assert_eq!(best.hash, revenge[8].hash());
	assert_eq!(store.block_number(&blocks[3].hash()), Some(3));
}

#[test]
fn unknown_parent_is_rejected_without_side_effects() {
	let blocks = devtools::build_chain(3);
	let store = MemoryStore::with_blocks(&blocks[..2]);

	let foreign_genesis = devtools::build_block(None, 77, 1);
	let foreign = devtools::extend(&foreign_genesis, 1, 0, 1).pop().unwrap();
	assert!(store.insert(foreign.clone()).is_err());
	assert!(!store.contains(&foreign.hash()));
	assert_eq!(store.best_block().unwrap().number, 1);

	// a stored parent is all that was missing
	assert!(store.insert(blocks[2].clone()).is_ok());
	assert_eq!(store.best_block().unwrap().number, 2);
}
