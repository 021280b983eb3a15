#[derive(Debug, PartialEq, Clone)]
pub struct SkeletonRequest {
	pub id: u64,
	pub start_number: u64,
}
