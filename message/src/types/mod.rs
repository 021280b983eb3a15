mod block;
mod block_hash_request;
mod block_hash_response;
mod block_headers;
mod block_headers_request;
mod block_headers_response;
mod block_request;
mod block_response;
mod body_request;
mod body_response;
mod get_block;
mod get_block_headers;
mod new_block_hashes;
mod skeleton_request;
mod skeleton_response;
mod status;

pub use self::block::Block;
pub use self::block_hash_request::BlockHashRequest;
pub use self::block_hash_response::BlockHashResponse;
pub use self::block_headers::BlockHeaders;
pub use self::block_headers_request::BlockHeadersRequest;
pub use self::block_headers_response::BlockHeadersResponse;
pub use self::block_request::BlockRequest;
pub use self::block_response::BlockResponse;
pub use self::body_request::BodyRequest;
pub use self::body_response::BodyResponse;
pub use self::get_block::GetBlock;
pub use self::get_block_headers::GetBlockHeaders;
pub use self::new_block_hashes::NewBlockHashes;
pub use self::skeleton_request::SkeletonRequest;
pub use self::skeleton_response::SkeletonResponse;
pub use self::status::Status;
