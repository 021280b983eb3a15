mod connection_point_finder;
mod pending_requests;

pub use self::connection_point_finder::ConnectionPointFinder;
pub use self::pending_requests::PendingRequests;
#[cfg(test)]
pub use self::pending_requests::REQUEST_TIMEOUT_S;
