//! System implementations for the AssetSystem trait
//!
//! - `LocalSystem`: Direct filesystem access through `tokio::fs`
//! - `MockSystem`: In-memory implementation with fault injection (tests only)

mod local;

pub use local::LocalSystem;

#[cfg(test)]
pub mod mock;

#[cfg(test)]
pub use mock::MockSystem;
