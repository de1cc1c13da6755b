//! Fleet snapshot sources.
//!
//! This module provides:
//!
//! - [`NodeSource`]: Trait for reading point-in-time fleet snapshots
//! - [`HttpNodeSource`](http::HttpNodeSource): Client for an HTTP fleet store
//! - [`InMemoryFleet`](memory::InMemoryFleet): In-memory source for testing
//!
//! The fleet store owns node state; this core only ever reads it. A
//! slightly stale snapshot is acceptable: whatever the source returns is
//! treated as authoritative for the tick that read it.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use strato_core::Node;

use crate::error::Result;

/// Read-only source of fleet node snapshots.
#[async_trait]
pub trait NodeSource: Send + Sync {
    /// Lists all nodes known to the fleet store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Fleet`] if the snapshot cannot be read.
    async fn list_nodes(&self) -> Result<Vec<Node>>;
}
