//! In-memory fleet source for testing.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use strato_core::Node;

use super::NodeSource;
use crate::error::{Error, Result};

/// Internal fleet state protected by a single lock.
#[derive(Debug, Default)]
struct FleetState {
    nodes: Vec<Node>,
    fail_with: Option<String>,
}

/// In-memory fleet source for testing.
///
/// Holds a mutable node list so tests can move the fleet between ticks.
#[derive(Debug, Default)]
pub struct InMemoryFleet {
    state: RwLock<FleetState>,
}

fn poison_err<T>(_: PoisonError<T>) -> Error {
    Error::fleet("fleet lock poisoned")
}

impl InMemoryFleet {
    /// Creates an empty fleet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fleet pre-populated with `nodes`.
    #[must_use]
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        Self {
            state: RwLock::new(FleetState {
                nodes,
                fail_with: None,
            }),
        }
    }

    /// Replaces the node list.
    pub fn set_nodes(&self, nodes: Vec<Node>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.nodes = nodes;
    }

    /// Configures every subsequent query to fail with `message`.
    ///
    /// Pass `None` to clear a previously configured failure.
    pub fn set_failure(&self, message: Option<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.fail_with = message;
    }
}

#[async_trait]
impl NodeSource for InMemoryFleet {
    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let state = self.state.read().map_err(poison_err)?;
        if let Some(message) = &state.fail_with {
            return Err(Error::fleet(message.clone()));
        }
        Ok(state.nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strato_core::{NodeRole, Version};

    #[tokio::test]
    async fn lists_configured_nodes() {
        let fleet = InMemoryFleet::with_nodes(vec![
            Node::new("cfg1", NodeRole::Config).with_current_version(Version::new(7, 1, 0)),
        ]);

        let nodes = fleet.list_nodes().await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].hostname, "cfg1");
    }

    #[tokio::test]
    async fn configured_failure_is_returned() {
        let fleet = InMemoryFleet::new();
        fleet.set_failure(Some("store unreachable".to_string()));

        assert!(fleet.list_nodes().await.is_err());

        fleet.set_failure(None);
        assert!(fleet.list_nodes().await.unwrap().is_empty());
    }
}
