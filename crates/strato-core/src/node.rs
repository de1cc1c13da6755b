//! Fleet node snapshots.
//!
//! A [`Node`] is an immutable point-in-time view of one cluster node as
//! reported by the fleet store. The deployer only reads these snapshots;
//! it never writes node state back.

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Role a node plays in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Config server. Its reported current version is the fleet's
    /// authoritative platform version.
    Config,
    /// Routing proxy. Its membership-declared wanted version is the
    /// propagation target.
    Proxy,
    /// Any other role. Contributes no information to convergence.
    #[serde(other)]
    Other,
}

/// Point-in-time snapshot of one fleet node.
///
/// Snapshots are owned by the fleet store and valid for the duration of a
/// single reconciliation tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node hostname.
    pub hostname: String,
    /// Role the node plays.
    pub role: NodeRole,
    /// Version the node reports it is actually running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<Version>,
    /// Version assigned to the node's cluster membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wanted_version: Option<Version>,
}

impl Node {
    /// Creates a node snapshot with no version information.
    #[must_use]
    pub fn new(hostname: impl Into<String>, role: NodeRole) -> Self {
        Self {
            hostname: hostname.into(),
            role,
            current_version: None,
            wanted_version: None,
        }
    }

    /// Sets the version the node reports it is running.
    #[must_use]
    pub fn with_current_version(mut self, version: Version) -> Self {
        self.current_version = Some(version);
        self
    }

    /// Sets the version assigned to the node's cluster membership.
    #[must_use]
    pub fn with_wanted_version(mut self, version: Version) -> Self {
        self.wanted_version = Some(version);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_builder_sets_versions() {
        let node = Node::new("cfg1.example.com", NodeRole::Config)
            .with_current_version(Version::new(7, 1, 0))
            .with_wanted_version(Version::new(7, 1, 0));

        assert_eq!(node.role, NodeRole::Config);
        assert_eq!(node.current_version, Some(Version::new(7, 1, 0)));
        assert_eq!(node.wanted_version, Some(Version::new(7, 1, 0)));
    }

    #[test]
    fn node_serializes_camel_case() {
        let node = Node::new("proxy1.example.com", NodeRole::Proxy)
            .with_wanted_version(Version::new(7, 0, 9));

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["hostname"], "proxy1.example.com");
        assert_eq!(json["role"], "proxy");
        assert_eq!(json["wantedVersion"], "7.0.9");
        // Absent versions are omitted, not null.
        assert!(json.get("currentVersion").is_none());
    }

    #[test]
    fn unknown_role_deserializes_to_other() {
        let json = r#"{"hostname": "host1", "role": "tenant"}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.role, NodeRole::Other);
        assert_eq!(node.current_version, None);
    }
}
