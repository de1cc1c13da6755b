//! Version convergence policy over a fleet snapshot.
//!
//! The detector looks at two role populations:
//!
//! - **Config servers**: The versions they report *running* form the
//!   authoritative "current platform version" set
//! - **Routing proxies**: The versions their cluster membership *wants*
//!   form the propagation target set
//!
//! A deploy is only warranted once the config servers unanimously agree on
//! one version that the proxies do not already want.
//!
//! ## Design Principles
//!
//! 1. **Pure**: The decision is a function of the snapshot alone, with no
//!    hidden state and no side effects
//! 2. **Order-independent**: Version sets are collected into ordered sets,
//!    so node iteration order never changes the outcome
//! 3. **Conservative**: Any ambiguity in the config fleet (mid-upgrade,
//!    nothing reporting) yields no action rather than a deploy against a
//!    moving target

use std::collections::BTreeSet;

use strato_core::{Node, NodeRole, Version};

/// Outcome of evaluating one fleet snapshot.
///
/// Derived per tick, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployDecision {
    /// Nothing to deploy this tick.
    NoAction,
    /// Deploy the zone application at the given target version.
    Deploy {
        /// The version to deploy.
        target: Version,
    },
}

impl DeployDecision {
    /// Returns true if the decision is to do nothing.
    #[must_use]
    pub const fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction)
    }

    /// Returns the target version if a deploy is warranted.
    #[must_use]
    pub const fn target(&self) -> Option<&Version> {
        match self {
            Self::Deploy { target } => Some(target),
            Self::NoAction => None,
        }
    }
}

/// Decides whether the zone application must be redeployed.
///
/// Stateless and cheap to construct; one instance per reconciler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvergenceDetector;

impl ConvergenceDetector {
    /// Creates a new detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates a fleet snapshot.
    ///
    /// Nodes whose relevant version is absent contribute no information.
    /// The comparison between the config servers' current set and the
    /// proxies' wanted set is strict set equality; a wanted set that
    /// merely contains the current version alongside others still
    /// triggers a deploy.
    #[must_use]
    pub fn decide(&self, nodes: &[Node]) -> DeployDecision {
        let current_config =
            versions_for_role(nodes, NodeRole::Config, |node| node.current_version.as_ref());
        let wanted_proxy =
            versions_for_role(nodes, NodeRole::Proxy, |node| node.wanted_version.as_ref());

        // Config servers are mid-upgrade or not reporting; the reference
        // point is unstable.
        if current_config.len() != 1 {
            return DeployDecision::NoAction;
        }

        // Proxies already want exactly what the config servers run.
        if current_config == wanted_proxy {
            return DeployDecision::NoAction;
        }

        match current_config.into_iter().next() {
            Some(target) => DeployDecision::Deploy { target },
            None => DeployDecision::NoAction,
        }
    }
}

/// Collects the versions a role population exposes through `version_of`.
fn versions_for_role<'a, F>(nodes: &'a [Node], role: NodeRole, version_of: F) -> BTreeSet<Version>
where
    F: Fn(&'a Node) -> Option<&'a Version>,
{
    nodes
        .iter()
        .filter(|node| node.role == role)
        .filter_map(version_of)
        .cloned()
        .collect()
}
