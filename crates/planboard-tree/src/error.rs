//! Structural diagnostics for node snapshots
//!
//! The engine never fails on a malformed tree. These errors are reported by
//! [`TreeIndex::validate`](crate::TreeIndex::validate) so the caller can
//! surface or repair inconsistent snapshots.

use planboard_model::NodeId;

/// A violation of the single-rooted, acyclic tree invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The same id appears more than once; the first occurrence is indexed
    #[error("duplicate node id: {id}")]
    DuplicateId { id: NodeId },

    /// A node's parent is not in the snapshot
    #[error("node {id} references missing parent {parent}")]
    MissingParent { id: NodeId, parent: NodeId },

    /// More than one node has no parent
    #[error("multiple root nodes: {ids:?}")]
    MultipleRoots { ids: Vec<NodeId> },

    /// No node without a parent
    #[error("snapshot has no root node")]
    NoRoot,

    /// Following parents from this node loops
    #[error("parent cycle through node {id}")]
    Cycle { id: NodeId },
}

impl TreeError {
    /// The node the diagnostic is about, when there is a single one
    #[must_use]
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Self::DuplicateId { id } | Self::MissingParent { id, .. } | Self::Cycle { id } => {
                Some(id)
            }
            Self::MultipleRoots { .. } | Self::NoRoot => None,
        }
    }

    /// Whether nodes become unreachable from the absolute root because of it
    #[inline]
    #[must_use]
    pub fn detaches_nodes(&self) -> bool {
        matches!(self, Self::MissingParent { .. } | Self::Cycle { .. })
    }
}
