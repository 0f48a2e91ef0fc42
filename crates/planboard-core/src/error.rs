//! Error types for planboard core
//!
//! Layout itself never fails: bad references and bad numbers degrade to
//! empty or default results. Errors only come from loading inputs and from
//! the mutation sink.

use planboard_model::{ConfigError, NodeId, SnapshotError};

/// Failure reported by a [`MutationSink`](crate::MutationSink)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store refused the mutation
    #[error("mutation for node {node} rejected: {reason}")]
    Rejected { node: NodeId, reason: String },

    /// The node no longer exists in the store
    #[error("node not found in store: {0}")]
    NotFound(NodeId),

    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying the same mutation later may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Main planboard error type
#[derive(Debug, thiserror::Error)]
pub enum PlanboardError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl PlanboardError {
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    #[inline]
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result alias for planboard operations
pub type Result<T> = std::result::Result<T, PlanboardError>;
