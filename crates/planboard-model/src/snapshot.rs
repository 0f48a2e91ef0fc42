//! Board snapshots
//!
//! A [`BoardSnapshot`] is the full node and cross-reference collection read
//! from the persistence layer for one computation.

use crate::cross_ref::CrossRef;
use crate::error::SnapshotError;
use crate::node::TreeNode;
use serde::{Deserialize, Serialize};

/// Immutable per-pass copy of persisted board state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    #[serde(default)]
    pub nodes: Vec<TreeNode>,
    #[serde(default)]
    pub cross_refs: Vec<CrossRef>,
}

impl BoardSnapshot {
    /// Create from collections
    #[inline]
    #[must_use]
    pub fn new(nodes: Vec<TreeNode>, cross_refs: Vec<CrossRef>) -> Self {
        Self { nodes, cross_refs }
    }

    /// Decode the store's JSON export
    ///
    /// # Errors
    /// Returns [`SnapshotError::Json`] if the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode as JSON
    ///
    /// # Errors
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }
}
