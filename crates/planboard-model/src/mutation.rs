//! Mutation requests toward the persistence layer
//!
//! The engine never writes state. Interactive operations produce a
//! [`BoardMutation`] that the caller forwards to the store; the result is
//! read back through the next snapshot.

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// A change the engine asks the persistence layer to make
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardMutation {
    /// Store a resized node's dimensions as its size override
    #[serde(rename_all = "camelCase")]
    CommitSize {
        node_id: NodeId,
        width: f32,
        height: f32,
    },

    /// Drop a node's size override so the default applies again
    #[serde(rename_all = "camelCase")]
    ClearSizeOverride { node_id: NodeId },

    /// Flip a node's collapsed flag
    #[serde(rename_all = "camelCase")]
    ToggleCollapsed { node_id: NodeId },
}

impl BoardMutation {
    /// The node the mutation targets
    #[must_use]
    pub fn node_id(&self) -> &NodeId {
        match self {
            Self::CommitSize { node_id, .. }
            | Self::ClearSizeOverride { node_id }
            | Self::ToggleCollapsed { node_id } => node_id,
        }
    }

    /// Whether applying it changes the visible set on the next pass
    #[inline]
    #[must_use]
    pub fn affects_visibility(&self) -> bool {
        matches!(self, Self::ToggleCollapsed { .. })
    }
}
