//! Seams toward the host application
//!
//! The engine reads a board snapshot and per-view session state through
//! traits, and hands mutation requests to a sink. It owns none of them.

use crate::adjacency::HoverTarget;
use crate::error::StoreError;
use planboard_model::{BoardMutation, BoardSnapshot, CrossRef, CrossRefId, NodeId, TreeNode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read access to the persisted board
pub trait BoardSource {
    /// Every node of the board, in snapshot order
    fn all_nodes(&self) -> &[TreeNode];

    /// Every cross-reference of the board
    fn all_cross_refs(&self) -> &[CrossRef];
}

impl BoardSource for BoardSnapshot {
    fn all_nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    fn all_cross_refs(&self) -> &[CrossRef] {
        &self.cross_refs
    }
}

/// Per-view interaction state, passed explicitly on every pass
pub trait SessionSource {
    fn collapsed_ids(&self) -> &HashSet<NodeId>;

    fn scope_root_id(&self) -> &NodeId;

    fn search_query(&self) -> &str;

    fn lane_mode_enabled(&self) -> bool;

    fn hover_state(&self) -> Option<&HoverTarget>;

    fn active_cross_ref_id(&self) -> Option<&CrossRefId>;

    /// Nodes expanded for reading; drives the expanded height
    fn expanded_ids(&self) -> &HashSet<NodeId>;
}

/// Plain session state holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub scope_root: NodeId,
    #[serde(default)]
    pub collapsed: HashSet<NodeId>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub lane_mode: bool,
    #[serde(default)]
    pub hover: Option<HoverTarget>,
    #[serde(default)]
    pub active_cross_ref: Option<CrossRefId>,
    #[serde(default)]
    pub expanded: HashSet<NodeId>,
}

impl UiState {
    /// Session scoped at `scope_root` with nothing collapsed
    #[must_use]
    pub fn new(scope_root: impl Into<NodeId>) -> Self {
        Self {
            scope_root: scope_root.into(),
            collapsed: HashSet::new(),
            search_query: String::new(),
            lane_mode: false,
            hover: None,
            active_cross_ref: None,
            expanded: HashSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_collapsed<I, N>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.collapsed.extend(ids.into_iter().map(Into::into));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_lane_mode(mut self, enabled: bool) -> Self {
        self.lane_mode = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_hover(mut self, hover: HoverTarget) -> Self {
        self.hover = Some(hover);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_active_cross_ref(mut self, id: impl Into<CrossRefId>) -> Self {
        self.active_cross_ref = Some(id.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_expanded<I, N>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.expanded.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Flip a collapse flag locally, mirroring [`BoardMutation::ToggleCollapsed`]
    pub fn toggle_collapsed(&mut self, id: &NodeId) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.clone());
        }
    }
}

impl SessionSource for UiState {
    fn collapsed_ids(&self) -> &HashSet<NodeId> {
        &self.collapsed
    }

    fn scope_root_id(&self) -> &NodeId {
        &self.scope_root
    }

    fn search_query(&self) -> &str {
        &self.search_query
    }

    fn lane_mode_enabled(&self) -> bool {
        self.lane_mode
    }

    fn hover_state(&self) -> Option<&HoverTarget> {
        self.hover.as_ref()
    }

    fn active_cross_ref_id(&self) -> Option<&CrossRefId> {
        self.active_cross_ref.as_ref()
    }

    fn expanded_ids(&self) -> &HashSet<NodeId> {
        &self.expanded
    }
}

/// Receives mutation requests for the persistence layer
///
/// Failures are reported back to the caller; layout never depends on them.
pub trait MutationSink {
    /// Forward one mutation
    ///
    /// # Errors
    /// Returns [`StoreError`] when the store refuses or cannot be reached.
    fn submit(&mut self, mutation: BoardMutation) -> Result<(), StoreError>;
}

/// Collects mutations in memory
impl MutationSink for Vec<BoardMutation> {
    fn submit(&mut self, mutation: BoardMutation) -> Result<(), StoreError> {
        self.push(mutation);
        Ok(())
    }
}
