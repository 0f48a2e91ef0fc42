//! View model produced by one engine pass

use crate::adjacency::{AdjacencyIndex, Edge, Related};
use indexmap::IndexMap;
use planboard_layout::{LayoutPositions, NodeBounds};
use planboard_model::{CrossRefId, NodeId, Point, Rect, StoryProgress};
use planboard_portal::PortalPlacements;
use planboard_tree::VisibleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One step of the path from the absolute root down to the scope root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: NodeId,
    pub title: String,
}

/// Everything the presentation layer draws for one snapshot and session
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub visible: VisibleSet,
    pub positions: LayoutPositions,
    /// Effective box of each visible node
    pub bounds: NodeBounds,
    pub placements: PortalPlacements,
    pub edges: Vec<Edge>,
    pub adjacency: AdjacencyIndex,
    /// Highlight set for the session's hover, empty without one
    pub related: Related,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Union of node boxes and markers, for viewport fitting
    pub scene_bounds: Option<Rect>,
    /// Normalized codes shared by several cross-references
    pub code_collisions: BTreeMap<String, Vec<CrossRefId>>,
    /// Checklist progress of visible nodes that carry steps
    pub story_progress: IndexMap<NodeId, StoryProgress>,
    /// Valid scope to fall back to when the requested one is unknown
    pub suggested_scope: Option<NodeId>,
}

impl ViewModel {
    /// Whether the requested scope root resolved to anything
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Drawn position of a node
    #[inline]
    #[must_use]
    pub fn position(&self, id: &NodeId) -> Option<Point> {
        self.bounds.get(id).map(Rect::origin)
    }

    /// Copy with one node's box replaced, for previewing a resize drag.
    ///
    /// Positions, markers and everything else stay as computed.
    #[must_use]
    pub fn with_live_bounds(&self, id: &NodeId, rect: Rect) -> Self {
        let mut view = self.clone();
        view.bounds = view.bounds.with_override(id, rect);
        view
    }
}
