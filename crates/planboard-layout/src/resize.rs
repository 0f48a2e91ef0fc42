//! Interactive resize sessions
//!
//! A drag produces live clamped boxes for preview only. Nothing is relaid
//! out until the drag finishes and the committed size comes back through
//! the next snapshot.

use crate::sizing::clamp_size;
use planboard_model::{BoardMutation, NodeId, Rect, Size, SizingConfig};

/// One in-progress resize drag
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    node: NodeId,
    start: Rect,
    live: Rect,
    config: SizingConfig,
}

impl ResizeSession {
    /// Begin resizing `node`, whose current box is `bounds`
    #[must_use]
    pub fn begin(node: impl Into<NodeId>, bounds: Rect, config: SizingConfig) -> Self {
        let node = node.into();
        tracing::trace!(node = %node, "resize started");
        Self {
            node,
            start: bounds,
            live: bounds,
            config,
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Box the drag started from
    #[inline]
    #[must_use]
    pub fn start_bounds(&self) -> Rect {
        self.start
    }

    /// Apply a drag step; returns the clamped live box, origin unchanged
    pub fn update(&mut self, width: f32, height: f32) -> Rect {
        let size = clamp_size(Size::new(width, height), &self.config);
        self.live = Rect::from_origin_size(self.start.origin(), size);
        self.live
    }

    #[inline]
    #[must_use]
    pub fn live_bounds(&self) -> Rect {
        self.live
    }

    /// End the drag and produce the size to persist
    #[must_use]
    pub fn finish(self) -> BoardMutation {
        tracing::debug!(
            node = %self.node,
            width = self.live.width,
            height = self.live.height,
            "resize committed"
        );
        BoardMutation::CommitSize {
            node_id: self.node,
            width: self.live.width,
            height: self.live.height,
        }
    }

    /// Abandon the drag; nothing is persisted
    pub fn cancel(self) {
        tracing::trace!(node = %self.node, "resize cancelled");
    }
}

/// Request that a node's size override be dropped
#[must_use]
pub fn reset_size(node: impl Into<NodeId>) -> BoardMutation {
    BoardMutation::ClearSizeOverride {
        node_id: node.into(),
    }
}
