//! Computed layout positions

use indexmap::IndexMap;
use planboard_model::{NodeId, Point};
use planboard_tree::TreeIndex;

/// Which placement policy produced a [`LayoutPositions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Depth on x, leaf order on y
    Hierarchical,
    /// Horizontal lanes with chained story beats
    StoryLanes,
}

impl LayoutMode {
    #[inline]
    #[must_use]
    pub const fn is_lanes(self) -> bool {
        matches!(self, Self::StoryLanes)
    }
}

/// Computed default position of every visible node, in visible order
///
/// These are the engine's positions before stored overrides. Use
/// [`LayoutPositions::effective`] for the position a node is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPositions {
    mode: LayoutMode,
    computed: IndexMap<NodeId, Point>,
}

impl LayoutPositions {
    pub(crate) fn new(mode: LayoutMode, computed: IndexMap<NodeId, Point>) -> Self {
        Self { mode, computed }
    }

    /// Positions for an empty visible set
    #[must_use]
    pub fn empty(mode: LayoutMode) -> Self {
        Self::new(mode, IndexMap::new())
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Computed position, ignoring stored overrides
    #[inline]
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<Point> {
        self.computed.get(id).copied()
    }

    /// Position after applying the node's stored `x`/`y` override
    #[must_use]
    pub fn effective(&self, index: &TreeIndex, id: &NodeId) -> Option<Point> {
        let computed = self.get(id)?;
        Some(
            index
                .get(id)
                .map_or(computed, |node| node.effective_position(computed)),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, Point)> {
        self.computed.iter().map(|(id, p)| (id, *p))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.computed.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.computed.is_empty()
    }
}
