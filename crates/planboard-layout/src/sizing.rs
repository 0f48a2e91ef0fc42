//! Node size negotiation
//!
//! Nodes that show their body inline (story nodes, and every non-root node
//! while lanes are active) get a negotiable box: a stored size is clamped
//! into the configured range, otherwise a display-dependent default is
//! used. Every other node uses the fallback box and ignores stored sizes.

use crate::positions::LayoutPositions;
use indexmap::IndexMap;
use planboard_model::{clamp, NodeId, Rect, Size, SizingConfig, TreeNode};
use planboard_tree::{TreeIndex, VisibleSet};
use std::collections::HashSet;

/// How a node is rendered, which decides its size policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeDisplay {
    /// Compact card, fallback box
    Card,
    /// Story node showing its body
    Story,
    /// Non-root node while lane layout is active
    LaneBeat,
}

impl NodeDisplay {
    /// Whether the body text is shown inline (and the box is resizable)
    #[inline]
    #[must_use]
    pub const fn shows_body(self) -> bool {
        !matches!(self, Self::Card)
    }
}

/// Session inputs the negotiator needs
#[derive(Debug, Clone, Copy)]
pub struct SizeContext<'a> {
    /// Whether the lane layout produced the positions
    pub lane_active: bool,
    /// Nodes expanded for reading
    pub expanded: &'a HashSet<NodeId>,
}

impl<'a> SizeContext<'a> {
    #[must_use]
    pub fn new(lane_active: bool, expanded: &'a HashSet<NodeId>) -> Self {
        Self {
            lane_active,
            expanded,
        }
    }

    /// Display policy of a node under this context
    #[must_use]
    pub fn display(&self, node: &TreeNode) -> NodeDisplay {
        if self.lane_active && !node.is_absolute_root() {
            NodeDisplay::LaneBeat
        } else if node.kind.is_story() {
            NodeDisplay::Story
        } else {
            NodeDisplay::Card
        }
    }
}

/// Resolve one node's rendered size
#[must_use]
pub fn resolve_size(node: &TreeNode, ctx: &SizeContext<'_>, config: &SizingConfig) -> Size {
    let display = ctx.display(node);
    if !display.shows_body() {
        let fallback = config.fallback();
        return Size::new(fallback.width.max(1.0), fallback.height.max(1.0));
    }

    let default = Size::new(
        match display {
            NodeDisplay::LaneBeat => config.lane_beat_width,
            _ => config.story_width,
        },
        if ctx.expanded.contains(&node.id) {
            config.expanded_height
        } else {
            config.story_height
        },
    );

    match node.stored_size() {
        None => default,
        Some(_) => clamp_size(node.stored_size_or(default), config),
    }
}

/// Clamp both axes into the configured range, independently
#[must_use]
pub fn clamp_size(size: Size, config: &SizingConfig) -> Size {
    Size::new(
        clamp(size.width, config.min_width, config.max_width),
        clamp(size.height, config.min_height, config.max_height),
    )
}

/// Rendered box of every visible node, in visible order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeBounds {
    boxes: IndexMap<NodeId, Rect>,
}

impl NodeBounds {
    #[inline]
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Rect> {
        self.boxes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Rect)> {
        self.boxes.iter()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.boxes.values()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Union of all boxes, `None` when nothing is visible
    #[must_use]
    pub fn scene_bounds(&self) -> Option<Rect> {
        Rect::bounding(self.boxes.values())
    }

    /// Copy with one box replaced; unknown ids leave the bounds untouched
    #[must_use]
    pub fn with_override(mut self, id: &NodeId, rect: Rect) -> Self {
        if let Some(slot) = self.boxes.get_mut(id) {
            *slot = rect;
        }
        self
    }
}

impl FromIterator<(NodeId, Rect)> for NodeBounds {
    fn from_iter<T: IntoIterator<Item = (NodeId, Rect)>>(iter: T) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

/// Resolve the box of every visible node at its effective position
#[must_use]
pub fn resolve_node_bounds(
    index: &TreeIndex,
    visible: &VisibleSet,
    positions: &LayoutPositions,
    ctx: &SizeContext<'_>,
    config: &SizingConfig,
) -> NodeBounds {
    let bounds: NodeBounds = visible
        .ids()
        .filter_map(|id| {
            let node = index.get(id)?;
            let origin = positions.effective(index, id)?;
            let size = resolve_size(node, ctx, config);
            Some((id.clone(), Rect::from_origin_size(origin, size)))
        })
        .collect();
    tracing::debug!(nodes = bounds.len(), "resolved node bounds");
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_test_utils::{item, root, story};

    fn ctx(lane: bool, expanded: &HashSet<NodeId>) -> SizeContext<'_> {
        SizeContext::new(lane, expanded)
    }

    #[test]
    fn card_uses_fallback_and_ignores_stored_size() {
        let none = HashSet::new();
        let node = item("c", "p").with_size(500.0, 500.0);
        assert_eq!(
            resolve_size(&node, &ctx(false, &none), &SizingConfig::default()),
            Size::new(200.0, 64.0)
        );
    }

    #[test]
    fn story_default_and_expanded_height() {
        let mut expanded = HashSet::new();
        let node = story("s", "p");
        let config = SizingConfig::default();
        assert_eq!(
            resolve_size(&node, &ctx(false, &expanded), &config),
            Size::new(240.0, 120.0)
        );
        expanded.insert(NodeId::from("s"));
        assert_eq!(
            resolve_size(&node, &ctx(false, &expanded), &config),
            Size::new(240.0, 280.0)
        );
    }

    #[test]
    fn lane_beat_width_applies_to_any_non_root() {
        let none = HashSet::new();
        let config = SizingConfig::default();
        assert_eq!(
            resolve_size(&item("c", "p"), &ctx(true, &none), &config),
            Size::new(300.0, 120.0)
        );
        assert_eq!(
            resolve_size(&root("r"), &ctx(true, &none), &config),
            Size::new(200.0, 64.0)
        );
    }

    #[test]
    fn stored_size_is_clamped_per_axis() {
        let none = HashSet::new();
        let config = SizingConfig::default();
        let node = story("s", "p").with_size(10_000.0, 10.0);
        assert_eq!(
            resolve_size(&node, &ctx(false, &none), &config),
            Size::new(640.0, 72.0)
        );

        let mut half = story("h", "p");
        half.width = Some(400.0);
        assert_eq!(
            resolve_size(&half, &ctx(false, &none), &config),
            Size::new(400.0, 120.0)
        );
    }

    #[test]
    fn inverted_range_is_identity() {
        let none = HashSet::new();
        let config = SizingConfig {
            min_width: 500.0,
            max_width: 100.0,
            ..SizingConfig::default()
        };
        let node = story("s", "p").with_size(42.0, 100.0);
        assert_eq!(resolve_size(&node, &ctx(false, &none), &config).width, 42.0);
    }

    #[test]
    fn degenerate_fallback_becomes_unit_box() {
        let none = HashSet::new();
        let config = SizingConfig {
            fallback_width: 0.0,
            fallback_height: -5.0,
            ..SizingConfig::default()
        };
        assert_eq!(
            resolve_size(&item("c", "p"), &ctx(false, &none), &config),
            Size::new(1.0, 1.0)
        );
    }

    #[test]
    fn override_replaces_known_box_only() {
        let bounds: NodeBounds = [(NodeId::from("a"), Rect::new(0.0, 0.0, 10.0, 10.0))]
            .into_iter()
            .collect();
        let patched = bounds
            .clone()
            .with_override(&"a".into(), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(patched.get(&"a".into()).map(|r| r.width), Some(50.0));
        assert_eq!(
            bounds.clone().with_override(&"zz".into(), Rect::default()),
            bounds
        );
    }
}
