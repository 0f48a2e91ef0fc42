//! Layout policy selection

use crate::positions::{LayoutMode, LayoutPositions};
use crate::{hierarchical, lane};
use indexmap::IndexMap;
use planboard_model::BoardConfig;
use planboard_tree::{TreeIndex, VisibleSet};

/// Policy that applies to this visible set.
///
/// Lanes need both the session toggle and a story scope root; anything else
/// falls back to the tidy tree.
#[must_use]
pub fn layout_mode(index: &TreeIndex, visible: &VisibleSet, lane_mode_enabled: bool) -> LayoutMode {
    let story_scope = visible
        .scope_root()
        .and_then(|id| index.get(id))
        .is_some_and(|n| n.kind.is_story());
    if lane_mode_enabled && story_scope {
        LayoutMode::StoryLanes
    } else {
        LayoutMode::Hierarchical
    }
}

/// Compute the default position of every visible node.
///
/// Stateless: equal inputs give equal outputs, and stored overrides never
/// move any other node. Apply them with [`LayoutPositions::effective`].
#[must_use]
pub fn compute_layout(
    index: &TreeIndex,
    visible: &VisibleSet,
    lane_mode_enabled: bool,
    config: &BoardConfig,
) -> LayoutPositions {
    let mode = layout_mode(index, visible, lane_mode_enabled);
    if visible.is_empty() {
        return LayoutPositions::empty(mode);
    }

    let placed = match mode {
        LayoutMode::Hierarchical => hierarchical::place(index, visible, &config.layout),
        LayoutMode::StoryLanes => lane::place(index, visible, &config.lane),
    };

    let computed: IndexMap<_, _> = visible
        .ids()
        .zip(placed)
        .filter_map(|(id, p)| p.map(|p| (id.clone(), p)))
        .collect();

    if computed.len() != visible.len() {
        tracing::debug!(
            visible = visible.len(),
            placed = computed.len(),
            "some visible nodes were unreachable from the scope root"
        );
    }
    tracing::debug!(?mode, nodes = computed.len(), "layout computed");
    LayoutPositions::new(mode, computed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_model::Point;
    use planboard_test_utils::{sample_nodes, story_nodes};
    use planboard_tree::project_visibility;
    use std::collections::HashSet;

    #[test]
    fn lane_mode_requires_story_scope() {
        let index = TreeIndex::build(sample_nodes());
        let visible = project_visibility(&index, &"A".into(), &HashSet::new(), "");
        let positions = compute_layout(&index, &visible, true, &BoardConfig::default());
        assert_eq!(positions.mode(), LayoutMode::Hierarchical);
        assert_eq!(positions.get(&"C".into()), Some(Point::new(560.0, 0.0)));
    }

    #[test]
    fn story_scope_uses_lanes_when_enabled() {
        let index = TreeIndex::build(story_nodes());
        let visible = project_visibility(&index, &"S".into(), &HashSet::new(), "");
        let on = compute_layout(&index, &visible, true, &BoardConfig::default());
        let off = compute_layout(&index, &visible, false, &BoardConfig::default());
        assert!(on.mode().is_lanes());
        assert!(!off.mode().is_lanes());
        assert_eq!(on.len(), visible.len());
        assert_eq!(off.len(), visible.len());
    }

    #[test]
    fn override_moves_only_that_node() {
        let mut nodes = sample_nodes();
        nodes[3] = nodes[3].clone().with_position(900.0, 900.0);
        let index = TreeIndex::build(nodes);
        let visible = project_visibility(&index, &"A".into(), &HashSet::new(), "");
        let positions = compute_layout(&index, &visible, false, &BoardConfig::default());

        assert_eq!(positions.get(&"D".into()), Some(Point::new(560.0, 140.0)));
        assert_eq!(
            positions.effective(&index, &"D".into()),
            Some(Point::new(900.0, 900.0))
        );
        assert_eq!(positions.get(&"B".into()), Some(Point::new(280.0, 70.0)));
    }

    #[test]
    fn empty_visible_set() {
        let index = TreeIndex::build(sample_nodes());
        let positions =
            compute_layout(&index, &VisibleSet::empty(), true, &BoardConfig::default());
        assert!(positions.is_empty());
    }
}
