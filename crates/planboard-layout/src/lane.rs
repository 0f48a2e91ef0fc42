//! Story-lane placement
//!
//! The scope root's children become lanes along one row. Inside a lane a
//! story beat under a story parent continues the horizontal chain, and any
//! other child branches out below its parent, one row per branch.

use crate::traverse::ChildClaims;
use planboard_model::{LaneConfig, Point};
use planboard_tree::{TreeIndex, VisibleSet};

/// Place every visible node; the result is indexed by visit-order position
pub(crate) fn place(
    index: &TreeIndex,
    visible: &VisibleSet,
    config: &LaneConfig,
) -> Vec<Option<Point>> {
    let mut placed: Vec<Option<Point>> = vec![None; visible.len()];
    if visible.is_empty() {
        return placed;
    }

    let mut claims = ChildClaims::new(index, visible);
    placed[0] = Some(Point::new(0.0, config.lane_y - config.branch_y_gap));

    let lanes = claims.claim_children(0);
    let mut pending = Vec::with_capacity(visible.len());
    for (i, &lane) in lanes.iter().enumerate() {
        placed[lane] = Some(Point::new(i as f32 * config.lane_x_gap, config.lane_y));
        pending.push(lane);
    }

    while let Some(parent) = pending.pop() {
        let Some(origin) = placed[parent] else {
            continue;
        };
        let parent_is_story = is_story(index, visible, parent);
        let mut chain_x = origin.x;
        let mut branch_index = 0u32;

        for child in claims.claim_children(parent) {
            let point = if parent_is_story && is_story(index, visible, child) {
                chain_x += config.lane_x_gap;
                Point::new(chain_x, origin.y)
            } else {
                branch_index += 1;
                Point::new(
                    origin.x + config.branch_x_gap,
                    origin.y + config.branch_y_gap * branch_index as f32,
                )
            };
            placed[child] = Some(point);
            pending.push(child);
        }
    }

    tracing::trace!(lanes = lanes.len(), "lane placement done");
    placed
}

fn is_story(index: &TreeIndex, visible: &VisibleSet, position: usize) -> bool {
    visible
        .id_at(position)
        .and_then(|id| index.get(id))
        .is_some_and(|n| n.kind.is_story())
}
