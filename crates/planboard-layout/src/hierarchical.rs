//! Hierarchical (tidy tree) placement
//!
//! Post-order walk over the visible subtree: depth drives `x`, leaves take
//! consecutive rows, and an internal node sits at the mean `y` of its
//! immediate children.

use crate::traverse::{ChildClaims, ChildPositions};
use planboard_model::{LayoutConfig, Point};
use planboard_tree::{TreeIndex, VisibleSet};

enum Step {
    Enter { position: usize, depth: usize },
    Exit { position: usize, depth: usize },
}

/// Place every visible node; the result is indexed by visit-order position
pub(crate) fn place(
    index: &TreeIndex,
    visible: &VisibleSet,
    config: &LayoutConfig,
) -> Vec<Option<Point>> {
    let mut placed: Vec<Option<Point>> = vec![None; visible.len()];
    if visible.is_empty() {
        return placed;
    }

    let mut claims = ChildClaims::new(index, visible);
    let mut children: Vec<ChildPositions> = vec![ChildPositions::new(); visible.len()];
    let mut row = 0usize;
    let mut stack = vec![Step::Enter {
        position: 0,
        depth: 0,
    }];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter { position, depth } => {
                let kids = claims.claim_children(position);
                if kids.is_empty() {
                    placed[position] = Some(Point::new(
                        column_x(depth, config),
                        row as f32 * config.row_gap,
                    ));
                    row += 1;
                    continue;
                }
                stack.push(Step::Exit { position, depth });
                for &kid in kids.iter().rev() {
                    stack.push(Step::Enter {
                        position: kid,
                        depth: depth + 1,
                    });
                }
                children[position] = kids;
            }
            Step::Exit { position, depth } => {
                let kids = &children[position];
                let sum: f32 = kids
                    .iter()
                    .filter_map(|&k| placed[k].map(|p| p.y))
                    .sum();
                let y = sum / kids.len() as f32;
                placed[position] = Some(Point::new(column_x(depth, config), y));
            }
        }
    }

    tracing::trace!(leaves = row, "hierarchical placement done");
    placed
}

fn column_x(depth: usize, config: &LayoutConfig) -> f32 {
    depth as f32 * config.column_gap
}
