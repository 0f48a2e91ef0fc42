//! Portal marker placement
//!
//! Markers stack away from the scene's vertical middle so they point into
//! open canvas. A stacked candidate that would cover its own anchor moves
//! beside it instead. Collisions are resolved by a capped grid scan that
//! walks in the stacking direction and alternates columns around the
//! candidate.

use crate::anchor::{group_by_anchor, visible_links};
use crate::jitter::jitter;
use crate::obstacles::Obstacles;
use indexmap::IndexMap;
use planboard_layout::NodeBounds;
use planboard_model::{CrossRef, CrossRefId, NodeId, PortalConfig, Rect};
use planboard_tree::VisibleSet;

/// Where one cross-reference's marker is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PortalPlacement {
    pub cross_ref_id: CrossRefId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Node the marker is attached to
    pub anchor: NodeId,
    /// Visible linked nodes, in link order
    pub linked: Vec<NodeId>,
    /// Whether this is the session's active cross-reference
    pub active: bool,
    /// Candidates tested before settling, at least 1
    pub attempts: u32,
    /// False when the scan cap was hit and the last candidate was kept
    pub resolved: bool,
}

impl PortalPlacement {
    /// The marker's square
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// All markers of one pass, in placement order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortalPlacements {
    placed: IndexMap<CrossRefId, PortalPlacement>,
}

impl PortalPlacements {
    #[inline]
    #[must_use]
    pub fn get(&self, id: &CrossRefId) -> Option<&PortalPlacement> {
        self.placed.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortalPlacement> {
        self.placed.values()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Markers that hit the scan cap
    pub fn unresolved(&self) -> impl Iterator<Item = &PortalPlacement> {
        self.iter().filter(|p| !p.resolved)
    }
}

/// Vertical stacking side relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stack {
    Below,
    Above,
}

impl Stack {
    fn sign(self) -> f32 {
        match self {
            Self::Below => 1.0,
            Self::Above => -1.0,
        }
    }
}

/// Place a marker for every anchored cross-reference.
///
/// Node boxes and markers placed earlier in the same pass are obstacles.
/// Each marker tries at most `max_attempts` candidates; when all collide
/// the last one is kept and logged.
#[must_use]
pub fn place_portals(
    cross_refs: &[CrossRef],
    visible: &VisibleSet,
    bounds: &NodeBounds,
    active: Option<&CrossRefId>,
    config: &PortalConfig,
) -> PortalPlacements {
    let Some(scene) = bounds.scene_bounds() else {
        return PortalPlacements::default();
    };
    let mid = scene.center();
    let mut obstacles = Obstacles::from_rects(bounds.rects());
    let mut placed = IndexMap::new();

    let size = config.portal_size;
    let gap = config.stack_vertical_gap;
    let pitch = size + gap;

    for bucket in group_by_anchor(cross_refs, visible) {
        let Some(anchor) = bounds.get(&bucket.anchor).copied() else {
            tracing::debug!(anchor = %bucket.anchor, "anchor has no bounds, skipping bucket");
            continue;
        };
        let centre = anchor.center();
        let stack = if centre.y <= mid.y {
            Stack::Below
        } else {
            Stack::Above
        };

        for (k, cross_ref) in bucket.members.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = k as f32 * pitch;
            let stacked_y = match stack {
                Stack::Below => anchor.bottom() + gap + offset,
                Stack::Above => anchor.y - gap - size - offset,
            };
            let mut candidate = Rect::new(
                centre.x - size / 2.0 + jitter(&cross_ref.id, config.jitter_range),
                stacked_y,
                size,
                size,
            );
            if candidate.intersects(&anchor) {
                let x = if centre.x < mid.x {
                    anchor.x - gap - size
                } else {
                    anchor.right() + gap
                };
                candidate = candidate.at(x, anchor.y + offset);
            }

            let (rect, attempts, resolved) = scan(candidate, stack, &obstacles, config);
            if !resolved {
                tracing::debug!(
                    cross_ref = %cross_ref.id,
                    attempts,
                    "no free marker slot, keeping last candidate"
                );
            }
            obstacles.insert(rect);
            placed.insert(
                cross_ref.id.clone(),
                PortalPlacement {
                    cross_ref_id: cross_ref.id.clone(),
                    x: rect.x,
                    y: rect.y,
                    size,
                    anchor: bucket.anchor.clone(),
                    linked: visible_links(cross_ref, visible),
                    active: active == Some(&cross_ref.id),
                    attempts,
                    resolved,
                },
            );
        }
    }

    let placements = PortalPlacements { placed };
    tracing::debug!(
        markers = placements.len(),
        unresolved = placements.unresolved().count(),
        "portals placed"
    );
    placements
}

/// Column offset (in steps) of the `col`-th column: 0, +1, -1, +2, -2, ...
fn column_offset(col: u32) -> f32 {
    let magnitude = col.div_ceil(2) as f32;
    if col % 2 == 1 {
        magnitude
    } else {
        -magnitude
    }
}

fn scan(
    base: Rect,
    stack: Stack,
    obstacles: &Obstacles,
    config: &PortalConfig,
) -> (Rect, u32, bool) {
    let columns = config.scan_columns.max(1);
    let max_attempts = config.max_attempts.max(1);
    let step = config.scan_step;

    let mut last = base;
    for attempt in 0..max_attempts {
        let row = (attempt / columns) as f32;
        let col = column_offset(attempt % columns);
        let candidate = base.at(
            base.x + col * step,
            base.y + stack.sign() * row * step,
        );
        if !obstacles.collides(&candidate) {
            return (candidate, attempt + 1, true);
        }
        last = candidate;
    }
    (last, max_attempts, false)
}
