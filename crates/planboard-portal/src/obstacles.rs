//! Collision broad phase for marker placement
//!
//! Node boxes are bulk loaded into an R-tree once per pass, placed markers
//! are inserted as they land. Envelope hits are confirmed with the strict
//! rectangle test, so boxes that only touch along an edge never collide.

use planboard_model::Rect;
use rstar::{RTree, RTreeObject, AABB};

#[derive(Debug, Clone, Copy)]
struct Obstacle(Rect);

impl Obstacle {
    fn envelope_of(rect: &Rect) -> AABB<[f32; 2]> {
        AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()])
    }
}

impl RTreeObject for Obstacle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        Self::envelope_of(&self.0)
    }
}

/// Everything a marker must not overlap
pub(crate) struct Obstacles {
    tree: RTree<Obstacle>,
}

impl Obstacles {
    /// Index the node boxes of one pass
    pub(crate) fn from_rects<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Self {
        let items: Vec<Obstacle> = rects.into_iter().copied().map(Obstacle).collect();
        Self {
            tree: RTree::bulk_load(items),
        }
    }

    /// Reserve a placed marker box
    pub(crate) fn insert(&mut self, rect: Rect) {
        self.tree.insert(Obstacle(rect));
    }

    /// Whether `rect` overlaps the interior of any obstacle
    pub(crate) fn collides(&self, rect: &Rect) -> bool {
        self.tree
            .locate_in_envelope_intersecting(&Obstacle::envelope_of(rect))
            .any(|o| o.0.intersects(rect))
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.size()
    }
}
