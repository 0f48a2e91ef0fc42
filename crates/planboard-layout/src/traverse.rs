//! Visible-subtree traversal helpers shared by both layout policies

use planboard_tree::{TreeIndex, VisibleSet};
use smallvec::SmallVec;

/// Visit-order positions of a node's children
pub(crate) type ChildPositions = SmallVec<[usize; 4]>;

/// Claims visible children exactly once per pass.
///
/// A node is handed out as somebody's child only the first time it is
/// reached, so a parent cycle inside the visible set cannot make a walk
/// revisit it.
pub(crate) struct ChildClaims<'a> {
    index: &'a TreeIndex,
    visible: &'a VisibleSet,
    claimed: Vec<bool>,
}

impl<'a> ChildClaims<'a> {
    /// Start a pass; the scope root (position 0) is pre-claimed
    pub(crate) fn new(index: &'a TreeIndex, visible: &'a VisibleSet) -> Self {
        let mut claimed = vec![false; visible.len()];
        if let Some(first) = claimed.first_mut() {
            *first = true;
        }
        Self {
            index,
            visible,
            claimed,
        }
    }

    /// Unclaimed visible children of the node at `position`, in snapshot order
    pub(crate) fn claim_children(&mut self, position: usize) -> ChildPositions {
        let Some(slot) = self
            .visible
            .id_at(position)
            .and_then(|id| self.index.slot(id))
        else {
            return ChildPositions::new();
        };

        let mut out = ChildPositions::new();
        for &child in self.index.children_at(slot) {
            let Some(p) = self.visible.position(&self.index.node_at(child).id) else {
                continue;
            };
            if !std::mem::replace(&mut self.claimed[p], true) {
                out.push(p);
            }
        }
        out
    }
}
