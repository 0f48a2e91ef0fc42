//! Arena tree index
//!
//! Provides [`TreeIndex`], built once per pass from the flat node collection.
//! Nodes live in a `Vec` and relationships are stored as indices, so walks
//! never chase pointers and never recurse.

use crate::error::TreeError;
use planboard_model::{NodeId, TreeNode};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Children of one node, in snapshot order
type ChildList = SmallVec<[usize; 4]>;

/// `parent → children` and `id → node` lookups over one snapshot
///
/// Malformed snapshots are indexed as far as possible: duplicate ids keep
/// their first occurrence, nodes with a missing parent become unreachable
/// orphans, and every walk is guarded against parent cycles.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    nodes: Vec<TreeNode>,
    by_id: HashMap<NodeId, usize>,
    parent: Vec<Option<usize>>,
    children: Vec<ChildList>,
    root: Option<usize>,
    problems: Vec<TreeError>,
}

impl TreeIndex {
    /// Build the index from a snapshot
    #[must_use]
    pub fn build(nodes: impl IntoIterator<Item = TreeNode>) -> Self {
        let mut index = Self::default();

        for node in nodes {
            if index.by_id.contains_key(&node.id) {
                index.problems.push(TreeError::DuplicateId { id: node.id });
                continue;
            }
            index.by_id.insert(node.id.clone(), index.nodes.len());
            index.nodes.push(node);
        }

        index.parent = vec![None; index.nodes.len()];
        index.children = vec![ChildList::new(); index.nodes.len()];

        let mut roots = Vec::new();
        for (slot, node) in index.nodes.iter().enumerate() {
            match &node.parent_id {
                None => roots.push(slot),
                Some(parent_id) => match index.by_id.get(parent_id) {
                    Some(&p) if p != slot => {
                        index.parent[slot] = Some(p);
                        index.children[p].push(slot);
                    }
                    Some(_) => index.problems.push(TreeError::Cycle {
                        id: node.id.clone(),
                    }),
                    None => index.problems.push(TreeError::MissingParent {
                        id: node.id.clone(),
                        parent: parent_id.clone(),
                    }),
                },
            }
        }

        match roots.as_slice() {
            [] if !index.nodes.is_empty() => index.problems.push(TreeError::NoRoot),
            [] => {}
            [only] => index.root = Some(*only),
            [first, ..] => {
                index.root = Some(*first);
                index.problems.push(TreeError::MultipleRoots {
                    ids: roots.iter().map(|&r| index.nodes[r].id.clone()).collect(),
                });
            }
        }

        index.detect_cycles();

        tracing::trace!(
            nodes = index.nodes.len(),
            problems = index.problems.len(),
            "tree index built"
        );
        index
    }

    /// Build from a borrowed collection
    #[must_use]
    pub fn from_nodes(nodes: &[TreeNode]) -> Self {
        Self::build(nodes.iter().cloned())
    }

    fn detect_cycles(&mut self) {
        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNSEEN; self.nodes.len()];
        let mut path = Vec::new();
        for start in 0..self.nodes.len() {
            let mut cursor = Some(start);
            while let Some(slot) = cursor {
                match state[slot] {
                    DONE => break,
                    ON_PATH => {
                        self.problems.push(TreeError::Cycle {
                            id: self.nodes[slot].id.clone(),
                        });
                        break;
                    }
                    _ => {
                        state[slot] = ON_PATH;
                        path.push(slot);
                        cursor = self.parent[slot];
                    }
                }
            }
            for slot in path.drain(..) {
                state[slot] = DONE;
            }
        }
    }

    /// Number of indexed nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lookup a node by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&TreeNode> {
        self.slot(id).map(|s| &self.nodes[s])
    }

    /// Check if a node exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    /// The absolute root, if the snapshot has one
    #[inline]
    #[must_use]
    pub fn absolute_root(&self) -> Option<&TreeNode> {
        self.root.map(|r| &self.nodes[r])
    }

    /// Indexed nodes in snapshot order
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Direct children of a node, in snapshot order
    pub fn children(&self, id: &NodeId) -> impl Iterator<Item = &TreeNode> {
        self.slot(id)
            .map(|s| self.children[s].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&c| &self.nodes[c])
    }

    /// Parent of a node
    #[must_use]
    pub fn parent(&self, id: &NodeId) -> Option<&TreeNode> {
        let slot = self.slot(id)?;
        self.parent[slot].map(|p| &self.nodes[p])
    }

    /// Ids from the top of the parent chain down to `id`, inclusive.
    ///
    /// For a well-formed tree the first element is the absolute root. Empty
    /// when `id` is unknown. A parent cycle ends the chain at the first
    /// repeated node.
    #[must_use]
    pub fn path_to(&self, id: &NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        let mut cursor = self.slot(id);
        while let Some(slot) = cursor {
            if std::mem::replace(&mut seen[slot], true) {
                break;
            }
            path.push(self.nodes[slot].id.clone());
            cursor = self.parent[slot];
        }
        path.reverse();
        path
    }

    /// Ids from `id` up to the top of the parent chain, inclusive
    #[must_use]
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut path = self.path_to(id);
        path.reverse();
        path
    }

    /// Number of parent hops from the top of the chain, `None` for unknown ids
    #[must_use]
    pub fn depth(&self, id: &NodeId) -> Option<usize> {
        let path = self.path_to(id);
        path.len().checked_sub(1)
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        let path = self.path_to(id);
        path.split_last()
            .is_some_and(|(_, above)| above.contains(ancestor))
    }

    /// All strict descendants of `id` in pre-order
    #[must_use]
    pub fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(start) = self.slot(id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.walk_preorder(start, |_| true, |slot| {
            if slot != start {
                out.push(self.nodes[slot].id.clone());
            }
        });
        out
    }

    /// Structural diagnostics collected while indexing
    ///
    /// # Errors
    /// Returns every invariant violation found in the snapshot.
    pub fn validate(&self) -> Result<(), Vec<TreeError>> {
        if self.problems.is_empty() {
            Ok(())
        } else {
            Err(self.problems.clone())
        }
    }

    // Arena access for the layout stages

    /// Arena slot of a node
    #[inline]
    #[must_use]
    pub fn slot(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Node stored at an arena slot
    ///
    /// # Panics
    /// Panics if `slot` did not come from this index.
    #[inline]
    #[must_use]
    pub fn node_at(&self, slot: usize) -> &TreeNode {
        &self.nodes[slot]
    }

    /// Child slots of an arena slot
    #[inline]
    #[must_use]
    pub fn children_at(&self, slot: usize) -> &[usize] {
        self.children.get(slot).map_or(&[], |c| c.as_slice())
    }

    /// Parent slot of an arena slot
    #[inline]
    #[must_use]
    pub fn parent_at(&self, slot: usize) -> Option<usize> {
        self.parent.get(slot).copied().flatten()
    }

    /// Iterative pre-order walk from `start`.
    ///
    /// `descend(slot)` decides whether the children of a visited slot are
    /// walked. Each slot is visited at most once even if the parent links
    /// contain a cycle.
    pub(crate) fn walk_preorder(
        &self,
        start: usize,
        mut descend: impl FnMut(usize) -> bool,
        mut visit: impl FnMut(usize),
    ) {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![start];
        while let Some(slot) = stack.pop() {
            if std::mem::replace(&mut seen[slot], true) {
                continue;
            }
            visit(slot);
            if descend(slot) {
                stack.extend(self.children[slot].iter().rev().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_model::NodeKind;
    use pretty_assertions::assert_eq;

    fn node(id: &str, parent: Option<&str>) -> TreeNode {
        let kind = if parent.is_none() { NodeKind::Root } else { NodeKind::Item };
        TreeNode::new(id, parent.map(NodeId::from), kind)
    }

    fn ids(raw: &[&str]) -> Vec<NodeId> {
        raw.iter().map(|s| NodeId::from(*s)).collect()
    }

    fn sample() -> TreeIndex {
        TreeIndex::build(vec![
            node("a", None),
            node("b", Some("a")),
            node("c", Some("b")),
            node("d", Some("b")),
            node("e", Some("a")),
        ])
    }

    #[test]
    fn index_children_in_snapshot_order() {
        let index = sample();
        let children: Vec<_> = index.children(&"b".into()).map(|n| n.id.clone()).collect();
        assert_eq!(children, ids(&["c", "d"]));
        assert_eq!(index.children(&"missing".into()).count(), 0);
    }

    #[test]
    fn index_root_parent_and_depth() {
        let index = sample();
        assert_eq!(index.absolute_root().unwrap().id, NodeId::from("a"));
        assert_eq!(index.parent(&"c".into()).unwrap().id, NodeId::from("b"));
        assert_eq!(index.depth(&"c".into()), Some(2));
        assert_eq!(index.depth(&"nope".into()), None);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn index_path_and_ancestry() {
        let index = sample();
        assert_eq!(index.path_to(&"d".into()), ids(&["a", "b", "d"]));
        assert!(index.is_ancestor(&"a".into(), &"d".into()));
        assert!(!index.is_ancestor(&"d".into(), &"d".into()));
        assert!(!index.is_ancestor(&"e".into(), &"d".into()));
    }

    #[test]
    fn index_descendants_preorder() {
        let index = sample();
        assert_eq!(index.descendants(&"a".into()), ids(&["b", "c", "d", "e"]));
        assert!(index.descendants(&"c".into()).is_empty());
    }

    #[test]
    fn index_reports_duplicates_and_orphans() {
        let index = TreeIndex::build(vec![
            node("a", None),
            node("b", Some("a")),
            node("b", Some("a")),
            node("o", Some("ghost")),
        ]);
        let problems = index.validate().unwrap_err();
        assert!(problems.contains(&TreeError::DuplicateId { id: "b".into() }));
        assert!(problems.contains(&TreeError::MissingParent {
            id: "o".into(),
            parent: "ghost".into()
        }));
        assert_eq!(index.len(), 3);
        assert!(!index.descendants(&"a".into()).contains(&"o".into()));
    }

    #[test]
    fn index_reports_multiple_roots_and_keeps_first() {
        let index = TreeIndex::build(vec![node("a", None), node("z", None)]);
        assert_eq!(index.absolute_root().unwrap().id, NodeId::from("a"));
        assert!(matches!(
            index.validate().unwrap_err().as_slice(),
            [TreeError::MultipleRoots { .. }]
        ));
    }

    #[test]
    fn index_survives_cycles() {
        let index = TreeIndex::build(vec![
            node("a", None),
            node("x", Some("y")),
            node("y", Some("x")),
            node("s", Some("s")),
        ]);
        let problems = index.validate().unwrap_err();
        assert!(problems.iter().any(|p| matches!(p, TreeError::Cycle { .. })));
        assert!(problems.contains(&TreeError::Cycle { id: "s".into() }));

        // Walks terminate
        assert_eq!(index.descendants(&"x".into()), ids(&["y"]));
        assert_eq!(index.path_to(&"x".into()).len(), 2);
    }

    #[test]
    fn empty_index_has_no_root_and_no_problems() {
        let index = TreeIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.absolute_root().is_none());
        assert!(index.validate().is_ok());
    }
}
