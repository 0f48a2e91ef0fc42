//! Visibility and collapse projection
//!
//! [`project_visibility`] turns a scope root, the collapsed set and the
//! search text into the ordered [`VisibleSet`] every later stage consumes.

use crate::index::TreeIndex;
use indexmap::IndexSet;
use planboard_model::{NodeId, TreeNode};
use std::collections::HashSet;

/// Ordered visible node ids plus search matches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibleSet {
    scope_root: Option<NodeId>,
    ids: IndexSet<NodeId>,
    matches: IndexSet<NodeId>,
}

impl VisibleSet {
    /// Empty projection, used for unknown scope roots
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build directly from an ordered id list, without search matches.
    ///
    /// The first id is taken as the scope root.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        let ids: IndexSet<NodeId> = ids.into_iter().collect();
        Self {
            scope_root: ids.first().cloned(),
            ids,
            matches: IndexSet::new(),
        }
    }

    /// The scope root, `None` for an empty projection
    #[inline]
    #[must_use]
    pub fn scope_root(&self) -> Option<&NodeId> {
        self.scope_root.as_ref()
    }

    /// Visible ids in pre-order, scope root first
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &NodeId> + DoubleEndedIterator {
        self.ids.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    /// Visit-order position of a visible node
    #[inline]
    #[must_use]
    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    /// Visible node at a visit-order position
    #[inline]
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<&NodeId> {
        self.ids.get_index(position)
    }

    /// Visible nodes whose title matches the search query, in visit order
    pub fn matches(&self) -> impl ExactSizeIterator<Item = &NodeId> {
        self.matches.iter()
    }

    /// Whether a node matched the search query
    #[inline]
    #[must_use]
    pub fn is_match(&self, id: &NodeId) -> bool {
        self.matches.contains(id)
    }

    /// Visible children of a node, in snapshot order
    pub fn children_of<'a>(
        &'a self,
        index: &'a TreeIndex,
        id: &NodeId,
    ) -> impl Iterator<Item = &'a TreeNode> + 'a {
        let slots = if self.contains(id) {
            index.slot(id).map_or(&[][..], |s| index.children_at(s))
        } else {
            &[]
        };
        slots
            .iter()
            .map(move |&c| index.node_at(c))
            .filter(move |child| self.contains(&child.id))
    }
}

/// Compute the visible subtree under `scope_root`.
///
/// The result holds the scope root followed by its descendants in
/// pre-order, skipping everything below a collapsed node (the collapsed
/// node itself stays visible). Search matches are computed over that
/// filtered set: a node matches when its title contains `search_query`,
/// ignoring case. A blank query matches nothing.
///
/// An unknown scope root yields an empty set; see [`recover_scope`].
#[must_use]
pub fn project_visibility(
    index: &TreeIndex,
    scope_root: &NodeId,
    collapsed: &HashSet<NodeId>,
    search_query: &str,
) -> VisibleSet {
    let Some(start) = index.slot(scope_root) else {
        tracing::debug!(scope_root = %scope_root, "scope root not in snapshot");
        return VisibleSet::empty();
    };

    let mut ids = IndexSet::new();
    index.walk_preorder(
        start,
        |slot| !collapsed.contains(&index.node_at(slot).id),
        |slot| {
            ids.insert(index.node_at(slot).id.clone());
        },
    );

    let needle = search_query.trim().to_lowercase();
    let matches = if needle.is_empty() {
        IndexSet::new()
    } else {
        ids.iter()
            .filter(|id| {
                index
                    .get(id)
                    .is_some_and(|n| n.title.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    };

    tracing::debug!(
        scope_root = %scope_root,
        visible = ids.len(),
        matches = matches.len(),
        "visibility projected"
    );

    VisibleSet {
        scope_root: Some(scope_root.clone()),
        ids,
        matches,
    }
}

/// Pick a usable scope root.
///
/// Returns `preferred` when it is in the snapshot, otherwise the absolute
/// root, and `None` only for an empty snapshot.
#[must_use]
pub fn recover_scope(index: &TreeIndex, preferred: Option<&NodeId>) -> Option<NodeId> {
    if let Some(id) = preferred.filter(|id| index.contains(id)) {
        return Some(id.clone());
    }
    let fallback = index.absolute_root().map(|n| n.id.clone());
    if let (Some(wanted), Some(root)) = (preferred, fallback.as_ref()) {
        tracing::debug!(wanted = %wanted, fallback = %root, "scope root recovered");
    }
    fallback
}
