//! Anchor resolution and bucketing
//!
//! Each cross-reference hangs off exactly one visible node. Cross-references
//! sharing an anchor form a bucket and stack in `(code, label, id)` order.

use indexmap::IndexMap;
use planboard_model::{CrossRef, NodeId};
use planboard_tree::VisibleSet;

/// Linked node ids that are currently visible, in link order, deduplicated
#[must_use]
pub fn visible_links(cross_ref: &CrossRef, visible: &VisibleSet) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(cross_ref.node_ids.len());
    for id in &cross_ref.node_ids {
        if visible.contains(id) && !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// The node a cross-reference's marker attaches to.
///
/// A stored anchor wins while it is a visible linked node. Otherwise the
/// byte-wise smallest visible linked id is chosen, so the pick does not
/// depend on link order. `None` when no linked node is visible.
#[must_use]
pub fn resolve_anchor(cross_ref: &CrossRef, visible: &VisibleSet) -> Option<NodeId> {
    let linked = visible_links(cross_ref, visible);
    if let Some(stored) = &cross_ref.anchor_node_id {
        if linked.contains(stored) {
            return Some(stored.clone());
        }
    }
    linked
        .into_iter()
        .min_by(|a, b| a.as_str().as_bytes().cmp(b.as_str().as_bytes()))
}

/// One anchor and the cross-references stacked on it
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorBucket<'a> {
    pub anchor: NodeId,
    pub members: Vec<&'a CrossRef>,
}

/// Bucket cross-references by anchor.
///
/// Buckets come out in the visible order of their anchors; members are
/// sorted by `(code, label, id)`. Unanchored cross-references are dropped.
#[must_use]
pub fn group_by_anchor<'a>(
    cross_refs: &'a [CrossRef],
    visible: &VisibleSet,
) -> Vec<AnchorBucket<'a>> {
    let mut buckets: IndexMap<NodeId, Vec<&'a CrossRef>> = IndexMap::new();
    for cross_ref in cross_refs {
        if let Some(anchor) = resolve_anchor(cross_ref, visible) {
            buckets.entry(anchor).or_default().push(cross_ref);
        }
    }

    buckets.sort_by_cached_key(|anchor, _| visible.position(anchor).unwrap_or(usize::MAX));

    buckets
        .into_iter()
        .map(|(anchor, mut members)| {
            members.sort_by(|a, b| {
                (&a.code, &a.label, &a.id).cmp(&(&b.code, &b.label, &b.id))
            });
            AnchorBucket { anchor, members }
        })
        .collect()
}
