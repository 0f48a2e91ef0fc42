//! Cross-reference ("bubble") records
//!
//! A [`CrossRef`] is a shared annotation linked to any number of nodes. The
//! persistence layer owns it; the engine reads one snapshot per pass.

use crate::ids::{CrossRefId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shared annotation linkable to multiple nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossRef {
    pub id: CrossRefId,
    #[serde(default)]
    pub label: String,
    /// Short display token. Not required to be unique, see [`code_collisions`].
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub links: Vec<String>,
    /// Linked nodes. May be empty or reference nodes that are not visible.
    #[serde(default)]
    pub node_ids: Vec<NodeId>,
    /// Preferred anchor, honoured only while it is a visible linked node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_node_id: Option<NodeId>,
    #[serde(default)]
    pub updated_at_ms: u64,
}

impl CrossRef {
    /// Create an unlinked cross-reference
    #[must_use]
    pub fn new(id: impl Into<CrossRefId>, code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            code: code.into(),
            color: String::new(),
            entity_type: String::new(),
            tags: Vec::new(),
            contact: String::new(),
            notes: String::new(),
            links: Vec::new(),
            node_ids: Vec::new(),
            anchor_node_id: None,
            updated_at_ms: 0,
        }
    }

    /// With linked nodes
    #[must_use]
    pub fn linked_to<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.node_ids = nodes.into_iter().map(Into::into).collect();
        self
    }

    /// With a preferred anchor
    #[inline]
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<NodeId>) -> Self {
        self.anchor_node_id = Some(anchor.into());
        self
    }

    /// Whether the cross-reference links to `node`
    #[inline]
    #[must_use]
    pub fn links_node(&self, node: &NodeId) -> bool {
        self.node_ids.contains(node)
    }
}

/// Codes shared by two or more cross-references.
///
/// Codes are compared trimmed and case-insensitively; empty codes are
/// ignored. Keys are the normalized (uppercase) code, values the colliding
/// ids in snapshot order.
#[must_use]
pub fn code_collisions(cross_refs: &[CrossRef]) -> BTreeMap<String, Vec<CrossRefId>> {
    let mut by_code: BTreeMap<String, Vec<CrossRefId>> = BTreeMap::new();
    for xref in cross_refs {
        let code = xref.code.trim();
        if code.is_empty() {
            continue;
        }
        by_code
            .entry(code.to_uppercase())
            .or_default()
            .push(xref.id.clone());
    }
    by_code.retain(|_, ids| ids.len() > 1);
    by_code
}
