//! Hover adjacency
//!
//! Scene elements are nodes and portal markers. Edges connect a parent to
//! a visible child and a marker to each visible node it links. Hovering an
//! element highlights its neighbourhood; hovering an edge highlights both
//! ends.

use indexmap::{IndexMap, IndexSet};
use planboard_model::{CrossRefId, NodeId};
use planboard_portal::PortalPlacements;
use planboard_tree::{TreeIndex, VisibleSet};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A hoverable element of the scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum SceneKey {
    Node(NodeId),
    Portal(CrossRefId),
}

impl Display for SceneKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node:{id}"),
            Self::Portal(id) => write!(f, "portal:{id}"),
        }
    }
}

/// Stable edge id, `tree:{parent}->{child}` or `portal:{crossRef}->{node}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    #[must_use]
    pub fn tree(parent: &NodeId, child: &NodeId) -> Self {
        Self(format!("tree:{parent}->{child}"))
    }

    #[must_use]
    pub fn portal(cross_ref: &CrossRefId, node: &NodeId) -> Self {
        Self(format!("portal:{cross_ref}->{node}"))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    Tree,
    Portal,
}

/// A drawn connection between two scene elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub source: SceneKey,
    pub target: SceneKey,
}

/// Build the edges drawn for this pass.
///
/// Tree edges come first in visible order, then portal edges in placement
/// order.
#[must_use]
pub fn scene_edges(
    index: &TreeIndex,
    visible: &VisibleSet,
    placements: &PortalPlacements,
) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(visible.len() + placements.len());

    for id in visible.ids() {
        let Some(parent) = index.parent(id) else {
            continue;
        };
        if visible.contains(&parent.id) {
            edges.push(Edge {
                id: EdgeId::tree(&parent.id, id),
                kind: EdgeKind::Tree,
                source: SceneKey::Node(parent.id.clone()),
                target: SceneKey::Node(id.clone()),
            });
        }
    }

    for placement in placements.iter() {
        for node in &placement.linked {
            edges.push(Edge {
                id: EdgeId::portal(&placement.cross_ref_id, node),
                kind: EdgeKind::Portal,
                source: SceneKey::Portal(placement.cross_ref_id.clone()),
                target: SceneKey::Node(node.clone()),
            });
        }
    }
    edges
}

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum HoverTarget {
    Element(SceneKey),
    Edge(EdgeId),
}

/// Elements and edges to highlight for a hover
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Related {
    pub elements: IndexSet<SceneKey>,
    pub edges: IndexSet<EdgeId>,
}

impl Related {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.edges.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains_element(&self, key: &SceneKey) -> bool {
        self.elements.contains(key)
    }

    #[inline]
    #[must_use]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }
}

/// Element → incident edges, element → neighbours, edge → endpoints
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyIndex {
    incident: IndexMap<SceneKey, IndexSet<EdgeId>>,
    neighbors: IndexMap<SceneKey, IndexSet<SceneKey>>,
    endpoints: IndexMap<EdgeId, (SceneKey, SceneKey)>,
}

impl AdjacencyIndex {
    /// Index a set of edges; a repeated edge id keeps its first endpoints
    #[must_use]
    pub fn build<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut index = Self::default();
        for edge in edges {
            if index.endpoints.contains_key(&edge.id) {
                continue;
            }
            index
                .endpoints
                .insert(edge.id.clone(), (edge.source.clone(), edge.target.clone()));
            for (me, other) in [(&edge.source, &edge.target), (&edge.target, &edge.source)] {
                index
                    .incident
                    .entry(me.clone())
                    .or_default()
                    .insert(edge.id.clone());
                index
                    .neighbors
                    .entry(me.clone())
                    .or_default()
                    .insert(other.clone());
            }
        }
        index
    }

    pub fn neighbors(&self, key: &SceneKey) -> impl Iterator<Item = &SceneKey> {
        self.neighbors.get(key).into_iter().flatten()
    }

    pub fn incident(&self, key: &SceneKey) -> impl Iterator<Item = &EdgeId> {
        self.incident.get(key).into_iter().flatten()
    }

    #[must_use]
    pub fn endpoints(&self, edge: &EdgeId) -> Option<&(SceneKey, SceneKey)> {
        self.endpoints.get(edge)
    }

    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Neighbourhood of a hover target; unknown ids give an empty result
    #[must_use]
    pub fn related(&self, hover: &HoverTarget) -> Related {
        let mut related = Related::default();
        match hover {
            HoverTarget::Element(key) => {
                let (Some(neighbors), Some(incident)) =
                    (self.neighbors.get(key), self.incident.get(key))
                else {
                    return related;
                };
                related.elements.insert(key.clone());
                related.elements.extend(neighbors.iter().cloned());
                related.edges.extend(incident.iter().cloned());
            }
            HoverTarget::Edge(edge) => {
                let Some((source, target)) = self.endpoints.get(edge) else {
                    return related;
                };
                related.edges.insert(edge.clone());
                related.elements.insert(source.clone());
                related.elements.insert(target.clone());
            }
        }
        related
    }
}
