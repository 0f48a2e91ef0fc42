//! Testing utilities for planboard workspace
//!
//! Shared board fixtures, node builders and tracing setup.

#![allow(missing_docs)]

use planboard_model::{BoardSnapshot, CrossRef, NodeId, NodeKind, TreeNode};
use std::collections::HashSet;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn node(id: &str, parent: Option<&str>, kind: NodeKind) -> TreeNode {
    TreeNode::new(id, parent.map(NodeId::from), kind).with_title(id.to_uppercase())
}

pub fn root(id: &str) -> TreeNode {
    node(id, None, NodeKind::Root)
}

pub fn item(id: &str, parent: &str) -> TreeNode {
    node(id, Some(parent), NodeKind::Item)
}

pub fn project(id: &str, parent: &str) -> TreeNode {
    node(id, Some(parent), NodeKind::Project)
}

pub fn story(id: &str, parent: &str) -> TreeNode {
    node(id, Some(parent), NodeKind::Story)
}

pub fn ids(raw: &[&str]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

pub fn id_set(raw: &[&str]) -> HashSet<NodeId> {
    raw.iter().map(|s| NodeId::from(*s)).collect()
}

/// `root(A) → project(B) → item(C), item(D)`
pub fn sample_nodes() -> Vec<TreeNode> {
    vec![root("A"), project("B", "A"), item("C", "B"), item("D", "B")]
}

/// Sample tree plus one cross-reference linked to `C` and `D`
pub fn sample_board() -> BoardSnapshot {
    BoardSnapshot::new(
        sample_nodes(),
        vec![CrossRef::new("x1", "AL", "Ada Lovelace").linked_to(["C", "D"])],
    )
}

/// Story scope `S` with two lanes:
///
/// ```text
/// S (story)
/// ├── L1 (story) ── s1 (story) ── s2 (story)
/// │                 └── n1 (item)
/// └── L2 (story)
///     ├── n2 (item)
///     └── n3 (item)
/// ```
pub fn story_nodes() -> Vec<TreeNode> {
    vec![
        root("R"),
        story("S", "R"),
        story("L1", "S"),
        story("L2", "S"),
        story("s1", "L1"),
        item("n1", "s1"),
        story("s2", "s1"),
        item("n2", "L2"),
        item("n3", "L2"),
    ]
}

/// Single chain `n0 → n1 → … → n{len-1}`
pub fn deep_chain(len: usize) -> Vec<TreeNode> {
    (0..len)
        .map(|i| {
            let id = format!("n{i}");
            if i == 0 {
                root(&id)
            } else {
                item(&id, &format!("n{}", i - 1))
            }
        })
        .collect()
}

/// Complete tree with `fanout` children per node and `depth` levels below the root
pub fn wide_tree(fanout: usize, depth: usize) -> Vec<TreeNode> {
    let mut nodes = vec![root("r")];
    let mut frontier = vec!["r".to_string()];
    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            for k in 0..fanout {
                let id = format!("{parent}.{k}");
                nodes.push(item(&id, parent));
                next.push(id);
            }
        }
        frontier = next;
    }
    nodes
}
