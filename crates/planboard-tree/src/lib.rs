//! Planboard Tree
//!
//! Arena-backed tree index and visibility projection.
//!
//! # Overview
//!
//! - **TreeIndex**: `id → node` and `parent → children` over one snapshot
//! - **project_visibility**: scoped, collapse-aware, search-annotated visible set
//! - **TreeError**: structural diagnostics for malformed snapshots
//!
//! # Example
//!
//! ```rust
//! use planboard_model::{NodeId, NodeKind, TreeNode};
//! use planboard_tree::{project_visibility, TreeIndex};
//! use std::collections::HashSet;
//!
//! let index = TreeIndex::build(vec![
//!     TreeNode::new("a", None, NodeKind::Root),
//!     TreeNode::new("b", Some(NodeId::from("a")), NodeKind::Project),
//!     TreeNode::new("c", Some(NodeId::from("b")), NodeKind::Item),
//! ]);
//!
//! let collapsed: HashSet<NodeId> = [NodeId::from("b")].into_iter().collect();
//! let visible = project_visibility(&index, &NodeId::from("a"), &collapsed, "");
//! assert_eq!(visible.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod index;
pub mod visibility;

// Re-exports
pub use error::TreeError;
pub use index::TreeIndex;
pub use visibility::{project_visibility, recover_scope, VisibleSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
