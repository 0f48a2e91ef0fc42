//! Planboard Layout
//!
//! Turns a visible set into canvas geometry.
//!
//! # Overview
//!
//! - **compute_layout**: tidy-tree or story-lane positions, chosen per scope
//! - **resolve_node_bounds**: size negotiation and per-node boxes
//! - **ResizeSession**: live clamped preview of a drag, committed as a mutation
//!
//! # Example
//!
//! ```rust
//! use planboard_layout::compute_layout;
//! use planboard_model::{BoardConfig, NodeId, NodeKind, Point, TreeNode};
//! use planboard_tree::{project_visibility, TreeIndex};
//! use std::collections::HashSet;
//!
//! let index = TreeIndex::build(vec![
//!     TreeNode::new("a", None, NodeKind::Root),
//!     TreeNode::new("b", Some(NodeId::from("a")), NodeKind::Item),
//! ]);
//! let visible = project_visibility(&index, &NodeId::from("a"), &HashSet::new(), "");
//! let positions = compute_layout(&index, &visible, false, &BoardConfig::default());
//!
//! assert_eq!(positions.get(&NodeId::from("b")), Some(Point::new(280.0, 0.0)));
//! ```

#![allow(missing_docs)]

mod compute;
mod hierarchical;
mod lane;
pub mod positions;
pub mod resize;
pub mod sizing;
mod traverse;

// Re-exports
pub use compute::{compute_layout, layout_mode};
pub use positions::{LayoutMode, LayoutPositions};
pub use resize::{reset_size, ResizeSession};
pub use sizing::{
    clamp_size, resolve_node_bounds, resolve_size, NodeBounds, NodeDisplay, SizeContext,
};

/// Commonly used layout types
pub mod prelude {
    pub use crate::{
        compute_layout, resolve_node_bounds, LayoutMode, LayoutPositions, NodeBounds,
        ResizeSession, SizeContext,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
