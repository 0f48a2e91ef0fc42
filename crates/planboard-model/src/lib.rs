//! Planboard Model
//!
//! Records, identifiers, geometry and configuration shared by every stage
//! of the planboard layout engine.
//!
//! # Core Concepts
//!
//! - [`TreeNode`]: one item of the planning hierarchy, with stored overrides
//! - [`CrossRef`]: a shared annotation linked to many nodes
//! - [`Rect`] / [`clamp`]: canvas geometry primitives
//! - [`BoardConfig`]: spacing, sizing and placement constants
//!
//! # Example
//!
//! ```rust
//! use planboard_model::{NodeKind, TreeNode, NodeId, Point};
//!
//! let node = TreeNode::new("scene-1", Some(NodeId::from("act-1")), NodeKind::Story)
//!     .with_title("Opening")
//!     .with_position(10.0, 20.0);
//!
//! assert_eq!(node.effective_position(Point::default()), Point::new(10.0, 20.0));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod cross_ref;
mod error;
mod geometry;
mod ids;
mod mutation;
mod node;
mod snapshot;

// Re-exports
pub use config::{BoardConfig, LaneConfig, LayoutConfig, PortalConfig, SizingConfig};
pub use cross_ref::{code_collisions, CrossRef};
pub use error::{ConfigError, SnapshotError};
pub use geometry::{clamp, Point, Rect, Size};
pub use ids::{CrossRefId, NodeId};
pub use mutation::BoardMutation;
pub use node::{NodeKind, StoryProgress, StoryStep, TaskStatus, TreeNode};
pub use snapshot::BoardSnapshot;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with board records
    pub use crate::{
        BoardConfig, BoardMutation, BoardSnapshot, CrossRef, CrossRefId, NodeId, NodeKind, Point, Rect, Size,
        TreeNode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
