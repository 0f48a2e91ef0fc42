//! Planboard Core
//!
//! Deterministic view pipeline for tree-structured planning boards.
//!
//! # Architecture
//!
//! ```text
//! BoardSource + SessionSource
//!         │
//!         ▼
//!   TreeIndex ─► VisibleSet ─► LayoutPositions ─► NodeBounds ─► PortalPlacements
//!                                                                     │
//!                                                   AdjacencyIndex ◄──┘
//!         │
//!         ▼
//!     ViewModel
//! ```
//!
//! # Example
//!
//! ```rust
//! use planboard_core::prelude::*;
//!
//! let board = BoardSnapshot::new(
//!     vec![
//!         TreeNode::new("a", None, NodeKind::Root),
//!         TreeNode::new("b", Some(NodeId::from("a")), NodeKind::Item),
//!     ],
//!     vec![CrossRef::new("x", "XX", "Example").linked_to(["b"])],
//! );
//! let engine = PlanningEngine::default();
//! let view = engine.compute(&board, &UiState::new("a"));
//!
//! assert_eq!(view.visible.len(), 2);
//! assert_eq!(view.placements.len(), 1);
//! ```

#![allow(missing_docs)]

pub mod adjacency;
pub mod engine;
pub mod error;
pub mod source;
pub mod view;

// Re-exports
pub use adjacency::{
    scene_edges, AdjacencyIndex, Edge, EdgeId, EdgeKind, HoverTarget, Related, SceneKey,
};
pub use engine::PlanningEngine;
pub use error::{PlanboardError, Result, StoreError};
pub use source::{BoardSource, MutationSink, SessionSource, UiState};
pub use view::{Breadcrumb, ViewModel};

pub use planboard_layout::{LayoutMode, LayoutPositions, NodeBounds, ResizeSession};
pub use planboard_portal::{PortalPlacement, PortalPlacements};
pub use planboard_tree::{TreeIndex, VisibleSet};

/// Prelude for hosts driving the engine
pub mod prelude {
    pub use crate::{
        BoardSource, HoverTarget, MutationSink, PlanningEngine, SceneKey, SessionSource,
        UiState, ViewModel,
    };
    pub use planboard_model::prelude::*;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
