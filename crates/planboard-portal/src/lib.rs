//! Planboard Portal
//!
//! Cross-reference markers ("portals") drawn next to the node they anchor to.
//!
//! # Overview
//!
//! - **resolve_anchor**: stored anchor if visible, else the smallest visible linked id
//! - **place_portals**: stacked candidates, side fallback and a capped collision scan
//! - **jitter**: stateless per-id horizontal offset from a Blake3 seed
//!
//! Placement is a pure function of its inputs: equal snapshots give
//! bit-identical markers.

#![allow(missing_docs)]

pub mod anchor;
pub mod jitter;
mod obstacles;
pub mod placement;

// Re-exports
pub use anchor::{group_by_anchor, resolve_anchor, visible_links, AnchorBucket};
pub use jitter::jitter;
pub use placement::{place_portals, PortalPlacement, PortalPlacements};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
