//! Planning engine
//!
//! Runs the full pipeline for one snapshot and one session:
//!
//! 1. index the snapshot and project the visible set
//! 2. compute positions and negotiate node boxes
//! 3. anchor and place cross-reference markers
//! 4. build the hover adjacency
//!
//! Every pass recomputes from scratch. Nothing is cached between calls.

use crate::adjacency::{scene_edges, AdjacencyIndex, Related};
use crate::error::{Result, StoreError};
use crate::source::{BoardSource, MutationSink, SessionSource};
use crate::view::{Breadcrumb, ViewModel};
use indexmap::IndexMap;
use planboard_layout::{compute_layout, resolve_node_bounds, ResizeSession, SizeContext};
use planboard_model::{code_collisions, BoardConfig, BoardMutation, NodeId, Rect};
use planboard_portal::place_portals;
use planboard_tree::{project_visibility, recover_scope, TreeIndex};
use std::path::Path;
use tracing::{debug, info_span, warn};

/// Stateless layout engine bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct PlanningEngine {
    config: BoardConfig,
}

impl PlanningEngine {
    /// Create an engine; unusable configuration values are corrected
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// Create an engine from a TOML configuration file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BoardConfig::load(path)?))
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Compute the view model for a snapshot and session
    #[must_use]
    pub fn compute<B, S>(&self, board: &B, session: &S) -> ViewModel
    where
        B: BoardSource + ?Sized,
        S: SessionSource + ?Sized,
    {
        let span = info_span!(
            "planboard.compute",
            nodes = board.all_nodes().len(),
            cross_refs = board.all_cross_refs().len()
        );
        let _enter = span.enter();

        let index = TreeIndex::build(board.all_nodes().iter().cloned());
        if let Err(problems) = index.validate() {
            warn!(count = problems.len(), "board snapshot has structural problems");
            for problem in &problems {
                debug!(%problem, "structural problem");
            }
        }

        let scope = session.scope_root_id();
        let visible = project_visibility(
            &index,
            scope,
            session.collapsed_ids(),
            session.search_query(),
        );
        debug!(
            visible = visible.len(),
            matches = visible.matches().len(),
            "visibility projected"
        );
        let suggested_scope = if visible.is_empty() {
            recover_scope(&index, Some(scope))
        } else {
            None
        };

        let positions = compute_layout(&index, &visible, session.lane_mode_enabled(), &self.config);
        let ctx = SizeContext::new(positions.mode().is_lanes(), session.expanded_ids());
        let bounds = resolve_node_bounds(&index, &visible, &positions, &ctx, &self.config.sizing);

        let placements = place_portals(
            board.all_cross_refs(),
            &visible,
            &bounds,
            session.active_cross_ref_id(),
            &self.config.portal,
        );

        let edges = scene_edges(&index, &visible, &placements);
        let adjacency = AdjacencyIndex::build(&edges);
        let related = session
            .hover_state()
            .map_or_else(Related::default, |hover| adjacency.related(hover));
        debug!(
            edges = edges.len(),
            highlighted = related.elements.len(),
            "adjacency built"
        );

        let markers: Vec<Rect> = placements.iter().map(|p| p.rect()).collect();
        let scene_bounds = Rect::bounding(bounds.rects().chain(&markers));

        let breadcrumbs = if visible.is_empty() {
            Vec::new()
        } else {
            index
                .path_to(scope)
                .into_iter()
                .filter_map(|id| {
                    index.get(&id).map(|n| Breadcrumb {
                        title: n.title.clone(),
                        id,
                    })
                })
                .collect()
        };

        let story_progress: IndexMap<_, _> = visible
            .ids()
            .filter_map(|id| index.get(id))
            .filter(|n| !n.story_steps.is_empty())
            .map(|n| (n.id.clone(), n.story_progress()))
            .collect();

        ViewModel {
            visible,
            positions,
            bounds,
            placements,
            edges,
            adjacency,
            related,
            breadcrumbs,
            scene_bounds,
            code_collisions: code_collisions(board.all_cross_refs()),
            story_progress,
            suggested_scope,
        }
    }

    /// Start resizing a visible node from its current box
    #[must_use]
    pub fn begin_resize(&self, view: &ViewModel, node: &NodeId) -> Option<ResizeSession> {
        let bounds = *view.bounds.get(node)?;
        Some(ResizeSession::begin(node.clone(), bounds, self.config.sizing))
    }

    /// Finish a resize and forward the committed size
    ///
    /// # Errors
    /// Returns the sink's error if the store rejects the size.
    pub fn commit_resize(
        &self,
        session: ResizeSession,
        sink: &mut dyn MutationSink,
    ) -> std::result::Result<BoardMutation, StoreError> {
        submit(sink, session.finish())
    }

    /// Ask the store to drop a node's size override
    ///
    /// # Errors
    /// Returns the sink's error if the store rejects the request.
    pub fn reset_size(
        &self,
        node: &NodeId,
        sink: &mut dyn MutationSink,
    ) -> std::result::Result<BoardMutation, StoreError> {
        submit(sink, planboard_layout::reset_size(node.clone()))
    }

    /// Ask the store to flip a node's collapse flag
    ///
    /// # Errors
    /// Returns the sink's error if the store rejects the request.
    pub fn toggle_collapsed(
        &self,
        node: &NodeId,
        sink: &mut dyn MutationSink,
    ) -> std::result::Result<BoardMutation, StoreError> {
        submit(
            sink,
            BoardMutation::ToggleCollapsed {
                node_id: node.clone(),
            },
        )
    }
}

fn submit(
    sink: &mut dyn MutationSink,
    mutation: BoardMutation,
) -> std::result::Result<BoardMutation, StoreError> {
    sink.submit(mutation.clone()).map_err(|err| {
        warn!(node = %mutation.node_id(), %err, "mutation rejected by sink");
        err
    })?;
    Ok(mutation)
}
