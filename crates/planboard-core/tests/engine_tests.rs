use planboard_core::prelude::*;
use planboard_core::{EdgeId, LayoutMode};
use planboard_model::StoryStep;
use planboard_test_utils::{init_tracing, item, root, sample_board, story_nodes};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn positions(view: &ViewModel) -> Vec<(String, Point)> {
    view.visible
        .ids()
        .map(|id| (id.to_string(), view.position(id).unwrap()))
        .collect()
}

#[test]
fn reference_scenario_end_to_end() {
    init_tracing();
    let engine = PlanningEngine::default();
    let view = engine.compute(&sample_board(), &UiState::new("A"));

    assert_eq!(
        positions(&view),
        vec![
            ("A".to_string(), Point::new(0.0, 70.0)),
            ("B".to_string(), Point::new(280.0, 70.0)),
            ("C".to_string(), Point::new(560.0, 0.0)),
            ("D".to_string(), Point::new(560.0, 140.0)),
        ]
    );

    let x1 = view.placements.get(&"x1".into()).unwrap();
    assert_eq!(x1.anchor, NodeId::from("C"));
    assert_eq!(x1.y, 74.0);

    let edge_ids: Vec<&str> = view.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        edge_ids,
        vec![
            "tree:A->B",
            "tree:B->C",
            "tree:B->D",
            "portal:x1->C",
            "portal:x1->D"
        ]
    );
    assert_eq!(view.scene_bounds, Some(Rect::new(0.0, 0.0, 760.0, 204.0)));
    assert_eq!(view.breadcrumbs.len(), 1);
}

#[test]
fn collapsing_b_hides_children_and_marker() {
    let engine = PlanningEngine::default();
    let view = engine.compute(&sample_board(), &UiState::new("A").with_collapsed(["B"]));
    assert_eq!(
        positions(&view),
        vec![
            ("A".to_string(), Point::new(0.0, 0.0)),
            ("B".to_string(), Point::new(280.0, 0.0)),
        ]
    );
    assert!(view.placements.is_empty());
    assert_eq!(view.edges.len(), 1);
}

#[test]
fn hover_highlights_neighbourhood() {
    let engine = PlanningEngine::default();
    let session = UiState::new("A").with_hover(HoverTarget::Element(SceneKey::Node("C".into())));
    let view = engine.compute(&sample_board(), &session);

    let elements: Vec<String> = view.related.elements.iter().map(ToString::to_string).collect();
    assert_eq!(elements, vec!["node:C", "node:B", "portal:x1"]);
    assert!(view.related.contains_edge(&EdgeId::from("tree:B->C")));
    assert!(view.related.contains_edge(&EdgeId::from("portal:x1->C")));
    assert!(!view.related.contains_edge(&EdgeId::from("tree:B->D")));

    let marker = HoverTarget::Element(SceneKey::Portal("x1".into()));
    let on_marker = engine.compute(&sample_board(), &UiState::new("A").with_hover(marker));
    assert_eq!(on_marker.related.elements.len(), 3);
    assert_eq!(on_marker.related.edges.len(), 2);
}

#[test]
fn active_cross_ref_is_flagged() {
    let engine = PlanningEngine::default();
    let view = engine.compute(
        &sample_board(),
        &UiState::new("A").with_active_cross_ref("x1"),
    );
    assert!(view.placements.get(&"x1".into()).unwrap().active);
}

#[test]
fn scoped_view_has_breadcrumbs() {
    let engine = PlanningEngine::default();
    let view = engine.compute(&sample_board(), &UiState::new("B"));
    let crumbs: Vec<(String, String)> = view
        .breadcrumbs
        .iter()
        .map(|b| (b.id.to_string(), b.title.clone()))
        .collect();
    assert_eq!(
        crumbs,
        vec![
            ("A".to_string(), "A".to_string()),
            ("B".to_string(), "B".to_string())
        ]
    );
    // depth is relative to the scope root
    assert_eq!(view.position(&"B".into()).map(|p| p.x), Some(0.0));
    assert_eq!(view.position(&"C".into()).map(|p| p.x), Some(280.0));
}

#[test]
fn search_marks_matches_without_filtering() {
    let engine = PlanningEngine::default();
    let view = engine.compute(&sample_board(), &UiState::new("A").with_search(" c "));
    assert_eq!(view.visible.len(), 4);
    assert!(view.visible.is_match(&"C".into()));
    assert!(!view.visible.is_match(&"D".into()));
}

#[test]
fn lane_mode_on_story_scope() {
    let engine = PlanningEngine::default();
    let board = BoardSnapshot::new(story_nodes(), Vec::new());
    let view = engine.compute(&board, &UiState::new("S").with_lane_mode(true));
    assert_eq!(view.positions.mode(), LayoutMode::StoryLanes);
    assert_eq!(view.position(&"S".into()), Some(Point::new(0.0, -180.0)));
    assert_eq!(view.bounds.get(&"L2".into()).map(|r| r.width), Some(300.0));

    // lane mode is ignored outside a story scope
    let plain = engine.compute(&board, &UiState::new("R").with_lane_mode(true));
    assert_eq!(plain.positions.mode(), LayoutMode::Hierarchical);
}

#[test]
fn stored_sizes_and_live_bounds() {
    let mut board = BoardSnapshot::new(story_nodes(), Vec::new());
    for node in &mut board.nodes {
        if node.id.as_str() == "s1" {
            node.width = Some(900.0);
            node.height = Some(100.0);
        }
    }
    let engine = PlanningEngine::default();
    let view = engine.compute(&board, &UiState::new("S"));
    let s1 = *view.bounds.get(&"s1".into()).unwrap();
    assert_eq!((s1.width, s1.height), (640.0, 100.0));

    let mut drag = engine.begin_resize(&view, &"s1".into()).unwrap();
    let live = drag.update(300.0, 200.0);
    let preview = view.with_live_bounds(&"s1".into(), live);
    assert_eq!(preview.bounds.get(&"s1".into()), Some(&Rect::new(s1.x, s1.y, 300.0, 200.0)));
    assert_eq!(preview.positions, view.positions);
    assert_eq!(preview.placements, view.placements);
}

#[test]
fn code_collisions_and_story_progress() {
    let mut board = sample_board();
    board
        .cross_refs
        .push(CrossRef::new("x2", " al", "Alan").linked_to(["D"]));
    board.nodes[2] = board.nodes[2].clone().with_steps(vec![
        StoryStep {
            id: "1".into(),
            text: "draft".into(),
            done: true,
        },
        StoryStep {
            id: "2".into(),
            text: "review".into(),
            done: false,
        },
    ]);

    let view = PlanningEngine::default().compute(&board, &UiState::new("A"));
    assert_eq!(
        view.code_collisions.get("AL"),
        Some(&vec![CrossRefId::from("x1"), CrossRefId::from("x2")])
    );
    let progress = view.story_progress.get(&NodeId::from("C")).unwrap();
    assert_eq!((progress.done, progress.total), (1, 2));
    assert!(!progress.is_complete());
}

#[test]
fn malformed_snapshot_still_lays_out() {
    init_tracing();
    let board = BoardSnapshot::new(
        vec![
            root("A"),
            item("B", "A"),
            item("B", "A"),
            item("orphan", "ghost"),
            item("C", "B"),
        ],
        Vec::new(),
    );
    let view = PlanningEngine::default().compute(&board, &UiState::new("A"));
    assert_eq!(view.visible.len(), 3);
    assert!(!view.visible.contains(&"orphan".into()));
}

#[test]
fn snapshot_json_drives_engine() {
    let json = r#"{
        "nodes": [
            {"id": "A", "title": "Board", "kind": "root"},
            {"id": "B", "parentId": "A", "title": "Plan", "kind": "project", "x": 999}
        ],
        "crossRefs": []
    }"#;
    let board = BoardSnapshot::from_json(json).unwrap();
    let view = PlanningEngine::default().compute(&board, &UiState::new("A"));
    assert_eq!(view.position(&"B".into()), Some(Point::new(999.0, 0.0)));
    assert_eq!(view.positions.get(&"B".into()), Some(Point::new(280.0, 0.0)));
}

proptest! {
    #[test]
    fn prop_compute_is_idempotent(
        collapse_b in any::<bool>(),
        lanes in any::<bool>(),
        query in "[a-dA-D]{0,2}",
    ) {
        let engine = PlanningEngine::default();
        let board = sample_board();
        let mut session = UiState::new("A").with_search(query).with_lane_mode(lanes);
        if collapse_b {
            session.toggle_collapsed(&"B".into());
        }
        let first = engine.compute(&board, &session);
        let second = engine.compute(&board, &session);
        prop_assert_eq!(first, second);
    }
}
