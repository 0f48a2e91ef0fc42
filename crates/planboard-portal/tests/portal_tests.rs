use planboard_layout::{compute_layout, resolve_node_bounds, NodeBounds, SizeContext};
use planboard_model::{BoardConfig, CrossRef, NodeId, PortalConfig, Rect};
use planboard_portal::{jitter, place_portals, resolve_anchor};
use planboard_test_utils::{ids, sample_board};
use planboard_tree::{project_visibility, TreeIndex, VisibleSet};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn reference_scenario_marker_sits_below_c() {
    let board = sample_board();
    let config = BoardConfig::default();
    let index = TreeIndex::build(board.nodes.clone());
    let visible = project_visibility(&index, &"A".into(), &HashSet::new(), "");
    let positions = compute_layout(&index, &visible, false, &config);
    let expanded = HashSet::new();
    let bounds = resolve_node_bounds(
        &index,
        &visible,
        &positions,
        &SizeContext::new(false, &expanded),
        &config.sizing,
    );

    let placed = place_portals(&board.cross_refs, &visible, &bounds, None, &config.portal);
    let x1 = placed.get(&"x1".into()).expect("x1 placed");

    assert_eq!(x1.anchor, NodeId::from("C"));
    assert_eq!(x1.linked, ids(&["C", "D"]));
    // C is (560, 0, 200, 64): centre x 660, bottom 64
    let expected_x = 660.0 - 14.0 + jitter(&"x1".into(), 12.0);
    assert_eq!((x1.x, x1.y), (expected_x, 74.0));
    assert!(x1.resolved);
    assert_eq!(x1.attempts, 1);
}

#[test]
fn collapsing_the_anchor_parent_removes_the_marker() {
    let board = sample_board();
    let index = TreeIndex::build(board.nodes.clone());
    let collapsed: HashSet<NodeId> = [NodeId::from("B")].into_iter().collect();
    let visible = project_visibility(&index, &"A".into(), &collapsed, "");
    let bounds: NodeBounds = visible
        .ids()
        .enumerate()
        .map(|(i, id)| (id.clone(), Rect::new(i as f32 * 300.0, 0.0, 200.0, 64.0)))
        .collect();
    let placed = place_portals(
        &board.cross_refs,
        &visible,
        &bounds,
        None,
        &PortalConfig::default(),
    );
    assert!(placed.is_empty());
}

/// `len` visible nodes laid out four to a row
fn scene(len: usize) -> (VisibleSet, NodeBounds) {
    let visible = VisibleSet::from_ids((0..len).map(|i| NodeId::new(format!("n{i}"))));
    let bounds = visible
        .ids()
        .enumerate()
        .map(|(i, id)| {
            let col = (i % 4) as f32;
            let row = (i / 4) as f32;
            (id.clone(), Rect::new(col * 150.0, row * 90.0, 120.0, 60.0))
        })
        .collect();
    (visible, bounds)
}

fn arb_refs(nodes: usize) -> impl Strategy<Value = Vec<CrossRef>> {
    proptest::collection::vec(
        (
            "[A-C]{1,2}",
            proptest::collection::vec(0..nodes + 3, 0..4),
        ),
        0..12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (code, links))| {
                CrossRef::new(format!("x{i}"), code, format!("label {i}"))
                    .linked_to(links.into_iter().map(|l| format!("n{l}")))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_attempts_never_exceed_cap(
        refs in arb_refs(8),
        cap in 1u32..20,
        columns in 1u32..6,
    ) {
        let (visible, bounds) = scene(8);
        let config = PortalConfig {
            max_attempts: cap,
            scan_columns: columns,
            ..PortalConfig::default()
        };
        let placed = place_portals(&refs, &visible, &bounds, None, &config);
        for p in placed.iter() {
            prop_assert!(p.attempts >= 1 && p.attempts <= cap);
            if !p.resolved {
                prop_assert_eq!(p.attempts, cap);
            }
        }
    }

    #[test]
    fn prop_resolved_markers_overlap_nothing(refs in arb_refs(8)) {
        let (visible, bounds) = scene(8);
        let placed = place_portals(&refs, &visible, &bounds, None, &PortalConfig::default());
        let markers: Vec<Rect> = placed.iter().map(|p| p.rect()).collect();
        for (i, p) in placed.iter().enumerate() {
            if !p.resolved {
                continue;
            }
            let r = p.rect();
            prop_assert!(bounds.rects().all(|b| !b.intersects(&r)));
            // earlier markers were obstacles for this one
            prop_assert!(markers[..i].iter().all(|m| !m.intersects(&r)));
        }
    }

    #[test]
    fn prop_placement_is_idempotent(refs in arb_refs(8)) {
        let (visible, bounds) = scene(8);
        let config = PortalConfig::default();
        let first = place_portals(&refs, &visible, &bounds, None, &config);
        let second = place_portals(&refs, &visible, &bounds, None, &config);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_anchor_ignores_link_order(
        links in proptest::collection::vec(0usize..10, 1..6),
        rotate in 0usize..6,
    ) {
        let (visible, _) = scene(8);
        let names: Vec<String> = links.iter().map(|l| format!("n{l}")).collect();
        let mut rotated = names.clone();
        let len = rotated.len();
        rotated.rotate_left(rotate % len);

        let a = CrossRef::new("x", "X", "x").linked_to(names);
        let b = CrossRef::new("x", "X", "x").linked_to(rotated);
        prop_assert_eq!(resolve_anchor(&a, &visible), resolve_anchor(&b, &visible));
    }
}
