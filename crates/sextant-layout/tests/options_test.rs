use sextant_layout::{LayoutDirection, LayoutGraph, LayoutOptions};

#[test]
fn options_load_from_camel_case_json_with_defaults() {
    let options: LayoutOptions = serde_json::from_str(
        r#"{ "direction": "leftToRight", "rankSeparation": 120, "alignToGrid": true }"#,
    )
    .unwrap();
    assert_eq!(options.direction, LayoutDirection::LeftToRight);
    assert_eq!(options.rank_separation, 120.0);
    assert!(options.align_to_grid);
    assert_eq!(options.node_separation, LayoutOptions::default().node_separation);
    options.validate().unwrap();
}

#[test]
fn options_reject_a_zero_grid_when_aligning() {
    let options = LayoutOptions {
        align_to_grid: true,
        grid_size: 0.0,
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn graph_round_trips_through_json() {
    let mut g = LayoutGraph::new();
    g.add_node("a", 10.0, 20.0).add_node("b", 5.0, 5.0).add_edge("a", "b");
    let json = serde_json::to_string(&g).unwrap();
    let back: LayoutGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, g);
}
