use crate::{Graph, NodeId, NodeKind, Position, tags};

fn sample() -> (Graph, NodeId) {
    let mut graph = Graph::new();
    let key = graph.scalar(tags::STR.into(), "name".into(), Position::START);
    let value = graph.scalar(tags::STR.into(), "yamlet".into(), Position::new(1, 7));
    let map = graph.mapping(tags::MAP.into(), Position::START);
    graph.push_entry(map, key, value);
    (graph, map)
}

#[test]
fn scalar_round_trip() {
    let mut graph = Graph::new();
    let id = graph.scalar(tags::INT.into(), "42".into(), Position::new(3, 5));
    let node = graph.node(id);

    assert!(node.is_scalar());
    assert_eq!(node.as_str(), Some("42"));
    assert_eq!(node.tag(), tags::INT);
    assert_eq!(node.position(), Position::new(3, 5));
    assert_eq!(node.len(), 0);
}

#[test]
fn mapping_preserves_entry_order() {
    let mut graph = Graph::new();
    let map = graph.mapping(tags::MAP.into(), Position::START);
    for name in ["b", "a", "c"] {
        let k = graph.scalar(tags::STR.into(), name.into(), Position::START);
        let v = graph.scalar(tags::NULL.into(), String::new(), Position::START);
        graph.push_entry(map, k, v);
    }

    let keys: Vec<_> = graph
        .node(map)
        .entries()
        .filter_map(|(k, _)| k.as_str().map(str::to_owned))
        .collect();
    assert_eq!(keys, ["b", "a", "c"]);
}

#[test]
fn lookup_returns_latest_binding() {
    let mut graph = Graph::new();
    let map = graph.mapping(tags::MAP.into(), Position::START);
    let k1 = graph.scalar(tags::STR.into(), "x".into(), Position::START);
    let v1 = graph.scalar(tags::STR.into(), "first".into(), Position::START);
    let k2 = graph.scalar(tags::STR.into(), "x".into(), Position::START);
    let v2 = graph.scalar(tags::STR.into(), "second".into(), Position::START);
    graph.push_entry(map, k1, v1);
    graph.push_entry(map, k2, v2);

    let found = graph.node(map).lookup("x").unwrap();
    assert_eq!(found.as_str(), Some("second"));
}

#[test]
fn shared_node_appears_under_both_parents() {
    let mut graph = Graph::new();
    let shared = graph.scalar(tags::STR.into(), "shared".into(), Position::START);
    let seq = graph.sequence(tags::SEQ.into(), Position::START);
    graph.push_item(seq, shared);
    graph.push_item(seq, shared);

    let ids: Vec<_> = graph.node(seq).items().map(|n| n.id()).collect();
    assert_eq!(ids, [shared, shared]);
}

#[test]
fn cyclic_sequence_is_representable() {
    let mut graph = Graph::new();
    let seq = graph.sequence(tags::SEQ.into(), Position::START);
    graph.push_item(seq, seq);

    let inner = graph.node(seq).items().next().unwrap();
    assert_eq!(inner.id(), seq);
    assert!(inner.is_sequence());
}

#[test]
fn serializes_to_json() {
    let (graph, map) = sample();
    let json = serde_json::to_value(&graph).unwrap();
    let nodes = json.get("nodes").unwrap().as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[map.index()]["tag"], tags::MAP);

    let back: Graph = serde_json::from_value(json).unwrap();
    assert_eq!(back, graph);
}

#[test]
fn node_kind_shape_checks() {
    let (graph, map) = sample();
    let node = graph.node(map);
    assert!(node.is_mapping());
    assert!(!node.is_sequence());
    assert!(matches!(graph.get(map).kind, NodeKind::Mapping(_)));
    assert_eq!(node.len(), 1);
}
