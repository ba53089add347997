use narwhal::graph::{Edge, EdgeId, Graph, GraphError, Node, alg};
use narwhal::{Change, ChangeLog, EdgeReversal, Error, LongEdgeSplit, RevertibleChange};

/// Two long edges a -> c and b -> d, both spanning three ranks.
fn two_long_edges() -> (Graph, EdgeId, EdgeId) {
    let mut g = Graph::new();
    let a = g.add_node(Node::new("a").with_rank(0)).unwrap();
    let b = g.add_node(Node::new("b").with_rank(0)).unwrap();
    let c = g.add_node(Node::new("c").with_rank(3)).unwrap();
    let d = g.add_node(Node::new("d").with_rank(3)).unwrap();
    let ac = g.add_edge(Edge::new(a, c)).unwrap();
    let bd = g.add_edge(Edge::new(b, d)).unwrap();
    g.rebuild_ranks().unwrap();
    (g, ac, bd)
}

#[test]
fn log_reverts_most_recent_first() {
    let (mut g, ac, bd) = two_long_edges();
    let nodes_before = g.node_ids();
    let mut log = ChangeLog::new();
    log.push(LongEdgeSplit::apply(&mut g, ac).unwrap());
    log.push(LongEdgeSplit::apply(&mut g, bd).unwrap());
    assert_eq!(log.len(), 2);
    assert_eq!(g.node_count(), 8);

    assert!(log.revert_last(&mut g).unwrap());
    assert!(g.contains_edge(bd));
    assert!(!g.contains_edge(ac));

    log.revert_all(&mut g).unwrap();
    assert!(log.is_empty());
    assert!(!log.revert_last(&mut g).unwrap());
    assert_eq!(g.node_ids(), nodes_before);
    assert!(g.contains_edge(ac) && g.contains_edge(bd));
    assert!(alg::check_well_formed(&g).is_ok());
}

#[test]
fn reverting_overlapping_changes_out_of_order_is_detected() {
    let (mut g, ac, bd) = two_long_edges();
    let first = LongEdgeSplit::apply(&mut g, ac).unwrap();
    let second = LongEdgeSplit::apply(&mut g, bd).unwrap();
    let second_nodes = second.virtual_nodes().to_vec();

    let err = first.check_revertible(&g).unwrap_err();
    assert_eq!(
        err,
        Error::Graph(GraphError::ChangeOutOfOrder {
            expected: Some(second.token()),
            found: first.token(),
        })
    );

    let first_token = first.token();
    let err = first.revert(&mut g).unwrap_err();
    assert!(matches!(
        err,
        Error::Graph(GraphError::ChangeOutOfOrder { found, .. }) if found == first_token
    ));
    // Nothing was undone.
    assert!(!g.contains_edge(ac));
    assert_eq!(g.node_count(), 8);
    assert!(second_nodes.iter().all(|&v| g.contains_node(v)));

    second.revert(&mut g).unwrap();
    assert!(g.contains_edge(bd));
}

#[test]
fn log_refuses_to_skip_a_change_applied_outside_it() {
    let (mut g, ac, bd) = two_long_edges();
    let mut log = ChangeLog::new();
    log.push(LongEdgeSplit::apply(&mut g, ac).unwrap());
    let stray = EdgeReversal::apply(&mut g, bd).unwrap();

    assert!(matches!(
        log.revert_last(&mut g),
        Err(Error::Graph(GraphError::ChangeOutOfOrder { .. }))
    ));
    assert_eq!(log.len(), 1);

    stray.revert(&mut g).unwrap();
    log.revert_all(&mut g).unwrap();
    assert!(g.contains_edge(ac));
    assert_eq!(g.open_change_count(), 0);
}

#[test]
fn change_kinds() {
    let (mut g, ac, bd) = two_long_edges();
    let mut log = ChangeLog::new();
    log.push(LongEdgeSplit::apply(&mut g, ac).unwrap());
    log.push(EdgeReversal::apply(&mut g, bd).unwrap());

    let kinds: Vec<&str> = log.iter().map(Change::kind).collect();
    assert_eq!(kinds, vec!["split", "reversal"]);
    log.revert_all(&mut g).unwrap();
}
