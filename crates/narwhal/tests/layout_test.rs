use narwhal::graph::{Edge, EdgeId, Graph, Node, NodeId, alg};
use narwhal::order::NodeOrderer;
use narwhal::rank::RankAssigner;
use narwhal::{
    Acyclicer, ChangeLog, Error, Layout, LayoutOptions, Ranker, Result, layout, split_long_edges,
};

fn graph_of(names: &[&str], pairs: &[(usize, usize)]) -> (Graph, Vec<NodeId>, Vec<EdgeId>) {
    let mut g = Graph::new();
    let ids: Vec<_> = names
        .iter()
        .map(|n| g.add_node(Node::new(*n)).unwrap())
        .collect();
    let edges = pairs
        .iter()
        .map(|&(a, b)| g.add_edge(Edge::new(ids[a], ids[b])).unwrap())
        .collect();
    (g, ids, edges)
}

#[test]
fn layout_can_layout_a_single_node() {
    let mut g = Graph::new();
    let a = g.add_node(Node::new("a").with_size(50.0, 100.0)).unwrap();

    layout(&mut g, &LayoutOptions::default()).unwrap();
    let n = g.node(a).unwrap();
    assert_eq!((n.x, n.y), (0.0, 0.0));
    assert_eq!(n.rank, 0);
}

#[test]
fn split_long_edges_skips_adjacent_rank_edges() {
    let mut g = Graph::new();
    let a = g.add_node(Node::new("a").with_rank(0)).unwrap();
    let b = g.add_node(Node::new("b").with_rank(1)).unwrap();
    let c = g.add_node(Node::new("c").with_rank(3)).unwrap();
    let short = g.add_edge(Edge::new(a, b)).unwrap();
    let flat = g.add_edge(Edge::new(b, b)).unwrap();
    let long = g.add_edge(Edge::new(a, c)).unwrap();
    g.rebuild_ranks().unwrap();

    let mut log = ChangeLog::new();
    assert_eq!(split_long_edges(&mut g, &mut log).unwrap(), 1);
    assert_eq!(log.len(), 1);
    assert!(g.contains_edge(short));
    assert!(g.contains_edge(flat));
    assert!(!g.contains_edge(long));
    assert_eq!(g.node_count(), 5);

    log.revert_all(&mut g).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge(long).unwrap().bend_points.len(), 2);
}

#[test]
fn layout_leaves_no_virtual_nodes() {
    // a -> b -> c -> d plus the shortcut a -> d spanning three ranks.
    let (mut g, ids, edges) = graph_of(&["a", "b", "c", "d"], &[(0, 1), (1, 2), (2, 3), (0, 3)]);
    let nodes_before = g.node_ids();

    layout(&mut g, &LayoutOptions::default()).unwrap();

    assert_eq!(g.node_ids(), nodes_before);
    assert!(g.nodes().all(|n| !n.is_virtual()));
    assert_eq!(g.edge_ids(), edges);
    assert_eq!(g.open_change_count(), 0);
    assert!(alg::check_well_formed(&g).is_ok());

    let shortcut = g.edge(edges[3]).unwrap();
    assert_eq!(shortcut.bend_points.len(), 2);
    assert!(shortcut.start.is_some() && shortcut.end.is_some());
    let ranks: Vec<i32> = ids.iter().map(|&v| g.node(v).unwrap().rank).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);

    // Bend points sit between the endpoints' rows.
    let (top, bottom) = (g.node(ids[0]).unwrap().y, g.node(ids[3]).unwrap().y);
    assert!(shortcut.bend_points.iter().all(|p| p.y > top && p.y < bottom));
}

#[test]
fn straight_chain_is_vertically_aligned() {
    let (mut g, ids, _) = graph_of(&["a", "b", "c", "d"], &[(0, 1), (1, 2), (2, 3)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    let xs: Vec<f64> = ids.iter().map(|&v| g.node(v).unwrap().x).collect();
    assert!(xs.iter().all(|&x| (x - xs[0]).abs() < 1e-9), "{xs:?}");
    let ys: Vec<f64> = ids.iter().map(|&v| g.node(v).unwrap().y).collect();
    assert_eq!(ys, vec![0.0, 80.0, 160.0, 240.0]);
}

#[test]
fn cycles_and_self_loops_are_restored() {
    let (mut g, ids, edges) = graph_of(&["a", "b", "c"], &[(0, 1), (1, 2), (2, 0), (1, 1)]);
    layout(&mut g, &LayoutOptions::default()).unwrap();

    for (&e, &(a, b)) in edges.iter().zip([(0, 1), (1, 2), (2, 0), (1, 1)].iter()) {
        let edge = g.edge(e).unwrap();
        assert_eq!((edge.source(), edge.target()), (ids[a], ids[b]));
        assert!(!edge.reversed);
        assert!(g.contains_edge(e));
    }
    let self_loop = g.edge(edges[3]).unwrap();
    assert_eq!(self_loop.bend_points.len(), 3);
    assert!(alg::check_well_formed(&g).is_ok());
}

#[test]
fn failed_phase_still_unwinds_changes() {
    let (mut g, ids, edges) = graph_of(&["a", "b"], &[(0, 1), (1, 0), (0, 0)]);
    let options = LayoutOptions {
        acyclicer: Acyclicer::Disabled,
        ..LayoutOptions::default()
    };

    let err = layout(&mut g, &options).unwrap_err();
    assert_eq!(err, Error::Cyclic { node: ids[0] });
    assert_eq!(g.edge_ids(), edges);
    assert_eq!(g.open_change_count(), 0);
    assert!(alg::check_well_formed(&g).is_ok());
}

#[test]
fn fixed_ranks_are_kept() {
    let mut g = Graph::new();
    let a = g.add_node(Node::new("a").with_rank(0)).unwrap();
    let b = g.add_node(Node::new("b").with_rank(4)).unwrap();
    let e = g.add_edge(Edge::new(a, b)).unwrap();
    let options = LayoutOptions {
        ranker: Ranker::Fixed,
        ..LayoutOptions::default()
    };

    layout(&mut g, &options).unwrap();
    assert_eq!(g.node(b).unwrap().rank, 4);
    assert_eq!(g.edge(e).unwrap().bend_points.len(), 3);
}

#[test]
fn invalid_options_are_rejected_before_touching_the_graph() {
    let (mut g, _, _) = graph_of(&["a", "b"], &[(0, 1)]);
    let options = LayoutOptions {
        rank_sep: -1.0,
        ..LayoutOptions::default()
    };
    assert!(matches!(
        layout(&mut g, &options),
        Err(Error::InvalidOptions { .. })
    ));
    assert!(g.ranks().is_empty());
}

struct ReverseOrder;

impl NodeOrderer for ReverseOrder {
    fn order(&self, g: &mut Graph) -> Result<()> {
        for rank in g.ranks_mut().iter_mut() {
            let mut nodes = rank.nodes().to_vec();
            nodes.reverse();
            rank.reorder(nodes);
        }
        Ok(())
    }
}

struct EverythingOnRankZero;

impl RankAssigner for EverythingOnRankZero {
    fn assign_ranks(&self, g: &mut Graph) -> Result<()> {
        for v in g.node_ids() {
            if let Some(n) = g.node_mut(v) {
                n.rank = 0;
            }
        }
        Ok(())
    }
}

#[test]
fn custom_collaborators_replace_defaults() {
    let (mut g, ids, _) = graph_of(&["a", "b", "c"], &[(0, 1), (0, 2)]);
    Layout::new(LayoutOptions::default())
        .with_ranker(EverythingOnRankZero)
        .with_orderer(ReverseOrder)
        .run(&mut g)
        .unwrap();

    assert_eq!(g.ranks().len(), 1);
    assert_eq!(g.ranks().rank(0).unwrap().nodes(), &[ids[2], ids[1], ids[0]]);
    let xs: Vec<f64> = ids.iter().map(|&v| g.node(v).unwrap().x).collect();
    assert!(xs[2] < xs[1] && xs[1] < xs[0]);
}
