use narwhal::graph::{Edge, Graph, Node, NodeId, alg};
use narwhal::order::{Barycenter, NodeOrderer};

fn ranked(g: &mut Graph, name: &str, rank: i32) -> NodeId {
    g.add_node(Node::new(name).with_rank(rank)).unwrap()
}

#[test]
fn barycenter_removes_avoidable_crossings() {
    let mut g = Graph::new();
    let a = ranked(&mut g, "a", 0);
    let b = ranked(&mut g, "b", 0);
    let c = ranked(&mut g, "c", 0);
    let x = ranked(&mut g, "x", 1);
    let y = ranked(&mut g, "y", 1);
    let z = ranked(&mut g, "z", 1);
    g.add_edge(Edge::new(a, z)).unwrap();
    g.add_edge(Edge::new(b, y)).unwrap();
    g.add_edge(Edge::new(c, x)).unwrap();
    g.rebuild_ranks().unwrap();
    assert_eq!(alg::crossing_count(&g), 3);

    Barycenter::default().order(&mut g).unwrap();
    assert_eq!(alg::crossing_count(&g), 0);
    assert_eq!(g.ranks().rank(1).unwrap().nodes(), &[z, y, x]);
    assert!(alg::check_well_formed(&g).is_ok());
}

#[test]
fn nodes_without_neighbours_keep_their_slot() {
    let mut g = Graph::new();
    let a = ranked(&mut g, "a", 0);
    let b = ranked(&mut g, "b", 0);
    let lone = ranked(&mut g, "lone", 1);
    let x = ranked(&mut g, "x", 1);
    let y = ranked(&mut g, "y", 1);
    g.add_edge(Edge::new(a, y)).unwrap();
    g.add_edge(Edge::new(b, x)).unwrap();
    g.rebuild_ranks().unwrap();

    Barycenter { iterations: 1 }.order(&mut g).unwrap();
    assert_eq!(g.ranks().rank(1).unwrap().nodes(), &[lone, y, x]);
}

#[test]
fn ordering_never_gets_worse() {
    let mut g = Graph::new();
    let top: Vec<_> = (0..4).map(|i| ranked(&mut g, &format!("t{i}"), 0)).collect();
    let bottom: Vec<_> = (0..4).map(|i| ranked(&mut g, &format!("b{i}"), 1)).collect();
    for (i, &t) in top.iter().enumerate() {
        for (j, &b) in bottom.iter().enumerate() {
            if (i + j) % 2 == 0 {
                g.add_edge(Edge::new(t, b)).unwrap();
            }
        }
    }
    g.rebuild_ranks().unwrap();
    let before = alg::crossing_count(&g);

    Barycenter { iterations: 6 }.order(&mut g).unwrap();
    assert!(alg::crossing_count(&g) <= before);
    assert_eq!(g.ranks().rank(0).unwrap().len(), 4);
    assert_eq!(g.ranks().rank(1).unwrap().len(), 4);
}

#[test]
fn single_rank_is_left_alone() {
    let mut g = Graph::new();
    let a = ranked(&mut g, "a", 0);
    let b = ranked(&mut g, "b", 0);
    g.rebuild_ranks().unwrap();

    Barycenter::default().order(&mut g).unwrap();
    assert_eq!(g.ranks().rank(0).unwrap().nodes(), &[a, b]);
}
