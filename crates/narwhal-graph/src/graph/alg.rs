//! Read-only queries over a [`Graph`].

use super::{EdgeId, Graph, NodeId, SubgraphId};
use crate::GraphError;
use std::collections::{BTreeMap, BTreeSet};

/// Whether `node` lies inside `subgraph`, directly or through nested subgraphs.
pub fn is_nested(g: &Graph, subgraph: SubgraphId, node: NodeId) -> bool {
    let mut cur = g.node(node).and_then(|n| n.parent);
    while let Some(s) = cur {
        if s == subgraph {
            return true;
        }
        cur = g.subgraph(s).and_then(|sg| sg.parent);
    }
    false
}

/// Enclosing subgraphs of `node`, innermost first.
pub fn ancestors(g: &Graph, node: NodeId) -> Vec<SubgraphId> {
    let mut out: Vec<SubgraphId> = Vec::new();
    let mut cur = g.node(node).and_then(|n| n.parent);
    while let Some(s) = cur {
        out.push(s);
        cur = g.subgraph(s).and_then(|sg| sg.parent);
    }
    out
}

/// Nearest subgraph enclosing both `left` and `right`, or `None` when they share none.
///
/// Walks outwards from `right`'s parent and returns the first subgraph that also contains
/// `left`.
pub fn common_ancestor(g: &Graph, left: NodeId, right: NodeId) -> Option<SubgraphId> {
    let mut cur = g.node(right).and_then(|n| n.parent);
    while let Some(s) = cur {
        if is_nested(g, s, left) {
            return Some(s);
        }
        cur = g.subgraph(s).and_then(|sg| sg.parent);
    }
    None
}

/// `target.rank - source.rank` for an edge, if both endpoints exist.
pub fn span(g: &Graph, edge: EdgeId) -> Option<i32> {
    let e = g.edge(edge)?;
    let source = g.node(e.source)?;
    let target = g.node(e.target)?;
    Some(target.rank - source.rank)
}

/// Strongly connected components of the working graph that contain a cycle (size > 1, or a
/// node with a self loop), each in working-set order.
pub fn find_cycles(g: &Graph) -> Vec<Vec<NodeId>> {
    // Iterative Tarjan; recursion depth would otherwise follow the longest path.
    let order: BTreeMap<NodeId, usize> = g
        .node_ids()
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, i))
        .collect();

    let mut index: usize = 0;
    let mut indices: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut lowlink: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut on_stack: BTreeSet<NodeId> = BTreeSet::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut sccs: Vec<Vec<NodeId>> = Vec::new();

    for root in g.node_ids() {
        if indices.contains_key(&root) {
            continue;
        }
        let mut work: Vec<(NodeId, Vec<NodeId>, usize)> = vec![(root, g.successors(root), 0)];
        indices.insert(root, index);
        lowlink.insert(root, index);
        index += 1;
        stack.push(root);
        on_stack.insert(root);

        while let Some((v, succs, next)) = work.last_mut() {
            let v = *v;
            if let Some(&w) = succs.get(*next) {
                *next += 1;
                if !indices.contains_key(&w) {
                    indices.insert(w, index);
                    lowlink.insert(w, index);
                    index += 1;
                    stack.push(w);
                    on_stack.insert(w);
                    work.push((w, g.successors(w), 0));
                } else if on_stack.contains(&w) {
                    let low = lowlink[&v].min(indices[&w]);
                    lowlink.insert(v, low);
                }
                continue;
            }

            work.pop();
            if let Some((parent, _, _)) = work.last() {
                let low = lowlink[parent].min(lowlink[&v]);
                lowlink.insert(*parent, low);
            }
            if lowlink[&v] == indices[&v] {
                let mut scc: Vec<NodeId> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack.remove(&w);
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    let mut cycles: Vec<Vec<NodeId>> = Vec::new();
    for mut scc in sccs {
        let cyclic = scc.len() > 1 || g.successors(scc[0]).contains(&scc[0]);
        if cyclic {
            scc.sort_by_key(|v| order.get(v).copied().unwrap_or(usize::MAX));
            cycles.push(scc);
        }
    }
    cycles.sort_by_key(|c| order.get(&c[0]).copied().unwrap_or(usize::MAX));
    cycles
}

pub fn is_acyclic(g: &Graph) -> bool {
    find_cycles(g).is_empty()
}

/// Number of edge crossings between consecutive ranks, counting only edges that join rank `r`
/// to rank `r + 1`.
pub fn crossing_count(g: &Graph) -> usize {
    let ranks = g.ranks();
    let mut total: usize = 0;
    for r in 0..ranks.len().saturating_sub(1) {
        let (Some(upper), Some(lower)) = (ranks.rank(r), ranks.rank(r + 1)) else {
            continue;
        };
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for (i, &v) in upper.nodes().iter().enumerate() {
            for w in g.successors(v) {
                if let Some(j) = lower.position(w) {
                    segments.push((i, j));
                }
            }
        }
        for (a, &(i1, j1)) in segments.iter().enumerate() {
            for &(i2, j2) in &segments[a + 1..] {
                if (i1 < i2 && j1 > j2) || (i1 > i2 && j1 < j2) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Checks the structural invariants every change must preserve:
///
/// - each working edge joins two working nodes and is listed in both adjacency lists;
/// - adjacency lists only reference working edges;
/// - once ranks exist, each working node sits in exactly one rank, the one named by its
///   `rank` field, and ranks only list working nodes.
pub fn check_well_formed(g: &Graph) -> Result<(), GraphError> {
    let malformed =
        |reason: String| -> Result<(), GraphError> { Err(GraphError::Malformed { reason }) };

    for e in g.edges() {
        for end in [e.source, e.target] {
            if !g.contains_node(end) {
                return malformed(format!("edge {} references missing node {end}", e.id));
            }
        }
        let listed_out = g.node(e.source).is_some_and(|n| n.outgoing.contains(&e.id));
        let listed_in = g.node(e.target).is_some_and(|n| n.incoming.contains(&e.id));
        if !listed_out || !listed_in {
            return malformed(format!("edge {} missing from adjacency lists", e.id));
        }
    }

    for n in g.nodes() {
        for &e in n.incoming.iter().chain(n.outgoing.iter()) {
            if !g.contains_edge(e) {
                return malformed(format!("node {} lists detached edge {e}", n.id));
            }
        }
    }

    let ranks = g.ranks();
    if ranks.is_empty() {
        return Ok(());
    }
    let mut seen: BTreeMap<NodeId, usize> = BTreeMap::new();
    for (r, rank) in ranks.iter().enumerate() {
        for &v in rank.nodes() {
            if !g.contains_node(v) {
                return malformed(format!("rank {r} lists missing node {v}"));
            }
            if seen.insert(v, r).is_some() {
                return malformed(format!("node {v} appears in more than one rank slot"));
            }
        }
    }
    for n in g.nodes() {
        match seen.get(&n.id) {
            Some(&r) if i32::try_from(r).ok() == Some(n.rank) => {}
            Some(&r) => {
                return malformed(format!(
                    "node {} has rank {} but is listed in rank {r}",
                    n.id, n.rank
                ));
            }
            None => return malformed(format!("node {} is not in any rank", n.id)),
        }
    }
    Ok(())
}
