//! Node, edge and subgraph records stored in the [`Graph`](super::Graph) arenas.

use super::{EdgeId, NodeId, SubgraphId};
use crate::{Insets, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Real,
    /// Synthetic bend point owned by the transformation that created it.
    Virtual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(in crate::graph) id: NodeId,
    pub name: String,
    pub(in crate::graph) kind: NodeKind,
    pub rank: i32,
    pub width: f64,
    pub height: f64,
    pub padding: Insets,
    pub nesting_index: i32,
    pub(in crate::graph) parent: Option<SubgraphId>,
    pub x: f64,
    pub y: f64,
    pub(in crate::graph) incoming: Vec<EdgeId>,
    pub(in crate::graph) outgoing: Vec<EdgeId>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId(usize::MAX),
            name: name.into(),
            kind: NodeKind::Real,
            rank: 0,
            width: 40.0,
            height: 40.0,
            padding: Insets::default(),
            nesting_index: 0,
            parent: None,
            x: 0.0,
            y: 0.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// A zero-height stand-in for a bend in a long edge. Only edge-splitting changes create
    /// these; they are removed again when the change is reverted.
    pub fn virtual_node(name: impl Into<String>, parent: Option<SubgraphId>) -> Self {
        Self {
            kind: NodeKind::Virtual,
            parent,
            height: 0.0,
            ..Self::new(name)
        }
    }

    pub fn with_rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn in_subgraph(mut self, parent: SubgraphId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<SubgraphId> {
        self.parent
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_virtual(&self) -> bool {
        self.kind == NodeKind::Virtual
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// The node box grown by its padding.
    pub fn padded_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height).expand(&self.padding)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(in crate::graph) id: EdgeId,
    pub(in crate::graph) source: NodeId,
    pub(in crate::graph) target: NodeId,
    /// Minimum rank span between source and target.
    pub delta: i32,
    pub weight: i32,
    pub width: f64,
    pub padding: f64,
    pub offset_source: Option<f64>,
    pub offset_target: Option<f64>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    /// Geometry of the virtual nodes this edge was routed through, source to target.
    pub bend_points: Vec<Point>,
    pub reversed: bool,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId(usize::MAX),
            source,
            target,
            delta: 1,
            weight: 1,
            width: 1.0,
            padding: 10.0,
            offset_source: None,
            offset_target: None,
            start: None,
            end: None,
            bend_points: Vec::new(),
            reversed: false,
        }
    }

    pub fn with_delta(mut self, delta: i32) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_offsets(mut self, source: Option<f64>, target: Option<f64>) -> Self {
        self.offset_source = source;
        self.offset_target = target;
        self
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub fn opposite(&self, end: NodeId) -> NodeId {
        if end == self.source {
            self.target
        } else {
            self.source
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subgraph {
    pub(in crate::graph) id: SubgraphId,
    pub name: String,
    pub(in crate::graph) parent: Option<SubgraphId>,
    pub(in crate::graph) nesting_index: i32,
    pub padding: Insets,
    pub bounds: Option<Rect>,
    pub(in crate::graph) members: Vec<NodeId>,
    pub(in crate::graph) children: Vec<SubgraphId>,
}

impl Subgraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubgraphId(usize::MAX),
            name: name.into(),
            parent: None,
            nesting_index: 0,
            padding: Insets::uniform(10.0),
            bounds: None,
            members: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn in_subgraph(mut self, parent: SubgraphId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn id(&self) -> SubgraphId {
        self.id
    }

    pub fn parent(&self) -> Option<SubgraphId> {
        self.parent
    }

    /// Depth of this subgraph; top-level subgraphs are 1.
    pub fn nesting_index(&self) -> i32 {
        self.nesting_index
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn children(&self) -> &[SubgraphId] {
        &self.children
    }
}
