//! Internal mutable layout model.
//!
//! Nodes and edges live in arenas and reference each other by integer handles, so the pipeline
//! stages mutate plain vectors instead of a shared pointer graph. One `Model` holds the direct
//! children of one group level; nesting is a tree of models owned by the pipeline, not a compound
//! flag on the graph itself.
//!
//! Edge `source`/`target` here are the *effective* endpoints used for ranking: the cycle remover
//! swaps them and sets `reversed` without ever touching the caller's descriptors.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone)]
pub struct Node {
    /// Index into the builder's flat vertex table, or `None` for a dummy node.
    pub vertex: Option<usize>,
    pub width: f64,
    pub height: f64,
    pub rank: i32,
    /// Position within the rank; a dense 0..n-1 permutation once ordering has run.
    pub order: usize,
    /// Top-left corner in the model's local frame (dummies have zero extent, so this is also
    /// their waypoint position).
    pub x: f64,
    pub y: f64,
    pub out_edges: Vec<EdgeId>,
    pub in_edges: Vec<EdgeId>,
}

impl Node {
    pub fn is_dummy(&self) -> bool {
        self.vertex.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Direction was flipped during cycle removal; waypoints are un-flipped on the way out.
    pub reversed: bool,
    /// Replaced by a dummy-chain of single-rank segments; no longer part of the adjacency.
    pub replaced: bool,
    /// Index into the caller's edge list. `None` for chain segments.
    pub original: Option<usize>,
    /// Dummy nodes standing in for this edge, ordered from effective source to target.
    pub chain: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Edges that own a dummy chain, in creation order.
    pub dummy_chains: Vec<EdgeId>,
    /// Self-loops recorded at build time: (node, caller edge index). Excluded from every
    /// combinatorial stage and routed locally at materialization.
    pub self_loops: Vec<(NodeId, usize)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, vertex: Option<usize>, width: f64, height: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            vertex,
            width,
            height,
            rank: 0,
            order: 0,
            x: 0.0,
            y: 0.0,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        });
        id
    }

    pub fn add_dummy(&mut self, rank: i32) -> NodeId {
        let id = self.add_node(None, 0.0, 0.0);
        self.nodes[id.0].rank = rank;
        id
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, original: Option<usize>) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            reversed: false,
            replaced: false,
            original,
            chain: Vec::new(),
        });
        self.nodes[source.0].out_edges.push(id);
        self.nodes[target.0].in_edges.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Edges still participating in the adjacency (neither replaced by a chain nor a self-loop;
    /// self-loops never enter the adjacency in the first place).
    pub fn active_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len())
            .map(EdgeId)
            .filter(|e| !self.edges[e.0].replaced)
    }

    /// Flip an edge's effective direction, keeping the adjacency lists consistent.
    pub fn reverse_edge(&mut self, id: EdgeId) {
        let (source, target) = {
            let e = &self.edges[id.0];
            (e.source, e.target)
        };
        self.nodes[source.0].out_edges.retain(|&x| x != id);
        self.nodes[target.0].in_edges.retain(|&x| x != id);
        let e = &mut self.edges[id.0];
        e.source = target;
        e.target = source;
        e.reversed = !e.reversed;
        self.nodes[target.0].out_edges.push(id);
        self.nodes[source.0].in_edges.push(id);
    }

    /// Take an edge out of the adjacency (it keeps its record for materialization).
    pub fn retire_edge(&mut self, id: EdgeId) {
        let (source, target) = {
            let e = &self.edges[id.0];
            (e.source, e.target)
        };
        self.nodes[source.0].out_edges.retain(|&x| x != id);
        self.nodes[target.0].in_edges.retain(|&x| x != id);
        self.edges[id.0].replaced = true;
    }

    /// Effective successors of `v` over active edges.
    pub fn successors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[v.0]
            .out_edges
            .iter()
            .filter(|e| !self.edges[e.0].replaced)
            .map(|e| self.edges[e.0].target)
    }

    /// Effective predecessors of `v` over active edges.
    pub fn predecessors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[v.0]
            .in_edges
            .iter()
            .filter(|e| !self.edges[e.0].replaced)
            .map(|e| self.edges[e.0].source)
    }

    pub fn max_rank(&self) -> i32 {
        self.nodes.iter().map(|n| n.rank).max().unwrap_or(0)
    }

    /// Ranks as ordered node lists, outer index = rank, inner order = `Node::order` (falling back
    /// to arena order before the ordering stage has run).
    pub fn rank_matrix(&self) -> Vec<Vec<NodeId>> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let mut matrix: Vec<Vec<NodeId>> = vec![Vec::new(); self.max_rank() as usize + 1];
        for id in self.node_ids() {
            matrix[self.nodes[id.0].rank as usize].push(id);
        }
        for layer in &mut matrix {
            layer.sort_by_key(|&id| self.nodes[id.0].order);
        }
        matrix
    }

    /// Write a layer matrix back onto the nodes as dense order indices.
    pub fn assign_orders(&mut self, matrix: &[Vec<NodeId>]) {
        for layer in matrix {
            for (i, &id) in layer.iter().enumerate() {
                self.nodes[id.0].order = i;
            }
        }
    }
}
