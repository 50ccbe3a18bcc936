/// Basic graph data structure
/// - source: http://smallcultfollowing.com/babysteps/blog/2015/04/06/modeling-graphs-in-rust-using-vector-indices/
use std::collections::VecDeque;

pub type NodeIndex = usize;

#[derive(Debug, PartialEq)]
struct NodeData<V> {
    node: V,
    first_outgoing_edge: Option<EdgeIndex>,
    first_incoming_edge: Option<EdgeIndex>,
}

type EdgeIndex = usize;

#[derive(Debug, PartialEq)]
struct EdgeData {
    source: NodeIndex,
    target: NodeIndex,
    next_outgoing_edge: Option<EdgeIndex>,
    next_incoming_edge: Option<EdgeIndex>,
}

/// A directed graph where an edge `source -> target` reads as "`source` must
/// be completed before `target`".
#[derive(Debug, PartialEq)]
pub struct Graph<V> {
    vertices: Vec<NodeData<V>>,
    edges: Vec<EdgeData>,
}

#[derive(Debug, PartialEq)]
pub enum EdgeStatus {
    SelfLoop,
    AlreadyExists,
    Success,
}

impl EdgeStatus {
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Success => true,
            _ => false,
        }
    }
}

impl<V> Graph<V> {
    /// Creates an empty `Graph` struct.
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            vertices: Vec::new(),
        }
    }

    /// Adds a new node to the graph.
    ///
    /// Returns the `NodeIndex` to remember the node.
    pub fn add_node(&mut self, node: V) -> NodeIndex {
        let index = self.vertices.len();
        self.vertices.push(NodeData {
            node: node,
            first_outgoing_edge: None,
            first_incoming_edge: None,
        });
        index
    }

    /// Checks if a given `source` node is connected to the given `target` node.
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.successors(source).any(|f| f == target)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Accesses the node data label behind the `node` index.
    pub fn get_node(&self, node: NodeIndex) -> Option<&V> {
        Some(&self.vertices.get(node)?.node)
    }

    /// Adds a new edge to the graph from `source` to `target`.
    ///
    /// Duplicate edges and self-loops are rejected and reported through the
    /// returned [EdgeStatus].
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeStatus {
        if source == target {
            return EdgeStatus::SelfLoop;
        }
        if self.has_edge(source, target) == true {
            return EdgeStatus::AlreadyExists;
        }
        let edge_index = self.edges.len();
        let next_outgoing_edge = self.vertices[source].first_outgoing_edge;
        let next_incoming_edge = self.vertices[target].first_incoming_edge;
        self.edges.push(EdgeData {
            source: source,
            target: target,
            next_outgoing_edge: next_outgoing_edge,
            next_incoming_edge: next_incoming_edge,
        });
        self.vertices[source].first_outgoing_edge = Some(edge_index);
        self.vertices[target].first_incoming_edge = Some(edge_index);
        EdgeStatus::Success
    }

    /// Returns the number of predecessors to the `target` node.
    pub fn in_degree(&self, target: NodeIndex) -> usize {
        self.predecessors(target).count()
    }

    /// Creates an iterator over the incoming nodes to the `target` node.
    pub fn predecessors(&self, target: NodeIndex) -> Predecessors<V> {
        let first_incoming_edge = self.vertices[target].first_incoming_edge;
        Predecessors {
            graph: self,
            current_edge_index: first_incoming_edge,
        }
    }

    /// Creates an iterator over the outgoing nodes from the `source` node.
    pub fn successors(&self, source: NodeIndex) -> Successors<V> {
        let first_outgoing_edge = self.vertices[source].first_outgoing_edge;
        Successors {
            graph: self,
            current_edge_index: first_outgoing_edge,
        }
    }

    /// Orders the nodes so that every node appears after all of its predecessors.
    ///
    /// Nodes are released in insertion order whenever more than one is ready.
    /// Returns the nodes that could never be released as an err when the
    /// graph contains a cycle.
    pub fn topological_sort(&self) -> Result<Vec<NodeIndex>, Vec<NodeIndex>> {
        let mut order = Vec::<NodeIndex>::with_capacity(self.node_count());
        let mut remaining: Vec<usize> = (0..self.node_count())
            .map(|i| self.in_degree(i))
            .collect();
        let mut ready: VecDeque<NodeIndex> = remaining
            .iter()
            .enumerate()
            .filter_map(|(i, d)| if *d == 0 { Some(i) } else { None })
            .collect();
        while let Some(current) = ready.pop_front() {
            order.push(current);
            // successors are yielded newest-first; release them in insertion order
            let mut released: Vec<NodeIndex> = Vec::new();
            for next in self.successors(current) {
                remaining[next] -= 1;
                if remaining[next] == 0 {
                    released.push(next);
                }
            }
            released.sort();
            ready.extend(released);
        }
        match order.len() == self.node_count() {
            true => Ok(order),
            false => Err(remaining
                .iter()
                .enumerate()
                .filter_map(|(i, d)| if *d > 0 { Some(i) } else { None })
                .collect()),
        }
    }
}

pub struct Predecessors<'graph, V> {
    graph: &'graph Graph<V>,
    current_edge_index: Option<EdgeIndex>,
}

impl<'graph, V> Iterator for Predecessors<'graph, V> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = &self.graph.edges[self.current_edge_index?];
        self.current_edge_index = edge.next_incoming_edge;
        Some(edge.source)
    }
}

pub struct Successors<'graph, V> {
    graph: &'graph Graph<V>,
    current_edge_index: Option<EdgeIndex>,
}

impl<'graph, V> Iterator for Successors<'graph, V> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = &self.graph.edges[self.current_edge_index?];
        self.current_edge_index = edge.next_outgoing_edge;
        Some(edge.target)
    }
}
