use super::graph::{EdgeStatus, Graph, NodeIndex};
use std::{collections::HashMap, hash::Hash};

/// A [Graph] whose nodes are addressed by a unique key.
pub struct GraphMap<K: Eq + Hash + Clone, V> {
    graph: Graph<K>,
    map: HashMap<K, Node<V>>,
}

pub struct Node<V>(V, usize);

impl<V> Node<V> {
    pub fn index(&self) -> usize {
        self.1
    }

    pub fn as_ref(&self) -> &V {
        &self.0
    }
}

impl<K: Eq + Hash + Clone, V> GraphMap<K, V> {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            map: HashMap::new(),
        }
    }

    /// Adds a node under `key`. An existing entry for `key` keeps its index and
    /// has its value replaced.
    pub fn add_node(&mut self, key: K, value: V) -> usize {
        if let Some(node) = self.map.get_mut(&key) {
            node.0 = value;
            return node.1;
        }
        let iden = self.graph.add_node(key.clone());
        self.map.insert(key, Node(value, iden));
        iden
    }

    /// Connects `source` to `target`.
    ///
    /// Returns `None` when either key has not been added as a node.
    pub fn add_edge_by_key(&mut self, source: &K, target: &K) -> Option<EdgeStatus> {
        let source = self.map.get(source)?.index();
        let target = self.map.get(target)?.index();
        Some(self.graph.add_edge(source, target))
    }

    pub fn get_node_by_key(&self, key: &K) -> Option<&Node<V>> {
        self.map.get(key)
    }

    pub fn get_node_by_index(&self, index: NodeIndex) -> Option<&Node<V>> {
        self.map.get(self.graph.get_node(index)?)
    }

    pub fn get_key_by_index(&self, index: NodeIndex) -> Option<&K> {
        self.graph.get_node(index)
    }

    pub fn get_graph(&self) -> &Graph<K> {
        &self.graph
    }
}
