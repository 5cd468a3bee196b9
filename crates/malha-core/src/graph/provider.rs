use crate::graph::weighted::{Edge, NodeId, WeightedGraph};

/// Read-only neighbor-iteration contract the algorithms run against
pub trait GraphProvider {
    fn node_id(&self, name: &str) -> Option<NodeId>;
    fn node_id_at(&self, index: usize) -> Option<NodeId>;
    fn node_name(&self, id: NodeId) -> &str;
    fn node_count(&self) -> usize;
    fn out_edges(&self, id: NodeId) -> &[Edge];
    fn first_negative_edge(&self) -> Option<(NodeId, NodeId, f64)>;
}

impl GraphProvider for WeightedGraph {
    fn node_id(&self, name: &str) -> Option<NodeId> {
        WeightedGraph::node_id(self, name)
    }

    fn node_id_at(&self, index: usize) -> Option<NodeId> {
        WeightedGraph::node_id_at(self, index)
    }

    fn node_name(&self, id: NodeId) -> &str {
        self.name(id)
    }

    fn node_count(&self) -> usize {
        self.order()
    }

    fn out_edges(&self, id: NodeId) -> &[Edge] {
        self.edges_of(id)
    }

    fn first_negative_edge(&self) -> Option<(NodeId, NodeId, f64)> {
        WeightedGraph::first_negative_edge(self)
    }
}
