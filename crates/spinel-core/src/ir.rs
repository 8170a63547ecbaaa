//! Intermediate representation for the rewrite graph.
//!
//! The IR is a directed graph where:
//! - **Nodes** (`IrNode`) are operations (e.g., Conv2D, StridedSlice)
//! - **Edges** (`IrEdge`) are tensor value flows between operations
//!
//! Rewrite rules mutate the graph in place: they add replacement nodes,
//! redirect every consumer of an edge to a new edge, and remove the nodes
//! they replaced. Edges whose bounds are known at compile time carry a
//! constant value that rules can pattern-match against.

use crate::types::{AttributeValue, DataType, TensorShape, TensorValue};
use crate::{Error, Result};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::Topo;

use std::collections::HashMap;

/// Type alias for IR node identifiers (backed by petgraph NodeIndex).
pub type IrNodeId = NodeIndex;

/// Unique identifier for an edge (tensor flow) in the IR graph.
///
/// This is an index into `IrGraph::edges`. Unlike node IDs (which use
/// petgraph's stable NodeIndex), edge IDs are simple usize indices that
/// remain valid across graph mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IrEdgeId(pub usize);

impl IrEdgeId {
    /// Create a new edge ID.
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index.
    pub fn index(&self) -> usize {
        self.0
    }
}

// ──────────────────────────────── IrGraph ────────────────────────────────

/// Intermediate representation graph.
///
/// Nodes are operations; edges are tensor value flows stored in a side-table.
/// petgraph edges exist solely for topological ordering.
pub struct IrGraph {
    /// The graph structure (nodes only, no edge data).
    graph: StableGraph<IrNode, ()>,

    /// Edge metadata side-table.
    edges: Vec<IrEdge>,

    /// Lookup table: edge name -> edge ID.
    edge_by_name: HashMap<String, IrEdgeId>,

    /// Lookup table: edge ID -> producing node ID.
    edge_producer: HashMap<IrEdgeId, IrNodeId>,

    /// Lookup table: edge ID -> consuming node IDs.
    edge_consumers: HashMap<IrEdgeId, Vec<IrNodeId>>,

    /// Graph input edge IDs.
    pub inputs: Vec<IrEdgeId>,

    /// Graph output edge IDs.
    pub outputs: Vec<IrEdgeId>,
}

impl IrGraph {
    /// Create a new empty IR graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            edges: Vec::new(),
            edge_by_name: HashMap::new(),
            edge_producer: HashMap::new(),
            edge_consumers: HashMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    // ── Node access ──

    /// Get an immutable reference to a node.
    pub fn node(&self, id: IrNodeId) -> Result<&IrNode> {
        self.graph
            .node_weight(id)
            .ok_or_else(|| Error::InvalidGraph(format!("Node {:?} not found", id)))
    }

    /// Get a mutable reference to a node.
    pub fn node_mut(&mut self, id: IrNodeId) -> Result<&mut IrNode> {
        self.graph
            .node_weight_mut(id)
            .ok_or_else(|| Error::InvalidGraph(format!("Node {:?} not found", id)))
    }

    /// Check whether a node still exists (rewrites remove nodes).
    pub fn contains_node(&self, id: IrNodeId) -> bool {
        self.graph.node_weight(id).is_some()
    }

    /// Iterate over all nodes in the graph.
    pub fn nodes(&self) -> impl Iterator<Item = (IrNodeId, &IrNode)> {
        self.graph
            .node_indices()
            .filter_map(|id| self.graph.node_weight(id).map(|node| (id, node)))
    }

    // ── Edge (tensor) access ──

    /// Get the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get an immutable reference to an edge.
    pub fn edge(&self, id: IrEdgeId) -> Result<&IrEdge> {
        self.edges
            .get(id.index())
            .ok_or_else(|| Error::InvalidGraph(format!("Edge {:?} not found", id)))
    }

    /// Get a mutable reference to an edge.
    pub fn edge_mut(&mut self, id: IrEdgeId) -> Result<&mut IrEdge> {
        self.edges
            .get_mut(id.index())
            .ok_or_else(|| Error::InvalidGraph(format!("Edge {:?} not found", id)))
    }

    /// Look up an edge by name.
    pub fn edge_by_name(&self, name: &str) -> Option<IrEdgeId> {
        self.edge_by_name.get(name).copied()
    }

    /// Get the node that produces an edge, if any.
    ///
    /// Graph inputs, weights, and constants have no producer.
    pub fn edge_producer(&self, id: IrEdgeId) -> Option<IrNodeId> {
        self.edge_producer.get(&id).copied()
    }

    /// Get the nodes that consume an edge.
    pub fn edge_consumers(&self, id: IrEdgeId) -> Vec<IrNodeId> {
        self.edge_consumers.get(&id).cloned().unwrap_or_default()
    }

    // ── Graph mutation ──

    /// Add a new node to the graph and return its ID.
    ///
    /// This also updates the producer/consumer lookup tables and
    /// adds petgraph edges for topological ordering.
    pub fn add_node(&mut self, mut node: IrNode) -> IrNodeId {
        let placeholder = IrNode::new(String::new());
        let node_id = self.graph.add_node(placeholder);
        node.node_index = node_id;

        // Register producer/consumer relationships
        for &output_id in &node.outputs {
            self.edge_producer.insert(output_id, node_id);
        }

        for &input_id in &node.inputs {
            self.edge_consumers
                .entry(input_id)
                .or_default()
                .push(node_id);

            // Add petgraph edge for topological ordering
            if let Some(&producer_id) = self.edge_producer.get(&input_id) {
                self.graph.add_edge(producer_id, node_id, ());
            }
        }

        // Replace the placeholder with the real node
        *self.graph.node_weight_mut(node_id).unwrap() = node;

        node_id
    }

    /// Remove a node from the graph.
    ///
    /// This also removes the node from producer/consumer lookup tables. With
    /// `StableGraph`, other node indices remain valid.
    pub fn remove_node(&mut self, id: IrNodeId) -> Result<()> {
        let node = self.node(id)?.clone();

        // Remove from producer lookup
        for &output_id in &node.outputs {
            self.edge_producer.remove(&output_id);
        }

        // Remove from consumer lookup
        for &input_id in &node.inputs {
            if let Some(consumers) = self.edge_consumers.get_mut(&input_id) {
                consumers.retain(|&c| c != id);
            }
        }

        // Remove node from graph (automatically removes petgraph edges)
        self.graph.remove_node(id);

        Ok(())
    }

    /// Add an edge (tensor) to the graph and return its ID.
    pub fn add_edge(&mut self, edge: IrEdge) -> IrEdgeId {
        let id = IrEdgeId::new(self.edges.len());
        self.edge_by_name.insert(edge.name.clone(), id);
        self.edges.push(edge);
        id
    }

    /// Redirect every use of `from` to `to`.
    ///
    /// All consumers of `from` now read `to` instead; graph outputs listing
    /// `from` are rewritten as well. petgraph ordering edges follow the
    /// redirection. The edge `from` keeps its producer (if any) so the
    /// producing node can subsequently be erased as dead.
    pub fn replace_all_uses(&mut self, from: IrEdgeId, to: IrEdgeId) -> Result<()> {
        // Bounds check both edges up front
        self.edge(from)?;
        self.edge(to)?;

        let consumers = self.edge_consumers(from);
        let from_producer = self.edge_producer(from);
        let to_producer = self.edge_producer(to);

        for consumer_id in consumers {
            {
                let node = self.node_mut(consumer_id)?;
                for input in node.inputs.iter_mut() {
                    if *input == from {
                        *input = to;
                    }
                }
            }
            let remaining_inputs = self.node(consumer_id)?.inputs.clone();
            let still_reads_from_producer = from_producer.is_some()
                && remaining_inputs
                    .iter()
                    .any(|input| self.edge_producer.get(input).copied() == from_producer);

            // Move consumer table entry
            self.edge_consumers
                .entry(to)
                .or_default()
                .push(consumer_id);

            // Rewire the topological-ordering edges. A consumer may read
            // several edges from the same producer, so the old petgraph edge
            // only goes away once no shared input remains.
            if let Some(producer_id) = from_producer {
                if !still_reads_from_producer {
                    if let Some(pg_edge) = self.graph.find_edge(producer_id, consumer_id) {
                        self.graph.remove_edge(pg_edge);
                    }
                }
            }
            if let Some(producer_id) = to_producer {
                if self.graph.find_edge(producer_id, consumer_id).is_none() {
                    self.graph.add_edge(producer_id, consumer_id, ());
                }
            }
        }
        self.edge_consumers.insert(from, Vec::new());

        for output in self.outputs.iter_mut() {
            if *output == from {
                *output = to;
            }
        }

        Ok(())
    }

    /// Erase nodes none of whose outputs are read.
    ///
    /// Rewrites leave behind disconnected producers (e.g., the original
    /// convolution after all its consumers were redirected). Those must not
    /// survive, or later label inspection could match them again. Runs until
    /// no dead node remains; returns whether anything was erased.
    pub fn erase_dead_nodes(&mut self) -> Result<bool> {
        let mut erased_any = false;

        loop {
            let dead: Vec<IrNodeId> = self
                .nodes()
                .filter(|(_, node)| {
                    !node.outputs.is_empty()
                        && node.outputs.iter().all(|&output_id| {
                            self.edge_consumers(output_id).is_empty()
                                && !self.outputs.contains(&output_id)
                        })
                })
                .map(|(id, _)| id)
                .collect();

            if dead.is_empty() {
                break;
            }
            for id in dead {
                self.remove_node(id)?;
                erased_any = true;
            }
        }

        Ok(erased_any)
    }

    // ── Graph queries ──

    /// Get the topological order of nodes in the graph.
    ///
    /// Returns nodes in an order such that all inputs to a node are produced
    /// before the node itself.
    pub fn topological_order(&self) -> Vec<IrNodeId> {
        let mut topo = Topo::new(&self.graph);
        let mut order = Vec::new();

        while let Some(id) = topo.next(&self.graph) {
            if self.graph.node_weight(id).is_some() {
                order.push(id);
            }
        }

        order
    }

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl Default for IrGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ──────────────────────────────── IrNode ─────────────────────────────────

/// A node in the IR graph: an operation that transforms tensor edges.
#[derive(Debug, Clone)]
pub struct IrNode {
    /// Node name (may be empty).
    pub name: String,

    /// Operation kind (e.g., "Conv2D", "StridedSlice").
    pub op_type: String,

    /// Operation attributes (e.g., padding, strides, rewrite labels).
    pub attributes: HashMap<String, AttributeValue>,

    /// Input edge IDs.
    pub inputs: Vec<IrEdgeId>,

    /// Output edge IDs.
    pub outputs: Vec<IrEdgeId>,

    /// The graph node index (for efficient graph traversal).
    pub node_index: IrNodeId,
}

impl IrNode {
    /// Create a new operation node.
    pub fn new(op_type: String) -> Self {
        Self {
            name: String::new(),
            op_type,
            attributes: HashMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            node_index: NodeIndex::default(),
        }
    }

    /// Get the operation kind.
    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Add an input edge.
    pub fn add_input(&mut self, edge_id: IrEdgeId) {
        self.inputs.push(edge_id);
    }

    /// Add an output edge.
    pub fn add_output(&mut self, edge_id: IrEdgeId) {
        self.outputs.push(edge_id);
    }

    /// Set an attribute. Cloned nodes keep their attributes, so labels set
    /// before cloning survive on the clone.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(key.into(), value);
    }

    /// Get an attribute.
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Check whether an attribute (or label) is present.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Get an integer attribute, if present and of integer type.
    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(|v| v.as_int())
    }

    /// Get a string attribute, if present and of string type.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

// ──────────────────────────────── EdgeData ───────────────────────────────

/// What compile-time data an edge carries.
#[derive(Debug, Clone)]
pub enum EdgeData {
    /// No compile-time data; value arrives at runtime.
    Runtime,

    /// Fully known compile-time constant (slice bounds, strides).
    Constant(TensorValue),
}

// ──────────────────────────────── IrEdge ─────────────────────────────────

/// An edge (tensor value flow) in the IR graph.
///
/// Edges carry metadata about the tensor that flows along them:
/// - `name` / `dtype` / `shape` describe the tensor.
/// - `data` describes what compile-time data (if any) the edge holds.
#[derive(Debug, Clone)]
pub struct IrEdge {
    /// Tensor name (must be unique within the graph).
    pub name: String,

    /// Data type.
    pub dtype: DataType,

    /// Shape (static or unknown).
    pub shape: TensorShape,

    /// Compile-time data carried by this edge.
    pub data: EdgeData,
}

impl IrEdge {
    /// Create a new runtime edge (no compile-time data).
    pub fn new(name: String, dtype: DataType, shape: TensorShape) -> Self {
        Self {
            name,
            dtype,
            shape,
            data: EdgeData::Runtime,
        }
    }

    /// Create a new edge with a known constant value.
    pub fn with_constant(name: String, value: TensorValue) -> Self {
        Self {
            name,
            dtype: value.dtype,
            shape: TensorShape::Static(value.shape.clone()),
            data: EdgeData::Constant(value),
        }
    }

    /// Check if this edge holds a constant value.
    pub fn is_constant(&self) -> bool {
        matches!(self.data, EdgeData::Constant(_))
    }

    /// Get the constant value, if this edge holds one.
    pub fn constant_value(&self) -> Option<&TensorValue> {
        match &self.data {
            EdgeData::Constant(value) => Some(value),
            EdgeData::Runtime => None,
        }
    }

    /// Get static dimensions, if the shape is static.
    pub fn static_dims(&self) -> Option<&[usize]> {
        self.shape.as_static()
    }
}
