//! The representation graph arena.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Handle to a node stored in a [`Graph`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// The three YAML node shapes. Mapping entries preserve insertion order;
/// keys may be any node, including collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Scalar(String),
    Sequence(Vec<NodeId>),
    Mapping(Vec<(NodeId, NodeId)>),
}

/// One node: resolved tag IRI, source position, and shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub tag: String,
    pub position: Position,
    pub kind: NodeKind,
}

/// Arena of nodes. Nodes are appended during parsing and never removed;
/// a node shared through an alias simply appears under several parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<NodeData>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(data);
        id
    }

    pub fn scalar(&mut self, tag: String, value: String, position: Position) -> NodeId {
        self.alloc(NodeData {
            tag,
            position,
            kind: NodeKind::Scalar(value),
        })
    }

    pub fn sequence(&mut self, tag: String, position: Position) -> NodeId {
        self.alloc(NodeData {
            tag,
            position,
            kind: NodeKind::Sequence(Vec::new()),
        })
    }

    pub fn mapping(&mut self, tag: String, position: Position) -> NodeId {
        self.alloc(NodeData {
            tag,
            position,
            kind: NodeKind::Mapping(Vec::new()),
        })
    }

    pub fn push_item(&mut self, sequence: NodeId, item: NodeId) {
        match &mut self.nodes[sequence.index()].kind {
            NodeKind::Sequence(items) => items.push(item),
            other => panic!("push_item on a non-sequence node: {other:?}"),
        }
    }

    pub fn push_entry(&mut self, mapping: NodeId, key: NodeId, value: NodeId) {
        match &mut self.nodes[mapping.index()].kind {
            NodeKind::Mapping(entries) => entries.push((key, value)),
            other => panic!("push_entry on a non-mapping node: {other:?}"),
        }
    }

    pub fn get(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { graph: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, data)| (NodeId::from_index(i), data))
    }
}

/// Cheap navigation handle: a graph reference plus a node id.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    graph: &'a Graph,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn data(self) -> &'a NodeData {
        self.graph.get(self.id)
    }

    pub fn tag(self) -> &'a str {
        &self.data().tag
    }

    pub fn position(self) -> Position {
        self.data().position
    }

    pub fn is_scalar(self) -> bool {
        matches!(self.data().kind, NodeKind::Scalar(_))
    }

    pub fn is_sequence(self) -> bool {
        matches!(self.data().kind, NodeKind::Sequence(_))
    }

    pub fn is_mapping(self) -> bool {
        matches!(self.data().kind, NodeKind::Mapping(_))
    }

    /// Scalar value, if this is a scalar.
    pub fn as_str(self) -> Option<&'a str> {
        match &self.data().kind {
            NodeKind::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Sequence items; empty for other shapes.
    pub fn items(self) -> impl Iterator<Item = NodeRef<'a>> {
        let ids: &[NodeId] = match &self.data().kind {
            NodeKind::Sequence(items) => items,
            _ => &[],
        };
        ids.iter().map(move |&id| self.graph.node(id))
    }

    /// Mapping entries; empty for other shapes.
    pub fn entries(self) -> impl Iterator<Item = (NodeRef<'a>, NodeRef<'a>)> {
        let pairs: &[(NodeId, NodeId)] = match &self.data().kind {
            NodeKind::Mapping(entries) => entries,
            _ => &[],
        };
        pairs
            .iter()
            .map(move |&(k, v)| (self.graph.node(k), self.graph.node(v)))
    }

    /// Number of items (sequence) or entries (mapping); 0 for scalars.
    pub fn len(self) -> usize {
        match &self.data().kind {
            NodeKind::Scalar(_) => 0,
            NodeKind::Sequence(items) => items.len(),
            NodeKind::Mapping(entries) => entries.len(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Look up a mapping value by scalar key text. Scalar keys compare by
    /// value; the last matching entry wins, mirroring alias rebinding.
    pub fn lookup(self, key: &str) -> Option<NodeRef<'a>> {
        let mut found = None;
        for (k, v) in self.entries() {
            if k.as_str() == Some(key) {
                found = Some(v);
            }
        }
        found
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("data", self.data())
            .finish()
    }
}
