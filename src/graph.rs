//! Graph Store - the session's node arena and relationship log
//!
//! Nodes live in a vector indexed by [`NodeId`]; relationships form an
//! append-only log. Nothing is ever removed.

use crate::edge::{Relationship, RelationshipKind, Target};
use crate::id::{IdAllocator, NodeId};
use crate::node::{Node, NodeKind};
use crate::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Sole owner of every node and relationship recorded during one session.
///
/// Serializes as `{ nodes, relationships }`, each node carrying its `id`.
#[derive(Debug, Default)]
pub struct GraphStore {
    ids: IdAllocator,
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

impl GraphStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its freshly issued id
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.ids.next_id();
        debug_assert_eq!(id.index(), self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append a relationship.
    ///
    /// The source must exist; a resolved target must exist; a `contains`
    /// edge must not dangle.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<()> {
        if self.node(relationship.source).is_none() {
            return Err(Error::NodeNotFound(relationship.source));
        }
        match &relationship.target {
            Target::Resolved(id) if self.node(*id).is_none() => {
                return Err(Error::NodeNotFound(*id));
            }
            Target::Unresolved(name) if relationship.kind == RelationshipKind::Contains => {
                return Err(Error::InvalidRelationship(format!(
                    "contains edge from {} has dangling target '{}'",
                    relationship.source, name
                )));
            }
            _ => {}
        }
        self.relationships.push(relationship);
        Ok(())
    }

    /// Enrich a node with an attribute; the only mutation nodes allow
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        let node = self.nodes.get_mut(id.index()).ok_or(Error::NodeNotFound(id))?;
        node.attributes.insert(key.into(), value.into());
        Ok(())
    }

    /// Get a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All relationships in append order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Nodes paired with their ids
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        // ids are issued densely, so the nth id is the nth node
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }

    /// Module nodes, one per analyzed file
    pub fn modules(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.iter_nodes().filter(|(_, node)| node.is_module())
    }

    /// Relationships of a specific kind, in append order
    pub fn relationships_of(&self, kind: RelationshipKind) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| r.kind == kind)
    }

    /// Display name of a relationship endpoint: the node's name for resolved
    /// targets, the literal symbol for dangling ones
    pub fn target_name<'a>(&'a self, target: &'a Target) -> Option<&'a str> {
        match target {
            Target::Resolved(id) => self.node(*id).map(|n| n.name.as_str()),
            Target::Unresolved(name) => Some(name.as_str()),
        }
    }

    /// Every relationship rendered as `(source name, target name, kind)`
    pub fn display_edges(&self) -> Vec<DisplayEdge<'_>> {
        self.relationships
            .iter()
            .filter_map(|rel| {
                let source = self.node(rel.source)?;
                let target = self.target_name(&rel.target)?;
                Some(DisplayEdge {
                    source: source.name.as_str(),
                    target,
                    kind: rel.kind,
                })
            })
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let count_kind = |kind: NodeKind| self.nodes.iter().filter(|n| n.kind == kind).count();

        GraphStats {
            modules: count_kind(NodeKind::Module),
            functions: count_kind(NodeKind::Function),
            types: count_kind(NodeKind::Type),
            contains: self.relationships_of(RelationshipKind::Contains).count(),
            references: self.relationships_of(RelationshipKind::References).count(),
            dangling: self.relationships.iter().filter(|r| r.target.is_dangling()).count(),
        }
    }
}

#[derive(Serialize)]
struct NodeEntry<'a> {
    id: NodeId,
    #[serde(flatten)]
    node: &'a Node,
}

impl Serialize for GraphStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes: Vec<NodeEntry<'_>> = self
            .iter_nodes()
            .map(|(id, node)| NodeEntry { id, node })
            .collect();
        let mut state = serializer.serialize_struct("GraphStore", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("relationships", &self.relationships)?;
        state.end()
    }
}

/// A relationship with both ends replaced by display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayEdge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub kind: RelationshipKind,
}

/// Statistics about a graph store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub modules: usize,
    pub functions: usize,
    pub types: usize,
    pub contains: usize,
    pub references: usize,
    pub dangling: usize,
}

impl GraphStats {
    pub fn nodes(&self) -> usize {
        self.modules + self.functions + self.types
    }

    pub fn relationships(&self) -> usize {
        self.contains + self.references
    }
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Code Context Graph Statistics:")?;
        writeln!(f, "  Modules: {}", self.modules)?;
        writeln!(f, "  Nodes: {} (functions: {}, types: {})", self.nodes(), self.functions, self.types)?;
        writeln!(f, "  Relationships: {} (contains: {}, references: {}, dangling: {})",
            self.relationships(), self.contains, self.references, self.dangling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> (GraphStore, NodeId, NodeId) {
        let mut store = GraphStore::new();
        let module = store.add_node(Node::module("src/sample.py"));
        let func = store.add_node(Node::new(NodeKind::Function, "func_a", "src/sample.py", 1));
        (store, module, func)
    }

    #[test]
    fn test_add_and_retrieve_node() {
        let (store, module, func) = sample_store();

        assert_eq!(store.node(module).unwrap().name, "sample");
        assert_eq!(store.node(func).unwrap().name, "func_a");
        assert_eq!(store.nodes().len(), 2);
        assert_eq!(store.modules().count(), 1);
    }

    #[test]
    fn test_relationship_log_preserves_order() {
        let (mut store, module, func) = sample_store();
        store.add_relationship(Relationship::contains(module, func)).unwrap();
        store.add_relationship(Relationship::references(func, "helper")).unwrap();
        store.add_relationship(Relationship::references(module, "main")).unwrap();

        let edges = store.display_edges();
        assert_eq!(edges.len(), 3);
        assert_eq!((edges[0].source, edges[0].target), ("sample", "func_a"));
        assert_eq!((edges[1].source, edges[1].target), ("func_a", "helper"));
        assert_eq!((edges[2].source, edges[2].target), ("sample", "main"));
    }

    #[test]
    fn test_rejects_unknown_source() {
        let (mut store, _, _) = sample_store();
        let stray = NodeId::from_index(5);

        let err = store.add_relationship(Relationship::references(stray, "x")).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(id) if id == stray));
        assert!(store.relationships().is_empty());
    }

    #[test]
    fn test_rejects_dangling_contains() {
        let (mut store, module, _) = sample_store();
        let rel = Relationship {
            source: module,
            target: Target::Unresolved("ghost".to_string()),
            kind: RelationshipKind::Contains,
        };

        assert!(matches!(store.add_relationship(rel), Err(Error::InvalidRelationship(_))));
    }

    #[test]
    fn test_attribute_enrichment() {
        let (mut store, _, func) = sample_store();
        store.set_attribute(func, "signature", "(x)").unwrap();

        let node = store.node(func).unwrap();
        assert_eq!(node.attribute("signature").and_then(|v| v.as_str()), Some("(x)"));
    }

    #[test]
    fn test_stats() {
        let (mut store, module, func) = sample_store();
        let class = store.add_node(Node::new(NodeKind::Type, "MyClass", "src/sample.py", 4));
        store.add_relationship(Relationship::contains(module, func)).unwrap();
        store.add_relationship(Relationship::contains(module, class)).unwrap();
        store.add_relationship(Relationship::references(class, "func_a")).unwrap();

        let stats = store.stats();
        assert_eq!(stats.nodes(), 3);
        assert_eq!(stats.contains, 2);
        assert_eq!(stats.references, 1);
        assert_eq!(stats.dangling, 1);
        assert!(stats.to_string().contains("Modules: 1"));
    }
}
