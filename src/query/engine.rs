//! Query engine implementation
//!
//! Read-only lookups over a finished graph store:
//! - Who references a symbol (by name, through dangling or resolved targets)
//! - What a named unit references
//! - Members of a module
//!
//! Results are always expressed in node names, never raw ids.

use crate::edge::{Relationship, RelationshipKind};
use crate::graph::GraphStore;
use crate::id::NodeId;
use crate::node::Node;
use serde::Serialize;

/// How symbol names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Insensitive,
    Sensitive,
}

impl CaseSensitivity {
    fn matches(self, candidate: &str, query: &str) -> bool {
        match self {
            CaseSensitivity::Insensitive => candidate.to_lowercase() == query.to_lowercase(),
            CaseSensitivity::Sensitive => candidate == query,
        }
    }
}

/// One `(source name, symbol, kind)` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceMatch {
    /// Name of the referencing node
    pub source: String,
    /// Referenced symbol, as recorded in the graph
    pub symbol: String,
    pub kind: RelationshipKind,
}

/// Query engine for graph lookups
pub struct QueryEngine<'a> {
    store: &'a GraphStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Every unit referencing `symbol`, compared case-insensitively.
    ///
    /// Matches keep the order in which relationships were recorded; no match
    /// yields an empty vector.
    pub fn who_references(&self, symbol: &str) -> Vec<ReferenceMatch> {
        self.who_references_with(symbol, CaseSensitivity::Insensitive)
    }

    /// [`QueryEngine::who_references`] with explicit case handling
    pub fn who_references_with(&self, symbol: &str, case: CaseSensitivity) -> Vec<ReferenceMatch> {
        self.store
            .relationships_of(RelationshipKind::References)
            .filter_map(|rel| {
                let target = self.store.target_name(&rel.target)?;
                if !case.matches(target, symbol) {
                    return None;
                }
                let source = self.store.node(rel.source)?;
                Some(ReferenceMatch {
                    source: source.name.clone(),
                    symbol: target.to_string(),
                    kind: rel.kind,
                })
            })
            .collect()
    }

    /// Names referenced by any node called `name`, in recording order
    pub fn references_from(&self, name: &str) -> Vec<String> {
        self.outgoing(name, RelationshipKind::References)
            .filter_map(|rel| self.store.target_name(&rel.target))
            .map(str::to_string)
            .collect()
    }

    /// Nodes contained by any node called `name` (e.g. a module's definitions)
    pub fn members_of(&self, name: &str) -> Vec<&'a Node> {
        self.outgoing(name, RelationshipKind::Contains)
            .filter_map(|rel| rel.target.as_node())
            .filter_map(|id| self.store.node(id))
            .collect()
    }

    /// Nodes with exactly this name
    pub fn find_nodes(&self, name: &str) -> Vec<(NodeId, &'a Node)> {
        self.store
            .iter_nodes()
            .filter(|(_, node)| node.name == name)
            .collect()
    }

    fn outgoing(&self, name: &str, kind: RelationshipKind) -> impl Iterator<Item = &'a Relationship> {
        let store = self.store;
        store.relationships_of(kind).filter(move |rel| {
            store
                .node(rel.source)
                .is_some_and(|source| source.name == name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::default_registry;
    use crate::builder::Session;

    const SAMPLE: &str = "def func_a(x):\n    return x + 1\n\nclass MyClass:\n    def method_b(self, y):\n        return func_a(y)\n";

    fn build(files: &[(&str, &str)]) -> GraphStore {
        let registry = default_registry().unwrap();
        let mut session = Session::new(&registry);
        session.analyze_all(files.iter().copied());
        session.finish().graph
    }

    #[test]
    fn test_who_references_sample() {
        let graph = build(&[("sample.py", SAMPLE)]);
        let engine = QueryEngine::new(&graph);

        let matches = engine.who_references("func_a");
        assert_eq!(
            matches,
            vec![ReferenceMatch {
                source: "method_b".to_string(),
                symbol: "func_a".to_string(),
                kind: RelationshipKind::References,
            }]
        );
    }

    #[test]
    fn test_case_handling() {
        let graph = build(&[("sample.py", SAMPLE)]);
        let engine = QueryEngine::new(&graph);

        assert_eq!(engine.who_references("FUNC_A").len(), 1);
        assert!(engine.who_references_with("FUNC_A", CaseSensitivity::Sensitive).is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let graph = build(&[("sample.py", SAMPLE)]);
        assert!(QueryEngine::new(&graph).who_references("missing").is_empty());
    }

    #[test]
    fn test_only_invoking_definition_matches() {
        let text = "def caller():\n    return func_a(1)\n\ndef bystander():\n    return 2\n";
        let graph = build(&[("pair.py", text)]);
        let matches = QueryEngine::new(&graph).who_references("func_a");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].source, "caller");
    }

    #[test]
    fn test_order_follows_recording() {
        let graph = build(&[
            ("b.py", "def second():\n    log(2)\n"),
            ("a.py", "log(0)\n\ndef first():\n    log(1)\n"),
        ]);
        let sources: Vec<_> = QueryEngine::new(&graph)
            .who_references("log")
            .into_iter()
            .map(|m| m.source)
            .collect();

        assert_eq!(sources, vec!["second", "a", "first"]);
    }

    #[test]
    fn test_members_and_outgoing_references() {
        let graph = build(&[("sample.py", SAMPLE)]);
        let engine = QueryEngine::new(&graph);

        let members: Vec<_> = engine.members_of("sample").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(members, vec!["func_a", "MyClass", "method_b"]);
        assert_eq!(engine.references_from("method_b"), vec!["func_a"]);
        assert!(engine.references_from("MyClass").is_empty());
        assert_eq!(engine.find_nodes("MyClass").len(), 1);
    }
}
