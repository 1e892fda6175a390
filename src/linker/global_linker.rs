use crate::edge::{RelationshipKind, Target};
use crate::graph::GraphStore;
use crate::id::NodeId;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// How one dangling reference name maps onto the nodes of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Exactly one candidate (after preferring the referencing file)
    Resolved(NodeId),
    /// Several equally plausible candidates
    Ambiguous(Vec<NodeId>),
    /// No node carries the name; assumed to live outside the analyzed sources
    External,
}

/// Resolution of a single `references` relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Index into [`GraphStore::relationships`]
    pub relationship: usize,
    pub source: NodeId,
    pub name: String,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub resolved: usize,
    pub ambiguous: usize,
    pub external: usize,
    pub total: usize,
}

impl fmt::Display for LinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Linker Stats:")?;
        writeln!(f, "  Total References: {}", self.total)?;
        writeln!(f, "  ✅ Resolved: {}", self.resolved)?;
        writeln!(f, "  🤔 Ambiguous: {}", self.ambiguous)?;
        writeln!(f, "  🌍 External: {}", self.external)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkReport {
    pub links: Vec<Link>,
    pub stats: LinkStats,
}

impl LinkReport {
    /// The link for relationship `index`, if it was a dangling reference
    pub fn link_for(&self, index: usize) -> Option<&Link> {
        self.links
            .binary_search_by_key(&index, |link| link.relationship)
            .ok()
            .map(|pos| &self.links[pos])
    }
}

/// Name-based resolution pass over a finished graph.
///
/// The store is never mutated; callers decide what to do with the report.
pub struct Linker<'a> {
    store: &'a GraphStore,
}

impl<'a> Linker<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    pub fn link(&self) -> LinkReport {
        let by_name = self.index_by_name();
        let mut report = LinkReport::default();

        for (idx, rel) in self.store.relationships().iter().enumerate() {
            if rel.kind != RelationshipKind::References {
                continue;
            }
            let Target::Unresolved(name) = &rel.target else {
                continue;
            };

            let candidates = by_name.get(name.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let resolution = self.resolve(rel.source, candidates);
            match &resolution {
                Resolution::Resolved(_) => report.stats.resolved += 1,
                Resolution::Ambiguous(_) => report.stats.ambiguous += 1,
                Resolution::External => report.stats.external += 1,
            }
            report.stats.total += 1;
            report.links.push(Link {
                relationship: idx,
                source: rel.source,
                name: name.clone(),
                resolution,
            });
        }

        tracing::debug!(
            "Linked {} references: {} resolved, {} ambiguous, {} external",
            report.stats.total,
            report.stats.resolved,
            report.stats.ambiguous,
            report.stats.external
        );
        report
    }

    /// Definitions by name; modules are never call targets
    fn index_by_name(&self) -> HashMap<&'a str, Vec<NodeId>> {
        let mut index: HashMap<&'a str, Vec<NodeId>> = HashMap::new();
        for (id, node) in self.store.iter_nodes() {
            if !node.is_module() {
                index.entry(node.name.as_str()).or_default().push(id);
            }
        }
        index
    }

    fn resolve(&self, source: NodeId, candidates: &[NodeId]) -> Resolution {
        match candidates {
            [] => return Resolution::External,
            [only] => return Resolution::Resolved(*only),
            _ => {}
        }

        // Same-file candidates win over the rest of the graph
        let source_path = self.store.node(source).map(|n| n.origin.path.as_str());
        let local: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|id| {
                self.store.node(*id).map(|n| n.origin.path.as_str()) == source_path
            })
            .collect();

        match local.as_slice() {
            [only] => Resolution::Resolved(*only),
            [] => Resolution::Ambiguous(candidates.to_vec()),
            _ => Resolution::Ambiguous(local),
        }
    }
}
