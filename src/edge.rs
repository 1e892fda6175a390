//! Relationship types - directed, typed edges
//!
//! Two relationship kinds are produced by the scanners:
//! - `Contains`: module → definition (both ends resolved)
//! - `References`: enclosing definition → referenced name (target may dangle)

use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Module contains a definition
    Contains,
    /// A unit textually uses another by name
    References,
}

impl RelationshipKind {
    /// Get the string representation of the relationship kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Contains => "contains",
            RelationshipKind::References => "references",
        }
    }

    /// Get all relationship kinds
    pub fn all() -> &'static [RelationshipKind] {
        &[RelationshipKind::Contains, RelationshipKind::References]
    }
}

impl FromStr for RelationshipKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" | "contain" => Ok(RelationshipKind::Contains),
            "references" | "reference" | "ref" | "refs" => Ok(RelationshipKind::References),
            _ => Err(crate::Error::InvalidKind(format!("Unknown relationship kind: {}", s))),
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Endpoint of a relationship: a known node, or a bare symbol name whose
/// defining node has not been identified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Resolved(NodeId),
    Unresolved(String),
}

impl Target {
    pub fn is_dangling(&self) -> bool {
        matches!(self, Target::Unresolved(_))
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Target::Resolved(id) => Some(*id),
            Target::Unresolved(_) => None,
        }
    }
}

/// A directed edge in the code graph. Immutable once appended to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub source: NodeId,
    pub target: Target,
    pub kind: RelationshipKind,
}

impl Relationship {
    /// Module → definition
    pub fn contains(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target: Target::Resolved(target),
            kind: RelationshipKind::Contains,
        }
    }

    /// Enclosing unit → referenced name, left unresolved
    pub fn references(source: NodeId, name: impl Into<String>) -> Self {
        Self {
            source,
            target: Target::Unresolved(name.into()),
            kind: RelationshipKind::References,
        }
    }
}
