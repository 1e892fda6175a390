//! Node types - the structural units of the graph
//!
//! Every file contributes one `Module` node; definition statements inside it
//! contribute `Function` and `Type` nodes.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Kind tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// File, module, package - the organizational unit
    Module,
    /// Function, method, procedure
    Function,
    /// Class, struct, interface, trait
    Type,
}

impl NodeKind {
    /// Get the string representation of the node kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Function => "function",
            NodeKind::Type => "type",
        }
    }

    /// Get all node kinds
    pub fn all() -> &'static [NodeKind] {
        &[NodeKind::Module, NodeKind::Function, NodeKind::Type]
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "module" | "namespace" | "package" | "file" => Ok(NodeKind::Module),
            "function" | "method" | "fn" | "def" | "callable" => Ok(NodeKind::Function),
            "type" | "class" | "struct" | "trait" | "interface" => Ok(NodeKind::Type),
            _ => Err(Error::InvalidKind(format!("Unknown node kind: {}", s))),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a node was declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// File path as handed to the session
    pub path: String,
    /// Starting line (1-indexed)
    pub line: u32,
}

/// A node in the code graph.
///
/// Names are as written in source and are not unique across files; the
/// store-issued [`crate::NodeId`] is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    pub origin: Origin,
    /// Kind-specific metadata (signature, indent, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Create a new node with no attributes
    pub fn new(kind: NodeKind, name: impl Into<String>, path: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            origin: Origin {
                path: path.into(),
                line,
            },
            attributes: BTreeMap::new(),
        }
    }

    /// Create the module node for a file
    pub fn module(path: &str) -> Self {
        Self::new(NodeKind::Module, module_name(path), path, 1)
    }

    /// Set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    pub fn is_module(&self) -> bool {
        self.kind == NodeKind::Module
    }

    /// Get a short description for display
    pub fn short_description(&self) -> String {
        format!("{} {} ({}:{})", self.kind, self.name, self.origin.path, self.origin.line)
    }
}

/// Module name for a file: its base name with the last extension stripped.
pub fn module_name(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_roundtrip() {
        for kind in NodeKind::all() {
            let parsed: NodeKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_node_kind_aliases() {
        assert_eq!(NodeKind::from_str("class").unwrap(), NodeKind::Type);
        assert_eq!(NodeKind::from_str("def").unwrap(), NodeKind::Function);
        assert_eq!(NodeKind::from_str("package").unwrap(), NodeKind::Module);
        assert!(NodeKind::from_str("variable").is_err());
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("sample.py"), "sample");
        assert_eq!(module_name("pkg/sub/util.py"), "util");
        assert_eq!(module_name("archive.tar.gz"), "archive.tar");
        assert_eq!(module_name("Makefile"), "Makefile");
        assert_eq!(module_name(".bashrc"), ".bashrc");
    }

    #[test]
    fn test_node_attributes() {
        let node = Node::new(NodeKind::Function, "func_a", "sample.py", 1)
            .with_attribute("signature", "(x)");

        assert_eq!(node.attribute("signature").and_then(|v| v.as_str()), Some("(x)"));
        assert!(node.attribute("missing").is_none());
        assert_eq!(node.short_description(), "function func_a (sample.py:1)");
    }
}
