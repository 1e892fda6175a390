//! # ccgraph - Code Context Graph
//!
//! Scans source text line by line and builds a structural graph of a code base.
//!
//! ccgraph provides:
//! - Modules, functions and types as graph nodes, one module node per file
//! - `contains` edges from each module to its definitions
//! - `references` edges from the enclosing definition to call-like names,
//!   kept unresolved (by name) until an optional linking pass
//! - A pluggable, pattern-driven scanner registry keyed by file extension
//! - A query engine answering "who references X"

pub mod id;
pub mod node;
pub mod edge;
pub mod graph;
pub mod scan;
pub mod adapter;
pub mod builder;
pub mod query;
pub mod linker;
pub mod export;
pub mod source;
pub mod ignore;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use id::{IdAllocator, NodeId};
pub use node::{Node, NodeKind, Origin};
pub use edge::{Relationship, RelationshipKind, Target};
pub use graph::GraphStore;
pub use builder::{Analysis, Session, SessionReport};
pub use query::QueryEngine;

/// Result type alias for ccgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ccgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid kind: {0}")]
    InvalidKind(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Invalid node id: {0}")]
    InvalidNodeId(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File is {size} bytes, over the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
