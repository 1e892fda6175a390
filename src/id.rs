//! Node identifiers
//!
//! Ids are dense arena indices issued by a per-session counter, so the graph
//! store can be a plain vector indexed by id. Outside the store (display,
//! JSON, Mermaid) an id is always written as the 1-based label `N<k>`.

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a node within one analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the store's arena
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0 + 1)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('N')
            .and_then(|k| k.parse::<u32>().ok())
            .and_then(|k| k.checked_sub(1))
            .map(NodeId)
            .ok_or_else(|| Error::InvalidNodeId(s.to_string()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Issues fresh, monotonically increasing node ids.
///
/// Not synchronized: a host that scans files in parallel must funnel id
/// issuance through a single writer (see [`crate::builder::Session`]).
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a previously unissued id
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> usize {
        self.next as usize
    }

    /// Start a new session's numbering from scratch
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_unique() {
        let mut ids = IdAllocator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert!(a < b && b < c);
        assert_eq!(c.index(), 2);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut ids = IdAllocator::new();
        ids.next_id();
        ids.next_id();
        ids.reset();

        assert_eq!(ids.next_id().index(), 0);
    }

    #[test]
    fn test_display_is_one_based() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id().to_string(), "N1");
        assert_eq!(ids.next_id().to_string(), "N2");
    }

    #[test]
    fn test_serialized_as_label() {
        let id = NodeId::from_index(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""N4""#);
        assert_eq!(serde_json::from_str::<NodeId>(r#""N4""#).unwrap(), id);
        assert_eq!("N1".parse::<NodeId>().unwrap().index(), 0);
    }

    #[test]
    fn test_invalid_labels_rejected() {
        for label in ["N0", "4", "node4", "N", "N-1"] {
            assert!(label.parse::<NodeId>().is_err(), "{label}");
        }
        assert!(serde_json::from_str::<NodeId>("3").is_err());
    }
}
