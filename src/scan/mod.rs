//! Line scanners - the file-local half of graph building
//!
//! A file is scanned twice: once for definition statements, once for
//! call-like references. Neither pass touches the graph store; they produce
//! plain records that a [`crate::builder::Session`] later turns into nodes
//! and relationships.
//!
//! Containment is positional: a line belongs to the last definition that
//! started at or before it. There is no notion of a block end, so trailing
//! lines after a body stay with that definition until the next one starts.

pub mod containment;
pub mod definitions;
pub mod references;

pub use containment::{Containment, Owner};
pub use definitions::{Definition, DefinitionRule, DefinitionScanner};
pub use references::{Reference, ReferenceScanner, CALL_PATTERN};
