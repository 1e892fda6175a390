//! Optional resolution pass
//!
//! Builds on a finished graph: dangling `references` targets are matched
//! against node names, preferring the referencing file on ties.

pub mod global_linker;

pub use global_linker::{Link, LinkReport, LinkStats, Linker, Resolution};
