//! Scanner adapters
//!
//! Each language provides a set of definition keywords and a stop list of
//! reserved tokens. The session never sees language-specific logic: it asks
//! the registry for the adapter matching a file's extension and merges the
//! file-local [`FileScan`] it returns.

pub mod framework;
pub mod pattern;

pub use framework::{default_registry, AdapterRegistry, FileScan, LanguageAdapter};
pub use pattern::{LanguageSpec, PatternAdapter};
