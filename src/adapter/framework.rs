//! Core adapter framework
//!
//! Defines the trait every scanner adapter implements and the registry that
//! dispatches files to adapters by extension.

use crate::Result;
use crate::scan::{Definition, Reference};
use std::path::Path;

/// Result of scanning one file.
///
/// Everything here is file-local: definitions are addressed by their index
/// and no node ids exist yet, so a scan can run on any thread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileScan {
    /// File path as handed to the adapter
    pub path: String,
    /// Name of the file's module node
    pub module_name: String,
    /// Definitions in ascending line order
    pub definitions: Vec<Definition>,
    /// References in line order
    pub references: Vec<Reference>,
}

impl FileScan {
    pub fn new(path: impl Into<String>, module_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            module_name: module_name.into(),
            ..Self::default()
        }
    }
}

/// Trait for scanner adapters
///
/// Each adapter is responsible for:
/// 1. Identifying files it can scan
/// 2. Extracting definitions in file order
/// 3. Attributing call-like references to enclosing definitions
pub trait LanguageAdapter: Send + Sync {
    /// Get the language name (for display)
    fn language_name(&self) -> &str;

    /// Get file extensions this adapter handles
    fn file_extensions(&self) -> &[String];

    /// Check if this adapter can handle a file
    fn can_handle(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            self.file_extensions().iter().any(|known| known.eq_ignore_ascii_case(ext))
        } else {
            false
        }
    }

    /// Scan a file's text
    fn scan_file(&self, path: &str, content: &str) -> Result<FileScan>;
}

/// Registry of scanner adapters, consulted in registration order.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    pub fn register(&mut self, adapter: impl LanguageAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    /// Find an adapter for a file
    pub fn find_adapter(&self, path: &Path) -> Option<&dyn LanguageAdapter> {
        self.adapters
            .iter()
            .find(|a| a.can_handle(path))
            .map(|a| a.as_ref())
    }

    /// Get all registered adapters
    pub fn adapters(&self) -> &[Box<dyn LanguageAdapter>] {
        &self.adapters
    }

    /// Scan a file using the matching adapter; `None` when no adapter
    /// handles its extension
    pub fn scan_file(&self, path: &str, content: &str) -> Result<Option<FileScan>> {
        match self.find_adapter(Path::new(path)) {
            Some(adapter) => adapter.scan_file(path, content).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.adapters.iter().map(|a| a.language_name()))
            .finish()
    }
}

/// Create a default registry with all built-in adapters
pub fn default_registry() -> Result<AdapterRegistry> {
    let mut registry = AdapterRegistry::new();
    registry.register(super::pattern::PatternAdapter::python()?);
    Ok(registry)
}
