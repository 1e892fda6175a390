//! Pattern-driven Language Adapter
//!
//! A declarative way to add language support: instead of writing Rust for
//! each language, describe its definition keywords and reserved tokens in a
//! [`LanguageSpec`]. Built-in specs live here; more can come from the config
//! file's `[[languages]]` tables.

use super::framework::{FileScan, LanguageAdapter};
use crate::Result;
use crate::node::{module_name, NodeKind};
use crate::scan::{DefinitionRule, DefinitionScanner, ReferenceScanner, CALL_PATTERN};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally", "for",
    "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or",
    "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Identifiers so common in Python bodies that they only add noise.
const PYTHON_UBIQUITOUS: &[&str] = &[
    "self", "cls", "super", "print", "len", "range", "isinstance", "__init__",
];

/// Declarative description of one language's definition-statement convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSpec {
    pub name: String,
    pub extensions: Vec<String>,
    pub definitions: Vec<DefinitionRule>,
    #[serde(default)]
    pub reserved: Vec<String>,
}

impl LanguageSpec {
    pub fn python() -> Self {
        Self {
            name: "Python".to_string(),
            extensions: vec!["py".to_string(), "pyi".to_string()],
            definitions: vec![
                DefinitionRule::new("def", NodeKind::Function),
                DefinitionRule::new("async def", NodeKind::Function),
                DefinitionRule::new("class", NodeKind::Type),
            ],
            reserved: PYTHON_KEYWORDS
                .iter()
                .chain(PYTHON_UBIQUITOUS)
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A language adapter driven by a [`LanguageSpec`]
pub struct PatternAdapter {
    language_name: String,
    extensions: Vec<String>,
    definitions: DefinitionScanner,
    calls: Regex,
    reserved: HashSet<String>,
}

impl PatternAdapter {
    /// Compile a spec into an adapter
    pub fn new(spec: &LanguageSpec) -> Result<Self> {
        Ok(Self {
            language_name: spec.name.clone(),
            extensions: spec
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            definitions: DefinitionScanner::new(&spec.definitions)?,
            calls: Regex::new(CALL_PATTERN)?,
            reserved: spec.reserved.iter().cloned().collect(),
        })
    }

    /// Built-in Python adapter
    pub fn python() -> Result<Self> {
        Self::new(&LanguageSpec::python())
    }
}

impl LanguageAdapter for PatternAdapter {
    fn language_name(&self) -> &str {
        &self.language_name
    }

    fn file_extensions(&self) -> &[String] {
        &self.extensions
    }

    fn scan_file(&self, path: &str, content: &str) -> Result<FileScan> {
        let content = strip_bom(content);
        let mut scan = FileScan::new(path, module_name(path));
        scan.definitions = self.definitions.scan(content);
        scan.references = ReferenceScanner::new(&self.calls, &self.reserved).scan(
            content,
            &scan.module_name,
            &scan.definitions,
        );

        tracing::debug!(
            "Scanned {} ({}): {} definitions, {} references",
            path,
            self.language_name,
            scan.definitions.len(),
            scan.references.len()
        );
        Ok(scan)
    }
}

/// Editors on Windows often prefix UTF-8 files with U+FEFF
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Owner;
    use std::path::Path;

    #[test]
    fn test_python_adapter_extensions() {
        let adapter = PatternAdapter::python().unwrap();

        assert_eq!(adapter.language_name(), "Python");
        assert!(adapter.can_handle(Path::new("pkg/mod.py")));
        assert!(adapter.can_handle(Path::new("stubs/mod.pyi")));
        assert!(!adapter.can_handle(Path::new("main.rs")));
    }

    #[test]
    fn test_python_scan() {
        let adapter = PatternAdapter::python().unwrap();
        let source = "\
class Service:
    def __init__(self):
        super().__init__()
        self.client = connect()

    async def fetch(self, key):
        return await self.client.get(key)
";
        let scan = adapter.scan_file("app/service.py", source).unwrap();

        assert_eq!(scan.module_name, "service");
        let names: Vec<_> = scan.definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Service", "__init__", "fetch"]);

        let refs: Vec<_> = scan.references.iter().map(|r| (r.owner, r.name.as_str())).collect();
        assert_eq!(refs, vec![(Owner::Definition(1), "connect"), (Owner::Definition(2), "get")]);
    }

    #[test]
    fn test_spec_from_toml() {
        let spec: LanguageSpec = toml::from_str(
            r#"
            name = "Ruby"
            extensions = [".rb"]
            definitions = [
                { keyword = "def", kind = "function" },
                { keyword = "class", kind = "type" },
                { keyword = "module", kind = "module" },
            ]
            reserved = ["puts", "require"]
            "#,
        )
        .unwrap();
        let adapter = PatternAdapter::new(&spec).unwrap();
        assert!(adapter.can_handle(Path::new("lib/app.rb")));

        let scan = adapter
            .scan_file("lib/app.rb", "module Billing\n  def charge(amount)\n    puts(round(amount))\n  end\nend\n")
            .unwrap();
        assert_eq!(scan.definitions[0].kind, NodeKind::Module);
        assert_eq!(scan.references.len(), 1);
        assert_eq!(scan.references[0].name, "round");
    }
}
