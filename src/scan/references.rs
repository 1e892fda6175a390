//! Reference Scanner
//!
//! Finds call-like uses (`name(`) on every line and attributes each one to
//! the enclosing definition. Targets stay as plain names: the defining node
//! may live in another file, may not exist at all, or the match may be a
//! false positive.

use super::containment::{Containment, Owner};
use super::definitions::Definition;
use regex::Regex;
use std::collections::HashSet;

/// An identifier immediately followed by an opening parenthesis.
pub const CALL_PATTERN: &str = r"\b([A-Za-z_][A-Za-z0-9_]*)\(";

/// A by-name reference found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Enclosing unit at the reference's line
    pub owner: Owner,
    /// Referenced symbol, as written
    pub name: String,
    /// 1-based line of the reference
    pub line: u32,
}

/// Reference scanner for one language.
pub struct ReferenceScanner<'a> {
    pattern: &'a Regex,
    reserved: &'a HashSet<String>,
}

impl<'a> ReferenceScanner<'a> {
    /// `reserved` holds tokens never treated as references (keywords,
    /// ubiquitous built-ins).
    pub fn new(pattern: &'a Regex, reserved: &'a HashSet<String>) -> Self {
        Self { pattern, reserved }
    }

    /// Scan `text` and attribute every candidate to its enclosing definition.
    ///
    /// A candidate equal to the enclosing unit's own name is dropped, so a
    /// definition line never references itself.
    pub fn scan(&self, text: &str, module_name: &str, definitions: &[Definition]) -> Vec<Reference> {
        let containment = Containment::new(definitions);
        let mut references = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx as u32 + 1;
            let mut line_owner = None;

            for caps in self.pattern.captures_iter(line) {
                let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if self.reserved.contains(name) {
                    continue;
                }

                let owner = *line_owner.get_or_insert_with(|| containment.owner_of(line_no));
                if name == containment.owner_name(owner, module_name) {
                    continue;
                }

                references.push(Reference {
                    owner,
                    name: name.to_string(),
                    line: line_no,
                });
            }
        }

        references
    }
}
