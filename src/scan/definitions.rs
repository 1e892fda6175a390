//! Definition Scanner
//!
//! Recognizes `<keyword> <name>` statements at the start of a trimmed line.

use crate::node::NodeKind;
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Maps a leading keyword (e.g. `def`, `async def`, `class`) to a node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRule {
    pub keyword: String,
    pub kind: NodeKind,
}

impl DefinitionRule {
    pub fn new(keyword: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            keyword: keyword.into(),
            kind,
        }
    }
}

/// A definition statement found in a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub kind: NodeKind,
    pub name: String,
    /// 1-based line of the statement
    pub line: u32,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

/// Compiled definition rules for one language.
#[derive(Debug, Clone)]
pub struct DefinitionScanner {
    pattern: Regex,
    kinds: HashMap<String, NodeKind>,
}

impl DefinitionScanner {
    pub fn new(rules: &[DefinitionRule]) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::Adapter("at least one definition keyword is required".to_string()));
        }

        let mut kinds = HashMap::new();
        let mut alternatives = Vec::new();
        for rule in rules {
            let words: Vec<&str> = rule.keyword.split_whitespace().collect();
            if words.is_empty() {
                return Err(Error::Adapter("definition keyword must not be blank".to_string()));
            }
            kinds.insert(words.join(" "), rule.kind);
            alternatives.push(
                words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join(r"\s+"),
            );
        }
        // Longest first so that `pub fn` wins over `pub` in the alternation
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()));

        let pattern = Regex::new(&format!(
            r"^(?P<keyword>{})\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*)",
            alternatives.join("|")
        ))?;

        Ok(Self { pattern, kinds })
    }

    /// Scan every line; definitions come back in ascending line order.
    pub fn scan(&self, text: &str) -> Vec<Definition> {
        text.lines()
            .enumerate()
            .filter_map(|(idx, line)| self.match_line(line, idx as u32 + 1))
            .collect()
    }

    /// Classify one line, `line_no` being its 1-based position.
    pub fn match_line(&self, line: &str, line_no: u32) -> Option<Definition> {
        let trimmed = line.trim_start();
        let caps = self.pattern.captures(trimmed)?;
        let keyword_match = caps.name("keyword")?;
        let name_match = caps.name("name")?;

        let keyword = keyword_match.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        let kind = *self.kinds.get(&keyword)?;

        let mut attributes = BTreeMap::new();
        attributes.insert("keyword".to_string(), serde_json::Value::from(keyword));
        attributes.insert(
            "indent".to_string(),
            serde_json::Value::from(line.len() - trimmed.len()),
        );
        let signature = trimmed[name_match.end()..]
            .trim()
            .trim_end_matches([':', '{'])
            .trim_end();
        if !signature.is_empty() {
            attributes.insert("signature".to_string(), serde_json::Value::from(signature));
        }

        Some(Definition {
            kind,
            name: name_match.as_str().to_string(),
            line: line_no,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python_rules() -> Vec<DefinitionRule> {
        vec![
            DefinitionRule::new("def", NodeKind::Function),
            DefinitionRule::new("async def", NodeKind::Function),
            DefinitionRule::new("class", NodeKind::Type),
        ]
    }

    #[test]
    fn test_scan_sample_file() {
        let scanner = DefinitionScanner::new(&python_rules()).unwrap();
        let text = "def func_a(x):\n    return x + 1\n\nclass MyClass:\n    def method_b(self, y):\n        return func_a(y)\n";

        let defs = scanner.scan(text);
        let summary: Vec<_> = defs.iter().map(|d| (d.kind, d.name.as_str(), d.line)).collect();
        assert_eq!(
            summary,
            vec![
                (NodeKind::Function, "func_a", 1),
                (NodeKind::Type, "MyClass", 4),
                (NodeKind::Function, "method_b", 5),
            ]
        );
    }

    #[test]
    fn test_multi_word_keyword() {
        let scanner = DefinitionScanner::new(&python_rules()).unwrap();
        let def = scanner.match_line("    async  def fetch(url):", 7).unwrap();

        assert_eq!(def.name, "fetch");
        assert_eq!(def.kind, NodeKind::Function);
        assert_eq!(def.attributes["keyword"], "async def");
        assert_eq!(def.attributes["indent"], 4);
        assert_eq!(def.attributes["signature"], "(url)");
    }

    #[test]
    fn test_non_definitions_are_ignored() {
        let scanner = DefinitionScanner::new(&python_rules()).unwrap();

        assert!(scanner.match_line("define_x = 1", 1).is_none());
        assert!(scanner.match_line("classify(item)", 1).is_none());
        assert!(scanner.match_line("# def commented_out():", 1).is_none());
        assert!(scanner.match_line("def 9lives():", 1).is_none());
        assert!(scanner.match_line("", 1).is_none());
    }

    #[test]
    fn test_bare_class_has_no_signature() {
        let scanner = DefinitionScanner::new(&python_rules()).unwrap();
        let def = scanner.match_line("class MyClass:", 4).unwrap();

        assert!(!def.attributes.contains_key("signature"));
        let derived = scanner.match_line("class Child(Base):", 9).unwrap();
        assert_eq!(derived.attributes["signature"], "(Base)");
    }

    #[test]
    fn test_longer_keyword_wins() {
        let rules = vec![
            DefinitionRule::new("pub", NodeKind::Module),
            DefinitionRule::new("pub fn", NodeKind::Function),
        ];
        let scanner = DefinitionScanner::new(&rules).unwrap();

        assert_eq!(scanner.match_line("pub fn run() {", 1).unwrap().kind, NodeKind::Function);
    }

    #[test]
    fn test_rejects_empty_rules() {
        assert!(DefinitionScanner::new(&[]).is_err());
        assert!(DefinitionScanner::new(&[DefinitionRule::new("  ", NodeKind::Type)]).is_err());
    }
}
