//! Graph export for downstream consumers
//!
//! Two formats: pretty JSON of the whole store, and a Mermaid `graph TD`
//! definition for documentation.

use crate::edge::Target;
use crate::graph::GraphStore;
use crate::{Error, Result};
use std::collections::HashSet;
use std::str::FromStr;

/// Output format for [`export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Mermaid,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Mermaid => "mermaid",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "mermaid" | "mmd" => Ok(ExportFormat::Mermaid),
            _ => Err(Error::InvalidKind(format!("Unknown export format: {}", s))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render the graph in the requested format
pub fn export(store: &GraphStore, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(store),
        ExportFormat::Mermaid => Ok(to_mermaid(store)),
    }
}

/// Pretty-printed JSON with `nodes` and `relationships` arrays.
///
/// Node ids are written as `N<k>` labels, the same ids [`to_mermaid`] uses.
pub fn to_json(store: &GraphStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Mermaid flowchart: one declaration per distinct endpoint, then one
/// `-->|kind|` line per relationship, both in recording order.
///
/// Resolved endpoints use their node id (`N3`); dangling targets get an
/// `ext_` id derived from the symbol name.
pub fn to_mermaid(store: &GraphStore) -> String {
    let mut declarations = Vec::new();
    let mut edges = Vec::new();
    let mut declared = HashSet::new();

    for rel in store.relationships() {
        let Some(source) = store.node(rel.source) else {
            continue;
        };
        let source_id = rel.source.to_string();
        let (target_id, target_label) = match &rel.target {
            Target::Resolved(id) => match store.node(*id) {
                Some(node) => (id.to_string(), node.name.as_str()),
                None => continue,
            },
            Target::Unresolved(name) => (format!("ext_{}", sanitize_id(name)), name.as_str()),
        };

        for (id, label) in [(&source_id, source.name.as_str()), (&target_id, target_label)] {
            if declared.insert(id.clone()) {
                declarations.push(format!("  {}[\"{}\"]", id, escape_label(label)));
            }
        }
        edges.push(format!("  {} -->|{}| {}", source_id, rel.kind, target_id));
    }

    let mut lines = Vec::with_capacity(1 + declarations.len() + edges.len());
    lines.push("graph TD".to_string());
    lines.extend(declarations);
    lines.extend(edges);
    lines.join("\n")
}

fn sanitize_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::default_registry;
    use crate::builder::Session;

    const SAMPLE: &str = "def func_a(x):\n    return x + 1\n\nclass MyClass:\n    def method_b(self, y):\n        return func_a(y)\n";

    fn sample_graph() -> GraphStore {
        let registry = default_registry().unwrap();
        let mut session = Session::new(&registry);
        session.analyze_file("sample.py", SAMPLE);
        session.finish().graph
    }

    #[test]
    fn test_mermaid_sample() {
        let mermaid = to_mermaid(&sample_graph());
        let expected = "\
graph TD
  N1[\"sample\"]
  N2[\"func_a\"]
  N3[\"MyClass\"]
  N4[\"method_b\"]
  ext_func_a[\"func_a\"]
  N1 -->|contains| N2
  N1 -->|contains| N3
  N1 -->|contains| N4
  N4 -->|references| ext_func_a";
        assert_eq!(mermaid, expected);
    }

    #[test]
    fn test_mermaid_empty_graph() {
        assert_eq!(to_mermaid(&GraphStore::new()), "graph TD");
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample_graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
        assert_eq!(value["nodes"][1]["name"], "func_a");
        assert_eq!(value["nodes"][1]["id"], "N2");
        assert_eq!(value["relationships"][0]["source"], "N1");
        assert_eq!(value["relationships"][0]["target"]["resolved"], "N2");
        assert_eq!(value["relationships"][3]["source"], "N4");
        assert_eq!(value["relationships"][3]["target"]["unresolved"], "func_a");
        assert_eq!(value["relationships"][3]["kind"], "references");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("Mermaid".parse::<ExportFormat>().unwrap(), ExportFormat::Mermaid);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("dot".parse::<ExportFormat>().is_err());
        assert_eq!(sanitize_id("a.b:c"), "a_b_c");
    }
}
