use crate::graph::GraphStats;
use crate::linker::LinkStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: impl ToString) -> &mut Self {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

/// Metric/value table for the `analyze` summary
pub fn stats_table(stats: &GraphStats, links: &LinkStats) -> String {
    let mut builder = TableBuilder::new();
    builder
        .add_row("Modules", stats.modules)
        .add_row("Functions", stats.functions)
        .add_row("Types", stats.types)
        .add_row("Contains", stats.contains)
        .add_row("References", stats.references)
        .add_row("Resolved by name", links.resolved)
        .add_row("Ambiguous", links.ambiguous)
        .add_row("External", links.external);
    builder.build()
}
