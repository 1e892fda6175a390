use crate::RefsFormat;
use ccgraph::adapter::AdapterRegistry;
use ccgraph::config::{load_config, registry_from_config, write_config, CcgraphConfig};
use ccgraph::export::{export, ExportFormat};
use ccgraph::ignore::IgnoreFilter;
use ccgraph::linker::Linker;
use ccgraph::query::CaseSensitivity;
use ccgraph::source::collect_sources;
use ccgraph::ui::{self, Icons, Spinner};
use ccgraph::{Analysis, QueryEngine, Session};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Config file values with defaults applied, plus the adapter registry they imply
pub struct Settings {
    config: CcgraphConfig,
    registry: AdapterRegistry,
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_config(config_path)?.unwrap_or_default();
        let registry = registry_from_config(&config)?;
        tracing::debug!("Adapters: {:?}", registry);
        Ok(Self { config, registry })
    }

    fn root(&self, path: Option<PathBuf>) -> PathBuf {
        path.or_else(|| self.config.path.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Collect sources under `root` and run one session over them
    fn analyze(&self, root: &Path, workers: usize) -> anyhow::Result<Analysis> {
        if !root.is_dir() {
            anyhow::bail!("{} is not a directory", root.display());
        }

        let filter = IgnoreFilter::new(root, Some(&self.config.exclude));
        let batch = collect_sources(root, &filter, self.config.max_file_bytes);
        tracing::info!(
            "Collected {} files under {} ({} skipped)",
            batch.files.len(),
            root.display(),
            batch.skipped.len()
        );

        let mut session = Session::new(&self.registry);
        session.analyze_batch(&batch, workers.max(1));
        let analysis = session.finish();

        if !analysis.report.is_success() {
            anyhow::bail!(
                "no supported source files analyzed under {} ({} unsupported, {} skipped)",
                root.display(),
                analysis.report.files_unsupported,
                analysis.report.skipped.len()
            );
        }
        Ok(analysis)
    }
}

pub fn run_analyze(settings: &Settings, path: Option<PathBuf>, workers: Option<usize>) -> anyhow::Result<()> {
    let root = settings.root(path);
    let workers = workers.unwrap_or(settings.config.workers);
    let start = Instant::now();

    ui::header(&format!("Analyzing {}", root.display()));
    ui::info("Workers", &workers.to_string());

    let spinner = Spinner::new("Scanning files");
    let analysis = settings.analyze(&root, workers);
    spinner.finish_and_clear();
    let Analysis { graph, report } = analysis?;

    let links = Linker::new(&graph).link();
    let stats = graph.stats();

    ui::section(&format!("{} Graph", Icons::STATS));
    println!("{}", ui::stats_table(&stats, &links.stats));

    if !report.skipped.is_empty() {
        ui::section(&format!("{} Skipped files", Icons::WARN));
        for skipped in &report.skipped {
            ui::warn(&format!("{}: {}", skipped.path, skipped.reason));
        }
    }
    if report.files_unsupported > 0 {
        ui::summary_row("Unsupported files:", &report.files_unsupported.to_string());
    }

    ui::finish_with_summary(start.elapsed(), report.files_analyzed, stats.nodes(), stats.relationships());
    Ok(())
}

pub fn run_refs(
    settings: &Settings,
    path: Option<PathBuf>,
    symbol: &str,
    case_sensitive: bool,
    format: RefsFormat,
) -> anyhow::Result<()> {
    let root = settings.root(path);
    let analysis = settings.analyze(&root, settings.config.workers)?;

    let case = if case_sensitive {
        CaseSensitivity::Sensitive
    } else {
        CaseSensitivity::Insensitive
    };
    let matches = QueryEngine::new(&analysis.graph).who_references_with(symbol, case);

    match format {
        RefsFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
        RefsFormat::Text => {
            ui::header(&format!("{} References to '{}'", Icons::SEARCH, symbol));
            if matches.is_empty() {
                println!("No references found.");
            }
            for m in &matches {
                ui::reference_row(&m.source, &m.symbol, m.kind.as_str());
            }
        }
    }
    Ok(())
}

pub fn run_export(
    settings: &Settings,
    path: Option<PathBuf>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let root = settings.root(path);
    let analysis = settings.analyze(&root, settings.config.workers)?;
    let rendered = export(&analysis.graph, format)?;

    match output {
        Some(file) => {
            std::fs::write(&file, rendered + "\n")?;
            ui::success(&format!("Wrote {} graph to {}", format, file.display()));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub fn run_init(target: &Path, force: bool) -> anyhow::Result<()> {
    write_config(target, &CcgraphConfig::default(), force)?;
    ui::success(&format!("Created {}", target.display()));
    Ok(())
}
