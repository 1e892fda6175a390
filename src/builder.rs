//! Session - builds one graph from a sequence of `(path, text)` inputs
//!
//! Scanning is file-local and may run on worker threads; merging into the
//! [`GraphStore`] happens on the session's thread only, in input order, so
//! id issuance and relationship order never depend on scheduling.

use crate::adapter::{AdapterRegistry, FileScan};
use crate::edge::Relationship;
use crate::graph::GraphStore;
use crate::id::NodeId;
use crate::node::{Node, NodeKind};
use crate::scan::Owner;
use crate::source::{SkippedFile, SourceBatch, SourceFile};
use crate::Result;
use serde::Serialize;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Analyzed {
        module: NodeId,
        definitions: usize,
        references: usize,
    },
    /// No adapter handles the extension
    Unsupported,
    /// The file could not be scanned; a warning was recorded
    Skipped,
}

/// Per-session bookkeeping handed to collaborators with the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionReport {
    pub files_analyzed: usize,
    pub files_unsupported: usize,
    pub skipped: Vec<SkippedFile>,
}

impl SessionReport {
    /// A session with zero analyzed files is a failure for the caller to report
    pub fn is_success(&self) -> bool {
        self.files_analyzed > 0
    }
}

/// The finished product of a session.
#[derive(Debug)]
pub struct Analysis {
    pub graph: GraphStore,
    pub report: SessionReport,
}

/// One analysis run over a fixed set of input files.
pub struct Session<'r> {
    registry: &'r AdapterRegistry,
    store: GraphStore,
    report: SessionReport,
}

enum ScanOutcome {
    Scanned(FileScan),
    Unsupported,
    Failed(String),
}

impl<'r> Session<'r> {
    /// Start an empty session dispatching through `registry`
    pub fn new(registry: &'r AdapterRegistry) -> Self {
        Self {
            registry,
            store: GraphStore::new(),
            report: SessionReport::default(),
        }
    }

    /// Scan one file and merge it into the graph
    pub fn analyze_file(&mut self, path: &str, text: &str) -> FileOutcome {
        let outcome = scan_one(self.registry, path, text);
        self.apply(path, outcome)
    }

    /// Analyze files in order
    pub fn analyze_all<I, P, T>(&mut self, files: I)
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: AsRef<str>,
    {
        for (path, text) in files {
            self.analyze_file(path.as_ref(), text.as_ref());
        }
    }

    /// Analyze everything a source collector produced, carrying over its
    /// skipped files into the report
    pub fn analyze_batch(&mut self, batch: &SourceBatch, workers: usize) {
        for skipped in &batch.skipped {
            self.record_skip(&skipped.path, &skipped.reason);
        }
        if workers > 1 {
            self.analyze_parallel(&batch.files, workers);
        } else {
            self.analyze_all(batch.files.iter().map(|f| (&f.path, &f.text)));
        }
    }

    /// Scan files on `workers` threads, then merge results in input order.
    ///
    /// Produces the same graph as [`Session::analyze_all`] on the same input.
    pub fn analyze_parallel(&mut self, files: &[SourceFile], workers: usize) {
        let workers = workers.clamp(1, files.len().max(1));
        let registry = self.registry;
        let (job_tx, job_rx) = crossbeam::channel::unbounded::<(usize, &SourceFile)>();
        let (result_tx, result_rx) = crossbeam::channel::unbounded::<(usize, ScanOutcome)>();

        for job in files.iter().enumerate() {
            // receiver is alive until the scope below ends
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (idx, file) in job_rx {
                        let outcome = scan_one(registry, &file.path, &file.text);
                        if result_tx.send((idx, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut outcomes: Vec<Option<ScanOutcome>> = (0..files.len()).map(|_| None).collect();
        for (idx, outcome) in result_rx {
            outcomes[idx] = Some(outcome);
        }

        for (file, outcome) in files.iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|| ScanOutcome::Failed("scan worker exited early".to_string()));
            self.apply(&file.path, outcome);
        }
    }

    /// Record a file that never reached the scanners (unreadable, too large)
    pub fn record_skip(&mut self, path: &str, reason: &str) {
        tracing::warn!("Skipping {}: {}", path, reason);
        self.report.skipped.push(SkippedFile {
            path: path.to_string(),
            reason: reason.to_string(),
        });
    }

    /// The graph built so far
    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    /// Hand off the finished graph
    pub fn finish(self) -> Analysis {
        tracing::info!(
            "Session finished: {} analyzed, {} unsupported, {} skipped",
            self.report.files_analyzed,
            self.report.files_unsupported,
            self.report.skipped.len()
        );
        Analysis {
            graph: self.store,
            report: self.report,
        }
    }

    fn apply(&mut self, path: &str, outcome: ScanOutcome) -> FileOutcome {
        match outcome {
            ScanOutcome::Scanned(scan) => match self.merge(scan) {
                Ok(outcome) => {
                    self.report.files_analyzed += 1;
                    outcome
                }
                Err(e) => {
                    self.record_skip(path, &e.to_string());
                    FileOutcome::Skipped
                }
            },
            ScanOutcome::Unsupported => {
                self.report.files_unsupported += 1;
                FileOutcome::Unsupported
            }
            ScanOutcome::Failed(reason) => {
                self.record_skip(path, &reason);
                FileOutcome::Skipped
            }
        }
    }

    /// Turn a file-local scan into nodes and relationships
    fn merge(&mut self, scan: FileScan) -> Result<FileOutcome> {
        let FileScan { path, module_name, definitions, references } = scan;
        let module = self.store.add_node(Node::new(NodeKind::Module, module_name, path.clone(), 1));

        let mut definition_ids = Vec::with_capacity(definitions.len());
        for def in definitions {
            let mut node = Node::new(def.kind, def.name, path.clone(), def.line);
            node.attributes = def.attributes;
            let id = self.store.add_node(node);
            self.store.add_relationship(Relationship::contains(module, id))?;
            definition_ids.push(id);
        }

        let reference_count = references.len();
        for reference in references {
            let source = match reference.owner {
                Owner::Module => module,
                Owner::Definition(idx) => definition_ids.get(idx).copied().unwrap_or(module),
            };
            self.store
                .add_relationship(Relationship::references(source, reference.name))?;
        }

        Ok(FileOutcome::Analyzed {
            module,
            definitions: definition_ids.len(),
            references: reference_count,
        })
    }
}

fn scan_one(registry: &AdapterRegistry, path: &str, text: &str) -> ScanOutcome {
    match registry.scan_file(path, text) {
        Ok(Some(scan)) => ScanOutcome::Scanned(scan),
        Ok(None) => ScanOutcome::Unsupported,
        Err(e) => ScanOutcome::Failed(e.to_string()),
    }
}
