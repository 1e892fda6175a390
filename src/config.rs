use crate::adapter::{default_registry, AdapterRegistry, LanguageSpec, PatternAdapter};
use crate::source::DEFAULT_MAX_FILE_BYTES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcgraphConfig {
    /// Directory analyzed when `--path` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Extra gitignore-style patterns
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Additional pattern-driven languages, registered after Python
    #[serde(default)]
    pub languages: Vec<LanguageSpec>,
}

impl Default for CcgraphConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_file_bytes: default_max_file_bytes(),
            exclude: Vec::new(),
            workers: default_workers(),
            languages: Vec::new(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_workers() -> usize {
    1
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("ccgraph.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<CcgraphConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: CcgraphConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    if config.workers == 0 {
        anyhow::bail!("invalid config {}: workers must be at least 1", path.display());
    }
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &CcgraphConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Built-in adapters plus every `[[languages]]` entry
pub fn registry_from_config(config: &CcgraphConfig) -> crate::Result<AdapterRegistry> {
    let mut registry = default_registry()?;
    for spec in &config.languages {
        let adapter = PatternAdapter::new(spec).map_err(|e| {
            crate::Error::Config(format!("language {}: {}", spec.name, e))
        })?;
        registry.register(adapter);
    }
    Ok(registry)
}
