use ::ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Gitignore-style path filter used while collecting sources.
pub struct IgnoreFilter {
    inner: Gitignore,
}

impl IgnoreFilter {
    pub fn new(root: &Path, extra_excludes: Option<&[String]>) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        // 1. Load from .gitignore and .ignore
        builder.add(root.join(".gitignore"));
        builder.add(root.join(".ignore"));

        // 2. Add defaults (global)
        let defaults = [
            // Noise directories
            "target/", "node_modules/", "venv/", ".venv/", "vendor/",
            "dist/", "build/", "__pycache__/", "*.egg-info/",
            ".git/", ".ccgraph/", ".vscode/", ".idea/", ".mypy_cache/", ".tox/",

            // Compiled and binary artifacts
            "*.pyc", "*.pyo", "*.pyd", "*.so", "*.dll", "*.dylib", "*.o", "*.a",
            "*.png", "*.jpg", "*.jpeg", "*.gif", "*.ico", "*.pdf",
            "*.zip", "*.tar", "*.gz", "*.7z", "*.whl",
        ];

        for pattern in defaults {
            // static patterns, always valid
            builder.add_line(None, pattern).ok();
        }

        // 3. Add user config excludes
        if let Some(excludes) = extra_excludes {
            for pattern in excludes {
                if let Err(e) = builder.add_line(None, pattern) {
                    tracing::warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                }
            }
        }

        Self {
            inner: builder.build().unwrap_or_else(|_| Gitignore::empty()),
        }
    }

    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.inner.matched(path, is_dir).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_excludes() {
        let root = Path::new("/repo");
        let excludes = vec!["legacy/".to_string(), "*.gen.py".to_string()];
        let filter = IgnoreFilter::new(root, Some(&excludes));

        assert!(filter.is_ignored(&root.join("__pycache__"), true));
        assert!(filter.is_ignored(&root.join("mod.pyc"), false));
        assert!(filter.is_ignored(&root.join("legacy"), true));
        assert!(filter.is_ignored(&root.join("schema.gen.py"), false));
        assert!(!filter.is_ignored(&root.join("src/app.py"), false));
    }
}
