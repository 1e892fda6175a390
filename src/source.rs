//! Source collection - turns a directory into `(path, text)` inputs
//!
//! Reading and decoding belong here, outside the scanners: a file that is
//! unreadable, not UTF-8, or over the size cap is reported as skipped and
//! never reaches a session's scanners.

use crate::ignore::IgnoreFilter;
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// Default input-size cap per file (1 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// A decoded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the collection root, `/`-separated
    pub path: String,
    pub text: String,
}

/// A file left out of analysis, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Everything found under one root, in path order.
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Walk `root`, honoring `filter`, and read every remaining regular file.
pub fn collect_sources(root: &Path, filter: &IgnoreFilter, max_file_bytes: u64) -> SourceBatch {
    let mut batch = SourceBatch::default();

    let walker = walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !filter.is_ignored(entry.path(), entry.file_type().is_dir())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| relative_path(root, p))
                    .unwrap_or_else(|| root.display().to_string());
                batch.skipped.push(SkippedFile { path, reason: e.to_string() });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = relative_path(root, entry.path());
        match read_source(entry.path(), max_file_bytes) {
            Ok(text) => batch.files.push(SourceFile { path, text }),
            Err(e) => {
                tracing::debug!("Skipping unreadable file {}: {}", path, e);
                batch.skipped.push(SkippedFile { path, reason: e.to_string() });
            }
        }
    }

    batch
}

/// Read one file as UTF-8 text, without a leading byte order mark
pub fn read_source(path: &Path, max_file_bytes: u64) -> Result<String> {
    let size = std::fs::metadata(path)?.len();
    if size > max_file_bytes {
        return Err(Error::FileTooLarge { size, limit: max_file_bytes });
    }
    let mut text = std::fs::read_to_string(path)?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_collects_sorted_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "pkg/b.py", b"def b():\n    pass\n");
        write(dir.path(), "pkg/a.py", b"def a():\n    pass\n");
        write(dir.path(), "main.py", b"a()\n");

        let batch = collect_sources(dir.path(), &IgnoreFilter::new(dir.path(), None), DEFAULT_MAX_FILE_BYTES);
        let paths: Vec<_> = batch.files.iter().map(|f| f.path.as_str()).collect();

        assert_eq!(paths, vec!["main.py", "pkg/a.py", "pkg/b.py"]);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_skips_binary_and_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "blob.py", &[0xff, 0xfe, 0x00, 0x80]);
        write(dir.path(), "huge.py", &vec![b'#'; 64]);
        write(dir.path(), "ok.py", b"x = 1\n");

        let batch = collect_sources(dir.path(), &IgnoreFilter::new(dir.path(), None), 32);

        assert_eq!(batch.files.len(), 1);
        assert_eq!(batch.files[0].path, "ok.py");
        let skipped: Vec<_> = batch.skipped.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(skipped, vec!["blob.py", "huge.py"]);
        assert!(batch.skipped[1].reason.contains("limit"));
    }

    #[test]
    fn test_read_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "big.py", &vec![b'#'; 64]);
        write(dir.path(), "blob.py", &[0xff, 0xfe, 0x00, 0x80]);

        let err = read_source(&dir.path().join("big.py"), 32).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { size: 64, limit: 32 }));
        let err = read_source(&dir.path().join("blob.py"), DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        let err = read_source(&dir.path().join("missing.py"), DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bom.py", "\u{feff}def func_a(x):\n    return x\n".as_bytes());

        let batch = collect_sources(dir.path(), &IgnoreFilter::new(dir.path(), None), DEFAULT_MAX_FILE_BYTES);
        assert_eq!(batch.files[0].text, "def func_a(x):\n    return x\n");
    }

    #[test]
    fn test_respects_ignore_rules() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/app.py", b"def app():\n    pass\n");
        write(dir.path(), "venv/lib/site.py", b"def site():\n    pass\n");
        write(dir.path(), "generated/out.py", b"def out():\n    pass\n");

        let excludes = vec!["generated/".to_string()];
        let filter = IgnoreFilter::new(dir.path(), Some(&excludes));
        let batch = collect_sources(dir.path(), &filter, DEFAULT_MAX_FILE_BYTES);

        let paths: Vec<_> = batch.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/app.py"]);
    }
}
