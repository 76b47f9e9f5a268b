use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Snapshot of one collected file: where it was found and what it contained.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    /// File name component, lossily converted. Used for section headers.
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Recursively collect every regular file under `root` whose extension is in
/// `extensions` (compared without the leading dot).
///
/// A traversal error or an unreadable file fails the whole collection; callers
/// that want per-file fallback handle it at their own level.
pub async fn collect_files(root: &Path, extensions: &[&str]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to traverse directory {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.contains(&e))
            .unwrap_or(false);

        if !matches {
            continue;
        }

        let content = fs::read_to_string(entry.path())
            .await
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;

        files.push(SourceFile {
            path: entry.into_path(),
            content,
        });
    }

    debug!("Collected {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Find every directory named `examples` under `base`, in traversal order.
///
/// Each hit holds code listings for the package whose directory contains it.
/// A `base` that does not exist simply yields no hits; a repository without a
/// package tree contributes no example sections.
pub fn find_example_dirs(base: &Path) -> Vec<PathBuf> {
    WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == "examples")
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn collects_only_matching_extensions_at_any_depth() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("top.md"), "top").unwrap();
        fs::write(dir.path().join("a/nested.mdx"), "nested").unwrap();
        fs::write(dir.path().join("a/b/deep.md"), "deep").unwrap();
        fs::write(dir.path().join("a/skip.txt"), "skip").unwrap();
        fs::write(dir.path().join("noext"), "noext").unwrap();

        let files = collect_files(dir.path(), &["md", "mdx"]).await.unwrap();
        let mut names: Vec<String> = files.iter().map(|f| f.base_name()).collect();
        names.sort();

        assert_eq!(names, vec!["deep.md", "nested.mdx", "top.md"]);
    }

    #[tokio::test]
    async fn missing_root_fails_collection() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = collect_files(&missing, &["md"]).await;
        assert!(result.is_err());
    }

    #[test]
    fn finds_example_dirs_by_name() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("foo/examples")).unwrap();
        fs::create_dir_all(dir.path().join("bar/src")).unwrap();
        fs::create_dir_all(dir.path().join("baz/examples/inner")).unwrap();

        let mut found = find_example_dirs(dir.path());
        found.sort();

        assert_eq!(
            found,
            vec![
                dir.path().join("baz/examples"),
                dir.path().join("foo/examples"),
            ]
        );
    }

    #[test]
    fn missing_base_yields_no_example_dirs() {
        let dir = tempdir().unwrap();
        assert!(find_example_dirs(&dir.path().join("packages")).is_empty());
    }
}
