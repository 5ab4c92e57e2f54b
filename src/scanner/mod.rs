//! File scanner for discovering score reports.
//!
//! This module walks the scan root and returns every file whose name
//! carries the score suffix, together with the task it belongs to.

use crate::models::ScoreFile;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Configuration for file scanning.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File name suffix marking a score report (e.g. "-scores.csv")
    pub suffix: String,
    /// Match and descend into dot-prefixed entries
    pub include_hidden: bool,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Sort entries by name within each directory
    pub sort_paths: bool,
    /// Maximum depth below the root
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&crate::config::ScannerConfig::default())
    }
}

impl From<&crate::config::ScannerConfig> for ScanConfig {
    fn from(config: &crate::config::ScannerConfig) -> Self {
        Self {
            suffix: config.suffix.clone(),
            include_hidden: config.include_hidden,
            follow_links: config.follow_links,
            sort_paths: config.sort_paths,
            max_depth: config.max_depth,
        }
    }
}

/// File scanner for discovering score files.
pub struct FileScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl FileScanner {
    /// Create a new file scanner.
    pub fn new(root: PathBuf, config: ScanConfig) -> Self {
        Self { config, root }
    }

    /// Discover all score files under the root.
    ///
    /// Within a directory, matching files are listed before any
    /// subdirectory is entered; otherwise entries keep directory-listing
    /// order unless `sort_paths` is set.
    pub fn discover(&self) -> Result<Vec<ScoreFile>> {
        let sort_paths = self.config.sort_paths;
        let include_hidden = self.config.include_hidden;

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_links)
            .sort_by(move |a, b| compare_entries(a, b, sort_paths));
        if let Some(depth) = self.config.max_depth {
            // Files at depth N live in directories at depth N - 1
            walker = walker.max_depth(depth + 1);
        }

        let mut files = Vec::new();
        for entry in walker
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry
                .with_context(|| format!("Failed to scan {}", self.root.display()))?;

            if entry.depth() == 0 || !self.matches(&entry) {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            let task = task_identifier(&relative_path);
            debug!("Found score file {} (task {:?})", entry.path().display(), task);

            files.push(ScoreFile {
                path: entry.path().to_path_buf(),
                relative_path,
                task,
            });
        }

        debug!("Discovered {} score files under {}", files.len(), self.root.display());
        Ok(files)
    }

    /// Check if an entry is a score file.
    fn matches(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            return false;
        }

        let name_matches = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(&self.config.suffix))
            .unwrap_or(false);

        // Symlinks count when they resolve to a regular file
        name_matches && entry.path().is_file()
    }
}

/// Files before directories, then optionally by name.
fn compare_entries(a: &DirEntry, b: &DirEntry, sort_paths: bool) -> Ordering {
    let by_kind = a.file_type().is_dir().cmp(&b.file_type().is_dir());
    if sort_paths {
        by_kind.then_with(|| a.file_name().cmp(b.file_name()))
    } else {
        by_kind
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Derive the task label of a root-relative score file path.
///
/// The directory segments between the root and the file name are joined
/// with `/`; a file directly under the root has an empty label.
pub fn task_identifier(relative_path: &Path) -> String {
    let Some(parent) = relative_path.parent() else {
        return String::new();
    };

    parent
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "score,max\n1,1\n").unwrap();
    }

    fn discover(root: &Path, config: ScanConfig) -> Vec<ScoreFile> {
        FileScanner::new(root.to_path_buf(), config).discover().unwrap()
    }

    fn tasks(files: &[ScoreFile]) -> Vec<&str> {
        files.iter().map(|f| f.task.as_str()).collect()
    }

    #[test]
    fn test_task_identifier_nested() {
        assert_eq!(
            task_identifier(Path::new("algebra/week1/hw-scores.csv")),
            "algebra/week1"
        );
    }

    #[test]
    fn test_task_identifier_at_root() {
        assert_eq!(task_identifier(Path::new("hw-scores.csv")), "");
    }

    #[test]
    fn test_task_identifier_ignores_current_dir_prefix() {
        assert_eq!(task_identifier(Path::new("./a/x-scores.csv")), "a");
    }

    #[test]
    fn test_discover_matches_suffix_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top-scores.csv");
        touch(dir.path(), "a/x-scores.csv");
        touch(dir.path(), "a/b/c/deep-scores.csv");
        touch(dir.path(), "a/notes.csv");
        touch(dir.path(), "a/scores.csv");
        touch(dir.path(), "a/x-scores.csv.bak");

        let mut found = tasks(&discover(dir.path(), ScanConfig::default()))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        found.sort();

        assert_eq!(found, vec!["", "a", "a/b/c"]);
    }

    #[test]
    fn test_discover_bare_suffix_matches() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "t/-scores.csv");

        let files = discover(dir.path(), ScanConfig::default());
        assert_eq!(tasks(&files), vec!["t"]);
    }

    #[test]
    fn test_discover_skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".git/x-scores.csv");
        touch(dir.path(), "a/.old-scores.csv");
        touch(dir.path(), "a/y-scores.csv");

        let files = discover(dir.path(), ScanConfig::default());
        assert_eq!(tasks(&files), vec!["a"]);

        let config = ScanConfig {
            include_hidden: true,
            sort_paths: true,
            ..ScanConfig::default()
        };
        let files = discover(dir.path(), config);
        assert_eq!(tasks(&files), vec![".git", "a", "a"]);
    }

    #[test]
    fn test_discover_ignores_matching_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("dir-scores.csv")).unwrap();

        assert!(discover(dir.path(), ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_discover_empty_tree() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path(), ScanConfig::default()).is_empty());
    }

    #[test]
    fn test_discover_lists_files_before_subdirectories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/sub/inner-scores.csv");
        touch(dir.path(), "a/outer-scores.csv");
        touch(dir.path(), "root-scores.csv");

        let files = discover(dir.path(), ScanConfig::default());
        assert_eq!(tasks(&files), vec!["", "a", "a/sub"]);
    }

    #[test]
    fn test_discover_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            touch(dir.path(), &format!("{}/hw-scores.csv", name));
        }

        let config = ScanConfig {
            sort_paths: true,
            ..ScanConfig::default()
        };
        let files = discover(dir.path(), config);
        assert_eq!(tasks(&files), vec!["a", "b", "c"]);
        assert_eq!(files[0].relative_path, PathBuf::from("a/hw-scores.csv"));
        assert_eq!(files[0].path, dir.path().join("a/hw-scores.csv"));
    }

    #[test]
    fn test_discover_max_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/x-scores.csv");
        touch(dir.path(), "a/b/y-scores.csv");

        let config = ScanConfig {
            max_depth: Some(1),
            ..ScanConfig::default()
        };
        let files = discover(dir.path(), config);
        assert_eq!(tasks(&files), vec!["a"]);
    }

    #[test]
    fn test_discover_custom_suffix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/x-scores.csv");
        touch(dir.path(), "b/y-grades.csv");

        let config = ScanConfig {
            suffix: "-grades.csv".to_string(),
            ..ScanConfig::default()
        };
        let files = discover(dir.path(), config);
        assert_eq!(tasks(&files), vec!["b"]);
    }
}
