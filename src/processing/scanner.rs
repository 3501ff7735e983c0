//! Directory scanning and backend/frontend classification.
//!
//! Walks a source tree, applies the file filter, and sorts surviving
//! files into backend and frontend roles by extension, with a
//! path-keyword fallback for anything unrecognized.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::processing::filter::{FileFilter, FilterConfig};
use crate::processing::reader::count_source_lines;

/// Role of a source file in the assembled document.
///
/// Backend files are emitted before frontend files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Backend,
    Frontend,
}

/// Scanned files grouped by role, each group in walk order.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub backend: Vec<PathBuf>,
    pub frontend: Vec<PathBuf>,
}

impl SourceSet {
    /// Total number of files across both roles.
    pub fn len(&self) -> usize {
        self.backend.len() + self.frontend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty() && self.frontend.is_empty()
    }

    /// True when the path is present in either role group.
    pub fn contains(&self, path: &Path) -> bool {
        self.backend.iter().any(|p| p == path) || self.frontend.iter().any(|p| p == path)
    }
}

fn default_backend_identifiers() -> HashSet<String> {
    [".py", ".java", ".c", ".cpp", ".cs", ".go", ".rb", ".php"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_frontend_identifiers() -> HashSet<String> {
    [
        ".js", ".ts", ".jsx", ".tsx", ".html", ".css", ".vue", ".scss", ".less",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Directory scanner combining filtering and role classification.
pub struct FileScanner {
    filter: FileFilter,
    backend_identifiers: HashSet<String>,
    frontend_identifiers: HashSet<String>,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new(
            FilterConfig::default(),
            default_backend_identifiers(),
            default_frontend_identifiers(),
        )
    }
}

impl FileScanner {
    pub fn new(
        filter_config: FilterConfig,
        backend_identifiers: HashSet<String>,
        frontend_identifiers: HashSet<String>,
    ) -> Self {
        Self {
            filter: FileFilter::new(filter_config),
            backend_identifiers,
            frontend_identifiers,
        }
    }

    /// Walk `root` recursively and return accepted files grouped by role.
    ///
    /// Unreadable entries are skipped silently; the walk itself never
    /// fails.
    pub fn scan(&self, root: &Path) -> SourceSet {
        let mut set = SourceSet::default();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let size = entry.metadata().map(|m| m.len() as usize).unwrap_or(0);

            let rel = path.strip_prefix(root).unwrap_or(path);
            if let Err(reason) = self
                .filter
                .should_include(&rel.to_string_lossy(), size)
            {
                debug!(path = %path.display(), %reason, "skipping file");
                continue;
            }

            match self.classify_role(path) {
                FileRole::Backend => set.backend.push(path.to_path_buf()),
                FileRole::Frontend => set.frontend.push(path.to_path_buf()),
            }
        }

        set
    }

    /// Classify a file as backend or frontend.
    ///
    /// Extension sets win; otherwise path keywords decide; unknown files
    /// default to backend.
    pub fn classify_role(&self, path: &Path) -> FileRole {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        if self.backend_identifiers.contains(&ext) {
            return FileRole::Backend;
        }
        if self.frontend_identifiers.contains(&ext) {
            return FileRole::Frontend;
        }

        let path_lower = path.to_string_lossy().to_lowercase();
        if ["backend", "server", "api"]
            .iter()
            .any(|k| path_lower.contains(k))
        {
            FileRole::Backend
        } else if ["frontend", "client", "ui", "web"]
            .iter()
            .any(|k| path_lower.contains(k))
        {
            FileRole::Frontend
        } else {
            FileRole::Backend
        }
    }

    /// Per-file info for reporting: path and non-blank line count.
    pub fn file_info(&self, files: &[PathBuf]) -> Vec<(PathBuf, usize)> {
        files
            .iter()
            .map(|p| (p.clone(), count_source_lines(p)))
            .collect()
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }
}
