//! File filtering configuration and rules.
//!
//! Configurable include/exclude rules deciding which files enter the
//! assembled document: an include-extension set, excluded directories,
//! size limits, and binary-content sniffing.

use std::collections::HashSet;
use std::path::Path;

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// File extensions to include (e.g., ".py", ".java"). Empty = all.
    pub included_extensions: HashSet<String>,
    /// Directories to exclude from scanning.
    pub excluded_directories: HashSet<String>,
    /// Maximum file size in bytes (default: 1MB).
    pub max_file_size: usize,
    /// Minimum file size in bytes (default: 1).
    pub min_file_size: usize,
    /// Whether to include hidden files (starting with .).
    pub include_hidden: bool,
    /// Patterns for generated files to exclude.
    pub generated_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            included_extensions: default_included_extensions(),
            excluded_directories: default_excluded_directories(),
            max_file_size: 1024 * 1024, // 1MB
            min_file_size: 1,
            include_hidden: false,
            generated_patterns: default_generated_patterns(),
        }
    }
}

fn default_included_extensions() -> HashSet<String> {
    [
        ".py", ".java", ".js", ".ts", ".jsx", ".tsx", ".html", ".css", ".c", ".cpp", ".h", ".cs",
        ".go", ".php", ".rb", ".vue", ".scss", ".less",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_excluded_directories() -> HashSet<String> {
    [
        "venv",
        ".venv",
        "env",
        "node_modules",
        ".git",
        ".svn",
        "__pycache__",
        "build",
        "dist",
        "target",
        "out",
        ".idea",
        ".vscode",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_generated_patterns() -> Vec<String> {
    [r".*\.min\.", r".*bundle\..*", r".*-lock\.", r".*\.map$"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// File filter for determining which files to include.
pub struct FileFilter {
    config: FilterConfig,
    generated_regexes: Vec<regex::Regex>,
}

impl FileFilter {
    /// Create a new file filter with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        let generated_regexes = config
            .generated_patterns
            .iter()
            .filter_map(|p| regex::Regex::new(p).ok())
            .collect();

        Self {
            config,
            generated_regexes,
        }
    }

    /// Create a filter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FilterConfig::default())
    }

    /// Check if a file should be included.
    ///
    /// Returns `Ok(())` if the file passes, or `Err(reason)` if it should
    /// be skipped.
    pub fn should_include(&self, path: &str, size: usize) -> Result<(), String> {
        let path_obj = Path::new(path);

        // Size limits
        if size < self.config.min_file_size {
            return Err("File is empty".to_string());
        }
        if size > self.config.max_file_size {
            return Err(format!(
                "File too large: {} bytes (max: {})",
                size, self.config.max_file_size
            ));
        }

        // Excluded directories anywhere in the path
        for component in path_obj.components() {
            if let Some(name) = component.as_os_str().to_str() {
                if self.config.excluded_directories.contains(name) {
                    return Err(format!("In excluded directory: {}", name));
                }
                if !self.config.include_hidden && name.starts_with('.') && name.len() > 1 {
                    return Err(format!("Hidden path component: {}", name));
                }
            }
        }

        // Extension must be in the include set (empty set = include all)
        if !self.config.included_extensions.is_empty() {
            let ext = path_obj
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e.to_lowercase()));
            match ext {
                Some(ext) if self.config.included_extensions.contains(&ext) => {}
                Some(ext) => return Err(format!("Extension not included: {}", ext)),
                None => return Err("File has no extension".to_string()),
            }
        }

        // Generated-file patterns
        if let Some(filename) = path_obj.file_name().and_then(|n| n.to_str()) {
            for regex in &self.generated_regexes {
                if regex.is_match(filename) {
                    return Err(format!("Generated file pattern: {}", regex.as_str()));
                }
            }
        }

        Ok(())
    }

    /// Check if content appears to be binary.
    pub fn is_binary_content(&self, content: &[u8], sample_size: usize) -> bool {
        is_binary_content(content, sample_size)
    }

    /// Get the configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

/// Check if content appears to be binary.
///
/// Used by the reader before decoding, so binary blobs with an included
/// extension contribute zero lines instead of Latin-1 noise.
pub fn is_binary_content(content: &[u8], sample_size: usize) -> bool {
    let sample = &content[..content.len().min(sample_size)];

    // Null bytes are a strong indicator of binary content
    if sample.contains(&0) {
        return true;
    }

    let non_printable = sample
        .iter()
        .filter(|&&b| b < 32 && !matches!(b, 9 | 10 | 13))
        .count();

    !sample.is_empty() && (non_printable as f64 / sample.len() as f64) > 0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_directories() {
        let filter = FileFilter::with_defaults();

        assert!(filter
            .should_include("node_modules/foo/bar.js", 100)
            .is_err());
        assert!(filter.should_include(".git/config.py", 100).is_err());
        assert!(filter.should_include("venv/lib/site.py", 100).is_err());
    }

    #[test]
    fn test_included_extensions() {
        let filter = FileFilter::with_defaults();

        assert!(filter.should_include("src/main.py", 100).is_ok());
        assert!(filter.should_include("app/index.js", 100).is_ok());
        assert!(filter.should_include("web/style.css", 100).is_ok());
        assert!(filter.should_include("image.png", 100).is_err());
        assert!(filter.should_include("README", 100).is_err());
    }

    #[test]
    fn test_empty_include_set_accepts_all() {
        let filter = FileFilter::new(FilterConfig {
            included_extensions: Default::default(),
            ..Default::default()
        });

        assert!(filter.should_include("notes.txt", 100).is_ok());
        assert!(filter.should_include("Makefile.mk", 100).is_ok());
    }

    #[test]
    fn test_size_limits() {
        let filter = FileFilter::with_defaults();

        assert!(filter.should_include("empty.py", 0).is_err());
        assert!(filter.should_include("huge.py", 10 * 1024 * 1024).is_err());
        assert!(filter.should_include("normal.py", 1000).is_ok());
    }

    #[test]
    fn test_generated_patterns() {
        let filter = FileFilter::with_defaults();

        assert!(filter.should_include("app.min.js", 100).is_err());
        assert!(filter.should_include("vendor.bundle.js", 100).is_err());
    }

    #[test]
    fn test_binary_detection() {
        let filter = FileFilter::with_defaults();

        assert!(!filter.is_binary_content(b"def hello(): pass", 1024));
        assert!(filter.is_binary_content(b"\x00\x01\x02\x03", 1024));
    }
}
