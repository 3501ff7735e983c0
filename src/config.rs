//! Configuration loading, merging, and validation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SofcertError;
use crate::processing::filter::FilterConfig;
use crate::DEFAULT_LINES_PER_PAGE;

/// Tool configuration, loadable from a JSON file and overridable from
/// the command line field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory to scan for source files.
    pub source_dir: String,
    /// Output path for the assembled document (extension optional).
    pub output_path: String,
    /// Software name printed in page headers.
    pub software_name: String,
    /// Software version printed in page headers.
    pub software_version: String,
    /// Code lines per output page.
    pub lines_per_page: usize,
    /// File extensions to include.
    pub file_extensions: Vec<String>,
    /// Directory names to exclude from scanning.
    pub exclude_dirs: Vec<String>,
    /// Extensions classifying a file as backend.
    pub backend_identifiers: Vec<String>,
    /// Extensions classifying a file as frontend.
    pub frontend_identifiers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: String::new(),
            output_path: "output/source_code".to_string(),
            software_name: "Software".to_string(),
            software_version: "1.0".to_string(),
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            file_extensions: [
                ".py", ".java", ".js", ".html", ".css", ".c", ".cpp", ".h", ".cs", ".go", ".php",
                ".rb",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exclude_dirs: ["venv", "node_modules", ".git", "__pycache__", "build", "dist"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            backend_identifiers: [".py", ".java", ".c", ".cpp", ".cs", ".go", ".rb", ".php"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            frontend_identifiers: [
                ".js", ".ts", ".jsx", ".tsx", ".html", ".css", ".vue", ".scss", ".less",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; absent fields keep defaults.
    pub fn load(path: &Path) -> Result<Self, SofcertError> {
        let content = fs::read_to_string(path).map_err(|e| SofcertError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| SofcertError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SofcertError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| SofcertError::io(parent, e))?;
            }
        }
        let content =
            serde_json::to_string_pretty(self).expect("config serialization cannot fail");
        fs::write(path, content).map_err(|e| SofcertError::io(path, e))
    }

    /// Validate the configuration, returning all problems found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.source_dir.is_empty() {
            errors.push("source directory must not be empty".to_string());
        } else if !Path::new(&self.source_dir).is_dir() {
            errors.push(format!(
                "source directory '{}' does not exist or is not a directory",
                self.source_dir
            ));
        }

        if self.lines_per_page < 10 {
            errors.push(format!(
                "lines per page should be at least 10, got {}",
                self.lines_per_page
            ));
        }

        errors
    }

    /// Validate, folding all problems into a single error.
    pub fn ensure_valid(&self) -> Result<(), SofcertError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SofcertError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Build the file filter configuration from this config.
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            included_extensions: self.file_extensions.iter().cloned().collect(),
            excluded_directories: self.exclude_dirs.iter().cloned().collect(),
            ..FilterConfig::default()
        }
    }

    pub fn backend_identifier_set(&self) -> HashSet<String> {
        self.backend_identifiers.iter().cloned().collect()
    }

    pub fn frontend_identifier_set(&self) -> HashSet<String> {
        self.frontend_identifiers.iter().cloned().collect()
    }

    /// Output path as a `PathBuf`.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }
}
