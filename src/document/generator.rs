//! Paginated plain-text document emission.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::assemble::split_into_pages;
use crate::error::SofcertError;
use crate::DEFAULT_LINES_PER_PAGE;

const PAGE_WIDTH: usize = 80;

/// Page layout for the generated document.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    /// Software name shown in every page header.
    pub software_name: String,
    /// Software version shown in every page header.
    pub software_version: String,
    /// Code lines per page.
    pub lines_per_page: usize,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            software_name: "Software".to_string(),
            software_version: "1.0".to_string(),
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }
}

impl DocumentLayout {
    fn page_header(&self, page: usize, total: usize) -> String {
        let left = format!("{} V{}", self.software_name, self.software_version);
        let right = format!("Page {}/{}", page, total);
        let padding = PAGE_WIDTH.saturating_sub(left.len() + right.len()).max(1);
        format!("{}{}{}", left, " ".repeat(padding), right)
    }
}

/// Write the assembled lines as a paginated text document.
///
/// A `.txt` extension is appended when the path has none; parent
/// directories are created as needed. Returns the path written.
pub fn generate_document(
    lines: &[String],
    output_path: &Path,
    layout: &DocumentLayout,
) -> Result<PathBuf, SofcertError> {
    let mut path = output_path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension("txt");
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SofcertError::io(parent, e))?;
        }
    }

    let pages = split_into_pages(lines, layout.lines_per_page);
    let total = pages.len().max(1);

    let mut out = String::new();
    for (i, page) in pages.iter().enumerate() {
        out.push_str(&layout.page_header(i + 1, total));
        out.push('\n');
        out.push_str(&"-".repeat(PAGE_WIDTH));
        out.push('\n');
        for line in page {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    fs::write(&path, out).map_err(|e| SofcertError::io(&path, e))?;
    info!(path = %path.display(), pages = total, lines = lines.len(), "document generated");

    Ok(path)
}
