//! Source-tree processing: scanning, filtering, and reading.
//!
//! This module provides:
//! - Recursive directory scanning with role classification (backend/frontend)
//! - File filtering (include extensions, exclude directories, binaries)
//! - Encoding-tolerant reading into clean line sequences

pub mod filter;
pub mod reader;
pub mod scanner;

pub use filter::{FileFilter, FilterConfig};
pub use reader::read_source_lines;
pub use scanner::{FileRole, FileScanner, SourceSet};
