//! Sofcert Library
//!
//! Assembles a project's source files into a single paginated submission
//! document (for software-copyright filing), with heuristic, ratio-controlled
//! redaction of comments and file-name lines.

pub mod assemble;
pub mod config;
pub mod document;
pub mod error;
pub mod heuristics;
pub mod processing;
pub mod redact;

pub use config::Config;
pub use error::SofcertError;
pub use heuristics::{
    classify_blocks, is_comment_line, is_end_of_line_comment, is_english, CommentBlock,
};
pub use redact::{RedactionEngine, RedactionOptions, RedactionOutcome, RedactionStats};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::assemble::*;
    pub use crate::config::Config;
    pub use crate::document::*;
    pub use crate::heuristics::*;
    pub use crate::processing::*;
    pub use crate::redact::*;
}

/// Minimum number of lines for a comment block to count as "large"
pub const LARGE_BLOCK_MIN_LINES: usize = 2;

/// Default 1-in-N ratio for random comment removal
pub const DEFAULT_REMOVE_RATIO: u32 = 3;

/// Default number of code lines per output page
pub const DEFAULT_LINES_PER_PAGE: usize = 50;

/// Non-ASCII character share above which text is rejected as non-English
pub const NON_ASCII_REJECT_RATIO: f64 = 0.1;

/// ASCII character share required for text to classify as English
pub const ASCII_ACCEPT_RATIO: f64 = 0.9;
