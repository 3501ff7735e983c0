//! Comment-detection heuristics.
//!
//! Two deliberately separate comment detectors live here: a stateful
//! single-pass block classifier (`blocks`) that tracks multi-line
//! string/comment continuations, and a stateless per-line predicate
//! (`lines`) used by the random-removal policy. They must stay independent:
//! unifying them changes which lines the random policy considers isolated.

pub mod blocks;
pub mod english;
pub mod lines;

pub use blocks::{classify_blocks, is_end_of_line_comment, CommentBlock};
pub use english::is_english;
pub use lines::{block_comment_text, extract_comment_text, is_comment_line};
