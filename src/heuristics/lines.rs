//! Stateless per-line comment detection and comment-text extraction.
//!
//! `is_comment_line` re-derives comment-ness for one line with no
//! continuation tracking. It backs the random-removal policy's adjacency
//! check and must not be merged with the stateful block scanner.

use super::blocks::CommentBlock;

/// Decide whether a single line, in isolation, reads as a comment.
///
/// Blank lines are not comments. Lines that start or end with a
/// triple-quote marker count, as do `#`, `//`, complete HTML or C-style
/// comments, and `*` continuation lines.
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return false;
    }

    if trimmed.starts_with('#') || trimmed.starts_with("//") {
        return true;
    }

    if trimmed.starts_with("\"\"\"")
        || trimmed.ends_with("\"\"\"")
        || trimmed.starts_with("'''")
        || trimmed.ends_with("'''")
    {
        return true;
    }

    if trimmed.starts_with("<!--") && trimmed.ends_with("-->") {
        return true;
    }

    if trimmed.starts_with("/*") && trimmed.ends_with("*/") {
        return true;
    }

    if trimmed.starts_with('*') && !trimmed.starts_with("*/") {
        return true;
    }

    false
}

/// Strip comment markers from a line and return the remaining text.
///
/// Handles `#`, `//`, `/* ... */`, `/** ... */`, leading `*`, HTML
/// comment delimiters, and triple-quote markers on either end.
pub fn extract_comment_text(line: &str) -> String {
    let mut t = line.trim();

    if t.starts_with("<!--") {
        t = &t[4..];
        if let Some(s) = t.strip_suffix("-->") {
            t = s;
        }
    }

    for marker in ["\"\"\"", "'''"] {
        if let Some(s) = t.strip_prefix(marker) {
            t = s;
        }
        if let Some(s) = t.strip_suffix(marker) {
            t = s;
        }
    }

    if let Some(s) = t.strip_prefix("/**") {
        t = s;
    } else if let Some(s) = t.strip_prefix("/*") {
        t = s;
    } else if let Some(s) = t.strip_prefix("//") {
        t = s;
    } else if let Some(s) = t.strip_prefix('#') {
        t = s;
    } else if let Some(s) = t.strip_prefix("*/") {
        t = s;
    } else if let Some(s) = t.strip_prefix('*') {
        t = s;
    }

    if let Some(s) = t.strip_suffix("*/") {
        t = s;
    }

    t.trim().to_string()
}

/// Reconstruct the full text of a comment block: each line stripped of
/// its markers, non-empty pieces joined with single spaces.
pub fn block_comment_text(lines: &[String], block: &CommentBlock) -> String {
    lines[block.start..=block.end]
        .iter()
        .map(|l| extract_comment_text(l))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
