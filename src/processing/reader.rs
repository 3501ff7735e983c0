//! Encoding-tolerant source reading.
//!
//! Decodes UTF-8, BOM-marked UTF-16, or falls back to Latin-1, then
//! normalizes line endings and yields non-blank lines with trailing
//! whitespace stripped. Read failures are logged and contribute zero
//! lines; they never abort an assembly run.

use std::fs;
use std::path::Path;
use std::str;

use tracing::warn;

use crate::processing::filter::is_binary_content;

/// Bytes sampled from the head of a file for binary detection.
const BINARY_SAMPLE_SIZE: usize = 8192;

/// Read a source file into clean lines.
///
/// Blank lines are dropped and trailing whitespace is stripped; line
/// order is preserved. An unreadable or binary file returns an empty
/// vector.
pub fn read_source_lines(path: &Path) -> Vec<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read source file");
            return Vec::new();
        }
    };

    // Binary check before decoding, so blobs with a source extension do
    // not reach the document via the Latin-1 fallback.
    if is_binary_content(&bytes, BINARY_SAMPLE_SIZE) {
        warn!(path = %path.display(), "skipping binary file");
        return Vec::new();
    }

    let (text, _encoding) = decode_bytes(&bytes);
    let text = normalize_line_endings(&text);

    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.trim_end().to_string())
        .collect()
}

/// Count the non-blank lines of a file, zero if unreadable.
pub fn count_source_lines(path: &Path) -> usize {
    read_source_lines(path).len()
}

/// Decode content with encoding detection.
///
/// Returns the decoded string and the encoding used. Never fails: the
/// Latin-1 fallback accepts any byte sequence.
pub fn decode_bytes(content: &[u8]) -> (String, &'static str) {
    // UTF-8 first (most common)
    if let Ok(s) = str::from_utf8(content) {
        return (s.to_string(), "utf-8");
    }

    // UTF-16 LE BOM
    if content.len() >= 2 && content[0] == 0xFF && content[1] == 0xFE {
        let utf16: Vec<u16> = content[2..]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&utf16) {
            return (s, "utf-16-le");
        }
    }

    // UTF-16 BE BOM
    if content.len() >= 2 && content[0] == 0xFE && content[1] == 0xFF {
        let utf16: Vec<u16> = content[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&utf16) {
            return (s, "utf-16-be");
        }
    }

    // Latin-1 fallback (always succeeds)
    let s: String = content.iter().map(|&b| b as char).collect();
    (s, "latin-1")
}

/// Normalize line endings to Unix-style (LF).
pub fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
