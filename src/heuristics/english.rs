//! English/non-English text classification.
//!
//! Character-ratio heuristic over comment text: digits and a fixed
//! punctuation set are stripped, the remainder is split into words, and
//! the ASCII vs non-ASCII character counts decide the verdict. The two
//! cutoffs (0.1 non-ASCII rejection, 0.9 ASCII acceptance) are
//! independent and intentionally kept as two branches.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{ASCII_ACCEPT_RATIO, NON_ASCII_REJECT_RATIO};

lazy_static! {
    // Digits plus the fixed punctuation set removed before counting.
    static ref STRIP_PATTERN: Regex =
        Regex::new("[0-9!@#$%^&*()_+\\-=\\[\\]{};:\"',<.>/?\\\\|`~]").expect("valid strip pattern");
}

/// Classify text as English by ASCII-character share.
///
/// Returns false when no words survive stripping, when the non-ASCII
/// share exceeds 10%, or when the ASCII share is not above 90%.
pub fn is_english(text: &str) -> bool {
    let cleaned = STRIP_PATTERN.replace_all(text, " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    if words.is_empty() {
        return false;
    }

    let mut ascii_chars = 0usize;
    let mut non_ascii_chars = 0usize;
    for word in &words {
        for ch in word.chars() {
            if (ch as u32) < 128 {
                ascii_chars += 1;
            } else {
                non_ascii_chars += 1;
            }
        }
    }

    let total_chars = ascii_chars + non_ascii_chars;

    if non_ascii_chars > 0 && non_ascii_chars as f64 / total_chars as f64 > NON_ASCII_REJECT_RATIO {
        return false;
    }

    total_chars > 0 && ascii_chars as f64 / total_chars as f64 > ASCII_ACCEPT_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_english() {
        assert!(is_english("This is pure English text"));
        assert!(is_english("initialize the request handler"));
    }

    #[test]
    fn test_pure_chinese() {
        assert!(!is_english("这是纯中文文本"));
        assert!(!is_english("初始化请求处理器"));
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert!(!is_english(""));
        assert!(!is_english("   "));
        assert!(!is_english("1234 !!! ---"));
    }

    #[test]
    fn test_mixed_text_rejected() {
        // Mostly English but the non-ASCII share is above 10%.
        assert!(!is_english("80% English text with some 中文词语"));
        assert!(!is_english("mixed comment 混合注释"));
    }

    #[test]
    fn test_mostly_english_with_trace_non_ascii() {
        // One accented char among many ASCII chars stays under both cutoffs.
        let text = "a long enough English sentence with one stray é character inside";
        assert!(is_english(text));
    }

    #[test]
    fn test_digits_and_punctuation_ignored() {
        assert!(is_english("retry count = 3 (see section 2.1)"));
        assert!(!is_english("重试次数 = 3"));
    }
}
