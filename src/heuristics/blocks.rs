//! Stateful comment-block classification.
//!
//! A single left-to-right pass over a line sequence that tags maximal
//! contiguous runs of comment-classified lines as blocks, tracking
//! triple-quoted string and C-style block-comment continuations across
//! lines. This is a heuristic scanner, not a lexer: string literals that
//! look like comments are out of scope by design.

/// A maximal contiguous run of comment-classified lines.
///
/// Indices are inclusive positions within the sequence the block was
/// classified from. Blocks never overlap and are ordered by start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock {
    /// Index of the first line of the block.
    pub start: usize,
    /// Index of the last line of the block (inclusive).
    pub end: usize,
}

impl CommentBlock {
    /// Number of lines covered by the block.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// True for a one-line block.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Check whether a line carries code followed by a trailing comment.
///
/// True when a comment marker (`#`, `//`, `/*`) appears somewhere other
/// than the start of the trimmed line. Such lines are exempt from every
/// block-based removal policy, since dropping them would drop code.
pub fn is_end_of_line_comment(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }

    for marker in ["#", "//", "/*"] {
        if let Some(pos) = trimmed.find(marker) {
            if pos > 0 {
                return true;
            }
        }
    }

    false
}

/// Returns the triple-quote marker a trimmed line starts with, if any.
fn leading_triple_quote(trimmed: &str) -> Option<&'static str> {
    TRIPLE_QUOTES
        .iter()
        .copied()
        .find(|m| trimmed.starts_with(m))
}

/// A triple-quoted string that opens and closes on the same line
/// (e.g. `"""one line docstring"""`) is a one-line comment, not a
/// continuation opener. A lone `"""` has a single marker occurrence
/// and therefore opens a continuation.
fn closes_on_same_line(trimmed: &str, marker: &str) -> bool {
    trimmed.matches(marker).count() > 1
}

/// True for the single-line comment forms: `#`, `//`, a complete HTML
/// comment, a closed `/*...*/` (including `/**...*/`), or a `*`
/// continuation line that is not `*/`.
fn is_single_line_comment(trimmed: &str) -> bool {
    if trimmed.starts_with('#') || trimmed.starts_with("//") {
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

/// Scan a line sequence and return its comment blocks in order.
///
/// End-of-line comment lines are excluded from block consideration: they
/// never appear inside a block, and they leave the open triple-quote or
/// C-block continuation state untouched. An opener that is never closed
/// degrades gracefully into one trailing block covering the rest of the
/// sequence.
pub fn classify_blocks(lines: &[String]) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut in_triple: Option<&'static str> = None;
    let mut in_c_block = false;
    let mut run_start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        // Trailing comments break the current run without touching
        // continuation state.
        if is_end_of_line_comment(line) {
            if let Some(start) = run_start.take() {
                blocks.push(CommentBlock { start, end: i - 1 });
            }
            continue;
        }

        let is_comment = if let Some(marker) = in_triple {
            if trimmed.ends_with(marker) {
                in_triple = None;
            }
            true
        } else if let Some(marker) = leading_triple_quote(trimmed) {
            if !closes_on_same_line(trimmed, marker) {
                in_triple = Some(marker);
            }
            true
        } else if in_c_block {
            if trimmed.contains("*/") {
                in_c_block = false;
            }
            true
        } else if trimmed.starts_with("/*") && !trimmed.contains("*/") {
            in_c_block = true;
            true
        } else {
            is_single_line_comment(trimmed)
        };

        match (is_comment, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                blocks.push(CommentBlock { start, end: i - 1 });
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        blocks.push(CommentBlock {
            start,
            end: lines.len() - 1,
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(classify_blocks(&[]).is_empty());
    }

    #[test]
    fn test_hash_run_forms_one_block() {
        let input = lines(&["# first", "# second", "def f():", "    pass"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 0, end: 1 }]);
    }

    #[test]
    fn test_docstring_block() {
        let input = lines(&["\"\"\"", "a", "b", "c", "\"\"\"", "code"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 0, end: 4 }]);
        assert_eq!(blocks[0].len(), 5);
    }

    #[test]
    fn test_single_line_docstring_is_one_line_block() {
        let input = lines(&["\"\"\"one line\"\"\"", "x = 1"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 0, end: 0 }]);
        assert!(blocks[0].is_single());
    }

    #[test]
    fn test_c_block_comment() {
        let input = lines(&["/*", " * detail", " */", "int x;"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 0, end: 2 }]);
    }

    #[test]
    fn test_closed_c_comment_is_single_block() {
        let input = lines(&["/* one liner */", "int x;", "/** doc */"]);
        let blocks = classify_blocks(&input);
        assert_eq!(
            blocks,
            vec![
                CommentBlock { start: 0, end: 0 },
                CommentBlock { start: 2, end: 2 },
            ]
        );
    }

    #[test]
    fn test_html_comment() {
        let input = lines(&["<!-- header -->", "<div>"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 0, end: 0 }]);
    }

    #[test]
    fn test_trailing_comment_never_joins_block() {
        let input = lines(&["# comment", "x = 1  # trailing", "# another"]);
        let blocks = classify_blocks(&input);
        // The trailing-comment line splits the run into two one-line blocks.
        assert_eq!(
            blocks,
            vec![
                CommentBlock { start: 0, end: 0 },
                CommentBlock { start: 2, end: 2 },
            ]
        );
    }

    #[test]
    fn test_unterminated_docstring_becomes_trailing_block() {
        let input = lines(&["x = 1", "\"\"\"", "dangling", "more"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 1, end: 3 }]);
    }

    #[test]
    fn test_block_open_at_end_of_sequence_is_closed() {
        let input = lines(&["code()", "# tail one", "# tail two"]);
        let blocks = classify_blocks(&input);
        assert_eq!(blocks, vec![CommentBlock { start: 1, end: 2 }]);
    }

    #[test]
    fn test_blocks_partition_the_sequence() {
        let input = lines(&[
            "\"\"\"",
            "docs",
            "\"\"\"",
            "x = 1  # note",
            "# alone",
            "y = 2",
            "/*",
            "block",
            "*/",
        ]);
        let blocks = classify_blocks(&input);

        let block_lines: usize = blocks.iter().map(|b| b.len()).sum();
        let eol_lines = input.iter().filter(|l| is_end_of_line_comment(l)).count();
        let covered: Vec<bool> = {
            let mut v = vec![false; input.len()];
            for b in &blocks {
                for slot in &mut v[b.start..=b.end] {
                    assert!(!*slot, "blocks overlap");
                    *slot = true;
                }
            }
            v
        };
        let code_lines = input
            .iter()
            .enumerate()
            .filter(|(i, l)| !covered[*i] && !is_end_of_line_comment(l))
            .count();

        assert_eq!(block_lines + eol_lines + code_lines, input.len());
        assert!(blocks.windows(2).all(|w| w[0].end < w[1].start));
    }

    #[test]
    fn test_is_end_of_line_comment() {
        assert!(is_end_of_line_comment("x = 1  # trailing"));
        assert!(is_end_of_line_comment("int x; // note"));
        assert!(is_end_of_line_comment("int x; /* note */"));
        assert!(!is_end_of_line_comment("# leading"));
        assert!(!is_end_of_line_comment("// leading"));
        assert!(!is_end_of_line_comment("plain code"));
        assert!(!is_end_of_line_comment(""));
    }

    #[test]
    fn test_triple_quote_marker_counting() {
        // A lone """ opens a continuation; """x""" does not.
        assert!(!closes_on_same_line("\"\"\"", "\"\"\""));
        assert!(closes_on_same_line("\"\"\"x\"\"\"", "\"\"\""));
        assert!(closes_on_same_line("'''y'''", "'''"));
    }
}
