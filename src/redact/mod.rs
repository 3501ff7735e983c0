//! Selective comment removal over a classified line sequence.
//!
//! Three composable policies gate on [`RedactionOptions`]:
//!
//! - **Large blocks**: drop every comment block of two or more lines
//!   (restricted to English-classified blocks when English removal is
//!   also requested).
//! - **English singles**: drop one-line comment blocks whose extracted
//!   text classifies as English.
//! - **Random ratio**: drop 1-in-N of the surviving isolated single
//!   comment lines, sampled uniformly without replacement from an
//!   injected random source.
//!
//! End-of-line comments are outside the block set and survive every
//! policy. All policies apply in one invocation and the output preserves
//! the order and content of every retained line.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::heuristics::{
    block_comment_text, classify_blocks, extract_comment_text, is_comment_line, is_english,
};
use crate::{DEFAULT_REMOVE_RATIO, LARGE_BLOCK_MIN_LINES};

/// Which policy removed a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedCategory {
    /// A file-name header line (document post-processing only).
    Filename,
    /// A line belonging to a multi-line comment block.
    LargeComment,
    /// A single-line comment classified as English.
    EnglishComment,
    /// An isolated single comment picked by the random ratio policy.
    RandomComment,
}

impl fmt::Display for DeletedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletedCategory::Filename => "filename",
            DeletedCategory::LargeComment => "large comment",
            DeletedCategory::EnglishComment => "english comment",
            DeletedCategory::RandomComment => "random comment",
        };
        f.write_str(name)
    }
}

/// A line removed during redaction, recorded for the deletion report.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedLine {
    /// Position of the line in the input sequence.
    pub index: usize,
    /// Policy that removed it.
    pub category: DeletedCategory,
    /// The removed text.
    pub text: String,
}

/// Counters for every removal category, the engine's observable output
/// contract alongside the line sequence itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedactionStats {
    pub total_lines: usize,
    pub deleted_filenames: usize,
    pub deleted_large_comments: usize,
    pub deleted_english_comments: usize,
    pub deleted_random_comments: usize,
    pub remaining_lines: usize,
}

/// Removal policy switches.
///
/// `remove_ratio == 0` disables random removal entirely: the gate lives
/// here at the public entry point, not inside the policy. The internal
/// policy helper clamps a zero ratio to [`DEFAULT_REMOVE_RATIO`], so
/// callers that want "disabled" must not reach it with zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionOptions {
    /// Drop comment blocks of two or more lines.
    pub remove_large: bool,
    /// Drop single-line comments classified as English; also restricts
    /// large-block removal to English-classified blocks.
    pub remove_english: bool,
    /// Drop 1 of every N isolated single comments; 0 disables.
    pub remove_ratio: u32,
}

impl RedactionOptions {
    /// True when at least one policy is active.
    pub fn any_active(&self) -> bool {
        self.remove_large || self.remove_english || self.remove_ratio > 0
    }
}

/// Result of one redaction pass.
#[derive(Debug, Clone)]
pub struct RedactionOutcome {
    /// Surviving lines, in input order.
    pub lines: Vec<String>,
    /// Removed lines with their categories, in input order.
    pub deleted: Vec<DeletedLine>,
    /// Removal counters.
    pub stats: RedactionStats,
}

/// Applies the configured removal policies to line sequences.
///
/// The engine holds no mutable state; it is a pure function of its
/// inputs plus the caller-supplied random source, so repeated and
/// concurrent use is safe.
#[derive(Debug, Clone)]
pub struct RedactionEngine {
    options: RedactionOptions,
}

impl RedactionEngine {
    pub fn new(options: RedactionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RedactionOptions {
        &self.options
    }

    /// Run all requested policies over `lines` in a single pass.
    pub fn redact<R: Rng>(&self, lines: &[String], rng: &mut R) -> RedactionOutcome {
        let mut removal: Vec<Option<DeletedCategory>> = vec![None; lines.len()];
        let blocks = classify_blocks(lines);

        if self.options.remove_large {
            for block in blocks.iter().filter(|b| b.len() >= LARGE_BLOCK_MIN_LINES) {
                let drop = if self.options.remove_english {
                    let text = block_comment_text(lines, block);
                    is_english(&text)
                } else {
                    true
                };
                if drop {
                    for slot in &mut removal[block.start..=block.end] {
                        *slot = Some(DeletedCategory::LargeComment);
                    }
                }
            }
        }

        if self.options.remove_english {
            for block in blocks.iter().filter(|b| b.is_single()) {
                let text = extract_comment_text(&lines[block.start]);
                if !text.is_empty() && is_english(&text) {
                    removal[block.start] = Some(DeletedCategory::EnglishComment);
                }
            }
        }

        // Ratio 0 means disabled and is gated here, at the entry point.
        if self.options.remove_ratio > 0 {
            let candidates = random_removal_candidates(lines, &removal);
            for idx in pick_random_victims(&candidates, self.options.remove_ratio, rng) {
                removal[idx] = Some(DeletedCategory::RandomComment);
            }
        }

        let mut outcome = RedactionOutcome {
            lines: Vec::with_capacity(lines.len()),
            deleted: Vec::new(),
            stats: RedactionStats {
                total_lines: lines.len(),
                ..Default::default()
            },
        };

        for (i, line) in lines.iter().enumerate() {
            match removal[i] {
                None => outcome.lines.push(line.clone()),
                Some(category) => {
                    match category {
                        DeletedCategory::Filename => outcome.stats.deleted_filenames += 1,
                        DeletedCategory::LargeComment => {
                            outcome.stats.deleted_large_comments += 1
                        }
                        DeletedCategory::EnglishComment => {
                            outcome.stats.deleted_english_comments += 1
                        }
                        DeletedCategory::RandomComment => {
                            outcome.stats.deleted_random_comments += 1
                        }
                    }
                    outcome.deleted.push(DeletedLine {
                        index: i,
                        category,
                        text: line.clone(),
                    });
                }
            }
        }
        outcome.stats.remaining_lines = outcome.lines.len();

        outcome
    }
}

/// Isolated single comments eligible for random removal.
///
/// A candidate is a comment line (per the stateless predicate) that
/// survived the block policies and is not flanked on both sides by other
/// comment lines. Adjacency is judged on the original sequence; a
/// missing neighbor at either edge counts as non-comment.
fn random_removal_candidates(lines: &[String], removal: &[Option<DeletedCategory>]) -> Vec<usize> {
    (0..lines.len())
        .filter(|&i| removal[i].is_none())
        .filter(|&i| is_comment_line(&lines[i]))
        .filter(|&i| {
            let prev_comment = i > 0 && is_comment_line(&lines[i - 1]);
            let next_comment = lines.get(i + 1).map_or(false, |l| is_comment_line(l));
            !(prev_comment && next_comment)
        })
        .collect()
}

/// Sample `floor(candidates / ratio)` victims uniformly without
/// replacement. A zero ratio is clamped to the default here; the public
/// entry point never passes zero.
fn pick_random_victims<R: Rng>(candidates: &[usize], ratio: u32, rng: &mut R) -> Vec<usize> {
    let ratio = if ratio == 0 { DEFAULT_REMOVE_RATIO } else { ratio };
    let count = candidates.len() / ratio as usize;
    if count == 0 {
        return Vec::new();
    }

    rand::seq::index::sample(rng, candidates.len(), count)
        .into_iter()
        .map(|i| candidates[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn engine(remove_large: bool, remove_english: bool, remove_ratio: u32) -> RedactionEngine {
        RedactionEngine::new(RedactionOptions {
            remove_large,
            remove_english,
            remove_ratio,
        })
    }

    #[test]
    fn test_any_active_reflects_switches() {
        assert!(!RedactionOptions::default().any_active());
        assert!(engine(true, false, 0).options().any_active());
        assert!(engine(false, true, 0).options().any_active());
        assert!(engine(false, false, 3).options().any_active());
    }

    #[test]
    fn test_no_policies_is_identity() {
        let input = lines(&["# a", "x = 1"]);
        let outcome = engine(false, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, input);
        assert_eq!(outcome.stats.remaining_lines, 2);
        assert!(outcome.deleted.is_empty());
    }

    #[test]
    fn test_large_block_removal_docstring() {
        let input = lines(&["\"\"\"", "a", "b", "c", "\"\"\"", "code"]);
        let outcome = engine(true, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, lines(&["code"]));
        assert_eq!(outcome.stats.deleted_large_comments, 5);
        assert_eq!(outcome.stats.remaining_lines, 1);
    }

    #[test]
    fn test_large_block_removal_chinese_hash_run() {
        let input = lines(&["# 第一行", "# 第二行", "def f():", "    pass"]);
        let outcome = engine(true, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, lines(&["def f():", "    pass"]));
        assert_eq!(outcome.stats.deleted_large_comments, 2);
    }

    #[test]
    fn test_single_comment_and_trailing_comment_untouched_by_large_policy() {
        let input = lines(&["# comment", "x = 1  # trailing"]);
        let outcome = engine(true, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, input);
        assert_eq!(outcome.stats.deleted_large_comments, 0);
    }

    #[test]
    fn test_english_single_line_removal() {
        // Adjacent comments form a 2-line block, which the single-line
        // policy never touches.
        let input = lines(&[
            "# This is an English comment",
            "# 这是中文注释",
            "x = 1",
        ]);
        let outcome = engine(false, true, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, input);

        let input = lines(&["# This is an English comment", "x = 1", "# 这是中文注释"]);
        let outcome = engine(false, true, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, lines(&["x = 1", "# 这是中文注释"]));
        assert_eq!(outcome.stats.deleted_english_comments, 1);
    }

    #[test]
    fn test_large_plus_english_keeps_non_english_blocks() {
        let input = lines(&[
            "# first English line",
            "# second English line",
            "x = 1",
            "# 中文注释一",
            "# 中文注释二",
            "y = 2",
        ]);
        let outcome = engine(true, true, 0).redact(&input, &mut rng());
        assert_eq!(
            outcome.lines,
            lines(&["x = 1", "# 中文注释一", "# 中文注释二", "y = 2"])
        );
        assert_eq!(outcome.stats.deleted_large_comments, 2);
    }

    #[test]
    fn test_trailing_comment_survives_every_policy() {
        let input = lines(&["x = 1  # keep this", "y = 2  // and this"]);
        let outcome = engine(true, true, 1).redact(&input, &mut rng());
        assert_eq!(outcome.lines, input);
    }

    #[test]
    fn test_random_ratio_removes_floor_count() {
        // 9 isolated single comments interleaved with code.
        let mut input = Vec::new();
        for i in 0..9 {
            input.push(format!("# note {}", i));
            input.push(format!("x{} = {}", i, i));
        }
        let outcome = engine(false, false, 3).redact(&input, &mut rng());
        assert_eq!(outcome.stats.deleted_random_comments, 3);
        assert_eq!(outcome.stats.remaining_lines, input.len() - 3);
        // Victims are distinct lines.
        let mut indices: Vec<usize> = outcome.deleted.iter().map(|d| d.index).collect();
        indices.dedup();
        assert_eq!(indices.len(), 3);
        // Only comment lines were removed.
        assert!(outcome.deleted.iter().all(|d| d.text.starts_with("# note")));
    }

    #[test]
    fn test_random_ratio_is_seed_deterministic() {
        let input: Vec<String> = (0..12)
            .flat_map(|i| vec![format!("# c{}", i), format!("v{} = {}", i, i)])
            .collect();
        let a = engine(false, false, 4).redact(&input, &mut StdRng::seed_from_u64(42));
        let b = engine(false, false, 4).redact(&input, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn test_random_ratio_skips_run_interior() {
        // Middle line of a 3-comment run is flanked on both sides and is
        // not a candidate; with ratio 1 the two edge lines go, the middle
        // stays.
        let input = lines(&["# a", "# b", "# c", "code()"]);
        let outcome = engine(false, false, 1).redact(&input, &mut rng());
        assert_eq!(outcome.lines, lines(&["# b", "code()"]));
        assert_eq!(outcome.stats.deleted_random_comments, 2);
    }

    #[test]
    fn test_ratio_zero_is_disabled_at_entry_point() {
        let input = lines(&["# a", "x = 1", "# b", "y = 2"]);
        let outcome = engine(false, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.stats.deleted_random_comments, 0);
        assert_eq!(outcome.lines, input);
        // The internal helper, by contrast, clamps 0 to the default ratio.
        let victims = pick_random_victims(&[0, 2, 4], 0, &mut rng());
        assert_eq!(victims.len(), 1);
    }

    #[test]
    fn test_large_block_removal_is_idempotent() {
        let input = lines(&["\"\"\"", "docs", "\"\"\"", "code", "# single"]);
        let eng = engine(true, false, 0);
        let once = eng.redact(&input, &mut rng());
        let twice = eng.redact(&once.lines, &mut rng());
        assert_eq!(once.lines, twice.lines);
        assert_eq!(twice.stats.deleted_large_comments, 0);
    }

    #[test]
    fn test_unterminated_docstring_degrades_to_trailing_block() {
        let input = lines(&["x = 1", "\"\"\"", "dangling", "still dangling"]);
        let outcome = engine(true, false, 0).redact(&input, &mut rng());
        assert_eq!(outcome.lines, lines(&["x = 1"]));
        assert_eq!(outcome.stats.deleted_large_comments, 3);
    }

    #[test]
    fn test_empty_input() {
        let outcome = engine(true, true, 3).redact(&[], &mut rng());
        assert!(outcome.lines.is_empty());
        assert_eq!(outcome.stats.total_lines, 0);
        assert_eq!(outcome.stats.remaining_lines, 0);
    }

    #[test]
    fn test_deleted_lines_recorded_in_order() {
        let input = lines(&["# one", "# two", "x = 1", "# 中文", "y = 2"]);
        let outcome = engine(true, false, 0).redact(&input, &mut rng());
        let indices: Vec<usize> = outcome.deleted.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(outcome
            .deleted
            .iter()
            .all(|d| d.category == DeletedCategory::LargeComment));
    }
}
