//! Post-processing of generated documents.
//!
//! Reads a previously generated document, removes file-name lines when
//! requested, runs the redaction engine, and writes both the processed
//! document and a deleted-content report recording every removed line
//! with its category.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rand::Rng;
use tracing::{info, warn};

use crate::error::SofcertError;
use crate::processing::reader::{decode_bytes, normalize_line_endings};
use crate::redact::{DeletedCategory, DeletedLine, RedactionEngine, RedactionOptions, RedactionStats};

/// Extensions that mark a line as a file-name header.
const FILENAME_EXTENSIONS: [&str; 12] = [
    ".py", ".java", ".c", ".cpp", ".cs", ".js", ".html", ".css", ".php", ".go", ".rb", ".swift",
];

/// Check whether a document line is a file-name header line.
pub fn is_filename_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    FILENAME_EXTENSIONS.iter().any(|ext| trimmed.ends_with(ext))
}

/// Post-processing switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Remove file-name header lines.
    pub remove_filenames: bool,
    /// Comment-removal policies.
    pub redaction: RedactionOptions,
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    /// Path of the processed document.
    pub output_path: PathBuf,
    /// Path of the deleted-content report.
    pub deleted_path: PathBuf,
    /// Removal counters over the whole document.
    pub stats: RedactionStats,
}

/// Process a generated document.
///
/// Reads `input`, applies file-name removal and the redaction policies,
/// writes the surviving lines to `output` and a deletion report to
/// `deleted_record`. Returns the paths and the combined statistics.
pub fn process_document<R: Rng>(
    input: &Path,
    output: &Path,
    deleted_record: &Path,
    options: &ProcessOptions,
    rng: &mut R,
) -> Result<ProcessReport, SofcertError> {
    if !input.exists() {
        return Err(SofcertError::MissingInput(input.to_path_buf()));
    }

    let bytes = fs::read(input).map_err(|e| SofcertError::io(input, e))?;
    let (text, _encoding) = decode_bytes(&bytes);
    let lines: Vec<String> = normalize_line_endings(&text)
        .lines()
        .map(|l| l.trim_end().to_string())
        .collect();

    // File-name removal runs first; the redaction engine sees only the
    // surviving lines.
    let mut deleted: Vec<DeletedLine> = Vec::new();
    let mut surviving: Vec<String> = Vec::new();
    let mut original_index: Vec<usize> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if options.remove_filenames && is_filename_line(line) {
            deleted.push(DeletedLine {
                index: i,
                category: DeletedCategory::Filename,
                text: line.clone(),
            });
        } else {
            surviving.push(line.clone());
            original_index.push(i);
        }
    }

    let engine = RedactionEngine::new(options.redaction);
    let outcome = engine.redact(&surviving, rng);

    for entry in outcome.deleted {
        deleted.push(DeletedLine {
            index: original_index[entry.index],
            category: entry.category,
            text: entry.text,
        });
    }
    deleted.sort_by_key(|d| d.index);

    let mut stats = outcome.stats;
    stats.total_lines = lines.len();
    stats.deleted_filenames = deleted
        .iter()
        .filter(|d| d.category == DeletedCategory::Filename)
        .count();

    write_processed(output, &outcome.lines)?;
    write_deleted_report(deleted_record, input, options, &deleted)?;

    info!(
        input = %input.display(),
        removed = deleted.len(),
        remaining = stats.remaining_lines,
        "document processed"
    );

    Ok(ProcessReport {
        output_path: output.to_path_buf(),
        deleted_path: deleted_record.to_path_buf(),
        stats,
    })
}

fn write_processed(path: &Path, lines: &[String]) -> Result<(), SofcertError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SofcertError::io(parent, e))?;
        }
    }
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| SofcertError::io(path, e))
}

fn write_deleted_report(
    path: &Path,
    input: &Path,
    options: &ProcessOptions,
    deleted: &[DeletedLine],
) -> Result<(), SofcertError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SofcertError::io(parent, e))?;
        }
    }

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let mut out = String::new();
    out.push_str("Deleted content record\n");
    out.push_str(&format!(
        "Source document: {}\n",
        input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string_lossy().into_owned())
    ));
    out.push_str(&format!(
        "Processed at: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("Options:\n");
    out.push_str(&format!(
        "- remove filenames: {}\n",
        yes_no(options.remove_filenames)
    ));
    out.push_str(&format!(
        "- remove large comments: {}\n",
        yes_no(options.redaction.remove_large)
    ));
    out.push_str(&format!(
        "- remove english comments: {}\n",
        yes_no(options.redaction.remove_english)
    ));
    out.push_str(&format!(
        "- random removal ratio: {}\n",
        options.redaction.remove_ratio
    ));
    out.push('\n');

    if deleted.is_empty() {
        out.push_str("No content was deleted.\n");
    } else {
        for entry in deleted {
            out.push_str(&format!(
                "line {} [{}]: {}\n",
                entry.index + 1,
                entry.category,
                entry.text
            ));
        }
    }

    fs::write(path, out).map_err(|e| SofcertError::io(path, e))
}

/// One input document's outcome in a batch run.
#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub result: Result<ProcessReport, SofcertError>,
}

/// Process every `.txt` document in `input_dir`, writing
/// `<stem>_processed.txt` and `<stem>_deleted.txt` into `output_dir`.
///
/// A failing document is recorded in its entry and does not stop the
/// batch.
pub fn process_batch<R: Rng>(
    input_dir: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
    rng: &mut R,
) -> Result<Vec<BatchEntry>, SofcertError> {
    fs::create_dir_all(output_dir).map_err(|e| SofcertError::io(output_dir, e))?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)
        .map_err(|e| SofcertError::io(input_dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("txt")
        })
        .collect();
    inputs.sort();

    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let output = output_dir.join(format!("{}_processed.txt", stem));
        let deleted = output_dir.join(format!("{}_deleted.txt", stem));

        let result = process_document(&input, &output, &deleted, options, rng);
        if let Err(e) = &result {
            warn!(input = %input.display(), error = %e, "batch entry failed");
        }
        entries.push(BatchEntry { input, result });
    }

    Ok(entries)
}
