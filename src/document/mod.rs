//! Document emission and post-processing.
//!
//! The generator writes the assembled line sequence as a paginated
//! plain-text document; the processor re-reads a generated document and
//! applies file-name removal plus the redaction engine, producing a
//! processed document and a deleted-content report.

pub mod generator;
pub mod processor;

pub use generator::{generate_document, DocumentLayout};
pub use processor::{
    is_filename_line, process_batch, process_document, BatchEntry, ProcessOptions, ProcessReport,
};
