//! Sofcert - Main Entry Point
//!
//! Command-line front end: assemble a project's sources into a paginated
//! submission document, or post-process a generated document with
//! comment redaction.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sofcert::assemble::merge_sources;
use sofcert::config::Config;
use sofcert::document::{
    generate_document, process_batch, process_document, DocumentLayout, ProcessOptions,
};
use sofcert::processing::scanner::FileScanner;
use sofcert::redact::RedactionOptions;

#[derive(Parser)]
#[command(name = "sofcert", version, about = "Source-code submission document assembler")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a source tree and generate the assembled document
    Generate {
        /// Source directory to scan
        #[arg(short, long)]
        source_dir: Option<PathBuf>,

        /// Output path for the generated document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Software name for page headers
        #[arg(long)]
        name: Option<String>,

        /// Software version for page headers
        #[arg(long)]
        version: Option<String>,

        /// Code lines per page
        #[arg(long)]
        lines_per_page: Option<usize>,

        /// File extensions to include (repeatable), e.g. -e .py -e .java
        #[arg(short = 'e', long = "extension")]
        extensions: Vec<String>,

        /// Directories to exclude (repeatable), e.g. -x venv
        #[arg(short = 'x', long = "exclude-dir")]
        exclude_dirs: Vec<String>,

        /// Save the effective configuration back to the config file
        #[arg(long)]
        save_config: bool,
    },

    /// Post-process a generated document (or a directory of documents)
    Process {
        /// Input document, or a directory for batch mode
        input: PathBuf,

        /// Output path (batch mode: output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path for the deleted-content report (single-document mode)
        #[arg(long)]
        deleted: Option<PathBuf>,

        /// Remove file-name header lines
        #[arg(long)]
        remove_filenames: bool,

        /// Remove multi-line comment blocks
        #[arg(long)]
        remove_large: bool,

        /// Remove English-classified comments
        #[arg(long)]
        remove_english: bool,

        /// Randomly remove 1 of every N isolated single comments (0 = off)
        #[arg(long, default_value_t = 0)]
        ratio: u32,

        /// Seed for reproducible random removal
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sofcert=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) if path.exists() => Config::load(path)?,
        _ => Config::default(),
    };

    match cli.command {
        Command::Generate {
            source_dir,
            output,
            name,
            version,
            lines_per_page,
            extensions,
            exclude_dirs,
            save_config,
        } => {
            let mut config = config;
            if let Some(dir) = source_dir {
                config.source_dir = dir.to_string_lossy().into_owned();
            }
            if let Some(out) = output {
                config.output_path = out.to_string_lossy().into_owned();
            }
            if let Some(name) = name {
                config.software_name = name;
            }
            if let Some(version) = version {
                config.software_version = version;
            }
            if let Some(n) = lines_per_page {
                config.lines_per_page = n;
            }
            if !extensions.is_empty() {
                config.file_extensions = extensions;
            }
            if !exclude_dirs.is_empty() {
                config.exclude_dirs = exclude_dirs;
            }

            config.ensure_valid()?;

            if save_config {
                if let Some(path) = &cli.config {
                    config.save(path)?;
                    info!(path = %path.display(), "configuration saved");
                }
            }

            run_generate(&config)
        }

        Command::Process {
            input,
            output,
            deleted,
            remove_filenames,
            remove_large,
            remove_english,
            ratio,
            seed,
        } => {
            let options = ProcessOptions {
                remove_filenames,
                redaction: RedactionOptions {
                    remove_large,
                    remove_english,
                    remove_ratio: ratio,
                },
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run_process(&input, output, deleted, &options, &mut rng)
        }
    }
}

fn run_generate(config: &Config) -> Result<()> {
    info!(source_dir = %config.source_dir, "scanning source tree");

    let scanner = FileScanner::new(
        config.filter_config(),
        config.backend_identifier_set(),
        config.frontend_identifier_set(),
    );
    let set = scanner.scan(config.source_dir.as_ref());
    info!(
        backend = set.backend.len(),
        frontend = set.frontend.len(),
        "files classified"
    );

    let merged = merge_sources(&set, None);
    for (path, count) in scanner.file_info(&merged.processed_files) {
        debug!(path = %path.display(), lines = count, "file included");
    }
    info!(
        files = merged.processed_files.len(),
        lines = merged.lines.len(),
        "sources merged"
    );

    let layout = DocumentLayout {
        software_name: config.software_name.clone(),
        software_version: config.software_version.clone(),
        lines_per_page: config.lines_per_page,
    };
    let path = generate_document(&merged.lines, &config.output_path(), &layout)?;
    println!("document generated: {}", path.display());

    Ok(())
}

fn run_process(
    input: &PathBuf,
    output: Option<PathBuf>,
    deleted: Option<PathBuf>,
    options: &ProcessOptions,
    rng: &mut StdRng,
) -> Result<()> {
    if !options.remove_filenames && !options.redaction.any_active() {
        warn!("no removal options enabled; documents will pass through unchanged");
    }

    if input.is_dir() {
        let output_dir = output.unwrap_or_else(|| input.join("processed"));
        let entries = process_batch(input, &output_dir, options, rng)?;
        let ok = entries.iter().filter(|e| e.result.is_ok()).count();
        println!("processed {}/{} documents into {}", ok, entries.len(), output_dir.display());
        return Ok(());
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let output = output.unwrap_or_else(|| input.with_file_name(format!("{}_processed.txt", stem)));
    let deleted =
        deleted.unwrap_or_else(|| input.with_file_name(format!("{}_deleted.txt", stem)));

    let report = process_document(input, &output, &deleted, options, rng)?;
    let stats = &report.stats;
    println!("processed document: {}", report.output_path.display());
    println!("deleted-content report: {}", report.deleted_path.display());
    println!(
        "lines: {} total, {} remaining ({} filenames, {} large, {} english, {} random removed)",
        stats.total_lines,
        stats.remaining_lines,
        stats.deleted_filenames,
        stats.deleted_large_comments,
        stats.deleted_english_comments,
        stats.deleted_random_comments,
    );

    Ok(())
}
