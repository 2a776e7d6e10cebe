//! # bars-tool
//!
//! Command line extractor for BARS audio containers, built on `bars-rs`.
//!
//! ## Usage
//! ```sh
//! bars-tool <input file or directory> <output directory>
//! ```
//! Each input gets its own `<output>/<input name>_out` directory.
use bars_rs::bars_archive::{output_dir_for, BarsArchive};
use bars_rs::diagnostics::LogSink;
use bars_rs::error::BarsError;
use clap::{CommandFactory, Parser};
use glob::glob;
use log::{error, info, LevelFilter};
use std::path::{Path, PathBuf};
use std::process::exit;

#[derive(Debug, Parser)]
#[command(
    name = "bars-tool",
    version,
    about = "A utility to extract BARS files. \
             (currently only supporting Nintendo Switch Sports and other v5 AMTA metadata files)"
)]
struct Cli {
    /// Input file or directory.
    input: PathBuf,

    /// Output directory (creates subdirectory for each input file).
    output: PathBuf,

    /// Log failed inputs and carry on with the rest of the batch.
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// More output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors.
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    if std::env::args_os().len() <= 1 {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("error: {e}");
        }
        exit(1);
    }
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(failed) = run(&cli) {
        error!("{failed} input(s) could not be extracted");
        exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Runs the batch. On failure returns how many inputs failed.
fn run(cli: &Cli) -> Result<(), usize> {
    if !cli.input.exists() {
        error!("Input file/folder does not exist!");
        return Err(1);
    }

    let files = match collect_inputs(&cli.input) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to list {}: {e}", cli.input.display());
            return Err(1);
        }
    };
    info!("Files to analyze: {}", files.len());

    let mut failed = 0;
    for file in &files {
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Parsing file \"{name}\"");

        if let Err(e) = extract_file(file, &cli.output) {
            error!("{name}: {e}");
            failed += 1;
            if !cli.keep_going {
                return Err(failed);
            }
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(failed)
    }
}

fn extract_file(file: &Path, output: &Path) -> Result<(), BarsError> {
    let mut sink = LogSink;
    let archive = BarsArchive::open(file, &mut sink)?;
    archive.extract_to(output_dir_for(output, file), &mut sink)?;
    Ok(())
}

/// A single file, or every regular file directly inside a directory.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, String> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let dir = glob::Pattern::escape(&input.display().to_string());
    let pattern = format!("{dir}/*");
    let mut files = Vec::new();
    for entry in glob(&pattern).map_err(|e| format!("{e}"))? {
        let path = entry.map_err(|e| format!("{e}"))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
