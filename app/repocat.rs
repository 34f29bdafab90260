//! Command-line interface for repocat.
//!
//! Writes the directory tree and file contents of a project to stdout, ready
//! to be redirected into a file. Diagnostics go to stderr.

use clap::Parser;
use repocat::{DEFAULT_IGNORE_FILE, Encoding, ScanBuilder, ScanOptions, repocat};
use std::io::{self, BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::exit;
use tracing::{Level, debug, error, warn};

/// Concatenate a directory tree and its files into one LLM-ready document
#[derive(Parser)]
#[command(name = "repocat", version, about, long_about = None)]
struct Cli {
    /// Directory to scan
    root: PathBuf,

    /// Only include files whose name ends with one of these (e.g. .go .js)
    file_types: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Exclude test files from known languages
    #[arg(short = 't', long)]
    exclude_tests: bool,

    /// Add pattern to exclude (can be repeated, e.g. vendor/)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude_patterns: Vec<String>,

    /// Only read files directly inside the root directory
    #[arg(long)]
    no_recurse: bool,

    /// Include dotfiles and dot-directories
    #[arg(long)]
    hidden: bool,

    /// Exclusion file, relative to the root unless absolute
    #[arg(long, value_name = "PATH", default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: PathBuf,

    /// Count tokens in the output
    #[arg(short = 'c', long)]
    count_tokens: bool,

    /// Tokenizer model or encoding used with --count-tokens
    #[arg(short, long, default_value = "cl100k_base", value_parser = parse_encoding)]
    model: Encoding,
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    s.parse()
}

impl Cli {
    fn into_options(self) -> ScanOptions {
        ScanBuilder::new(self.root)
            .file_types(self.file_types)
            .recursive(!self.no_recurse)
            .verbose(self.verbose)
            .exclude_tests(self.exclude_tests)
            .exclude_patterns(self.exclude_patterns)
            .ignore_file(Some(self.ignore_file))
            .include_hidden(self.hidden)
            .count_tokens(self.count_tokens)
            .encoding(self.model)
            .build()
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let options = Cli::parse().into_options();
    init_logging(options.verbose);
    debug!("Version: {}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = repocat(&options, &mut out);
    drop(out);

    match result {
        Ok(report) => {
            if report.has_failures() {
                warn!("{} file(s) could not be read", report.failures.len());
            }
            debug!(
                "Scan complete: {} emitted, {} skipped",
                report.files_emitted, report.files_skipped
            );
        }
        Err(e) => {
            error!("Scan failed: {}", e);
            exit(e.exit_code());
        }
    }
}
