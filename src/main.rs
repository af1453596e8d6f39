//! json-tree CLI.
//!
//! Checks, reformats and conformance-tests JSON documents from the command line.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use json_tree::json::{self, Limits, Value};
use json_tree::{CorpusRunner, TestResult};

#[derive(Parser)]
#[command(name = "json-tree")]
#[command(about = "Canonical JSON codec", long_about = None)]
#[command(version)]
struct Cli {
    /// Apply strict resource limits for untrusted input
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,

    /// Parse a document and report the first syntax error
    Check {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,
    },

    /// Re-emit a document in canonical form
    Format {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,
    },

    /// Run a conformance corpus
    Conformance {
        /// Corpus file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let limits = if cli.strict {
        Limits::strict()
    } else {
        Limits::default()
    };

    match cli.command {
        Some(Commands::Version) => {
            println!("json-tree v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Some(Commands::Check { path }) => match read_document(path.as_deref(), limits) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        },
        Some(Commands::Format { path }) => {
            let value = match read_document(path.as_deref(), limits) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match json::write(&value, &mut out).and_then(|()| out.flush()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Some(Commands::Conformance { path }) => run_conformance(&path),
        None => {
            println!("json-tree v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_document(path: Option<&Path>, limits: Limits) -> json_tree::Result<Value> {
    match path {
        Some(path) => json::from_reader_with_limits(File::open(path)?, limits),
        None => json::from_reader_with_limits(io::stdin().lock(), limits),
    }
}

fn run_conformance(path: &Path) -> ExitCode {
    let runner = match CorpusRunner::load(path) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("error: cannot load corpus {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let results = runner.run_all();
    for (id, result) in results.select(|r| !r.is_pass()) {
        match result {
            TestResult::Fail { expected, actual } => {
                println!("FAIL {}: expected {}, got {}", id, expected, actual)
            }
            TestResult::Skip { reason } => println!("SKIP {}: {}", id, reason),
            TestResult::Error { message } => println!("ERROR {}: {}", id, message),
            TestResult::Pass => {}
        }
    }
    println!("{}", results.summary());

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
