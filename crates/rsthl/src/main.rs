//! rst2html-highlight CLI.
//!
//! Generates (X)HTML documents from standalone reStructuredText sources,
//! marking up the content of `code-block` directives with syntax classes.

mod commands;
mod error;
mod output;

use std::error::Error as _;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// Convert reStructuredText to HTML with syntax highlighted code blocks.
///
/// Reads from SOURCE (default: stdin) and writes to DESTINATION
/// (default: stdout). Needs a stylesheet styling the token classes; the
/// built-in one is embedded unless stylesheets are configured.
#[derive(Parser)]
#[command(name = "rst2html-highlight", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let traceback = cli.convert.traceback;
    if let Err(err) = cli.convert.execute() {
        output.error(&format!("Error: {err}"));
        if traceback {
            for cause in std::iter::successors(err.source(), |&e| e.source()) {
                output.error(&format!("  Caused by: {cause}"));
            }
        }
        std::process::exit(1);
    }
}
