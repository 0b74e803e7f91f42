//! Normalize C/C++ source trees to UTF-8 with LF line endings.
//!
//! Files that are not valid UTF-8 but decode as GBK are transcoded, and
//! CRLF terminators are rewritten as LF.  Files are modified in place; one
//! line per rewrite is printed to stdout.

mod config;
mod core;
mod error;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{NormalizeConfig, DEFAULT_ROOTS};
use crate::core::walk::Normalizer;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Normalize source trees to UTF-8 + LF")]
struct Cli {
    /// Comma-separated list of root directories to scan.
    #[arg(long = "path", value_delimiter = ',', default_values = DEFAULT_ROOTS.iter().copied())]
    roots: Vec<PathBuf>,

    /// Follow symbolic links (loops are detected and skipped).
    #[arg(long)]
    follow_symlinks: bool,
}

impl Cli {
    fn into_config(self) -> NormalizeConfig {
        NormalizeConfig::new(self.roots).with_follow_symlinks(self.follow_symlinks)
    }
}

// ───────────────────────────────────────── main ─────────────

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();
    tracing::debug!("roots: {:?}", config.roots);

    let stdout = io::stdout().lock();
    let mut normalizer = Normalizer::new(config, stdout);
    let summary = normalizer.run().context("normalization aborted")?;

    normalizer.into_output().flush()?;

    tracing::info!(
        "examined {} files ({} ignored, {} entries skipped): {} transcoded, {} line endings fixed, {} undecodable",
        summary.files_examined,
        summary.files_ignored,
        summary.entries_skipped,
        summary.encoding_converted,
        summary.line_endings_normalized,
        summary.encoding_unrecognized,
    );
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout only carries rewrite notices.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            eprintln!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots_without_flag() {
        let cli = Cli::try_parse_from(["tree-normalize"]).unwrap();
        let roots: Vec<_> = cli.roots.iter().map(|p| p.display().to_string()).collect();
        assert_eq!(roots, DEFAULT_ROOTS);
        assert!(!cli.follow_symlinks);
    }

    #[test]
    fn path_flag_splits_on_commas() {
        let cli = Cli::try_parse_from(["tree-normalize", "--path", "src,include"]).unwrap();
        let config = cli.into_config();
        assert_eq!(config.roots, [PathBuf::from("src"), PathBuf::from("include")]);
    }

    #[test]
    fn follow_symlinks_flag() {
        let cli = Cli::try_parse_from(["tree-normalize", "--follow-symlinks"]).unwrap();
        assert!(cli.into_config().follow_symlinks);
    }
}
