//! Tree traversal: walk each root and normalize every eligible file.
//!
//! The walk is sequential and depth-first, with entries sorted by file name
//! so runs are reproducible.  Any I/O error aborts the whole run; decode
//! misses are logged and counted.

use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::encoding::{self, EncodingOutcome};
use super::line_endings::{self, LineEndingOutcome};
use crate::config::NormalizeConfig;
use crate::error::{NormalizeError, Result};

/// Counts gathered over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Allow-listed files that were examined.
    pub files_examined: usize,
    /// Regular files outside the allow-list.
    pub files_ignored: usize,
    /// Symlinks, sockets, devices and symlink loops.
    pub entries_skipped: usize,
    pub encoding_converted: usize,
    /// Files no candidate encoding could decode.
    pub encoding_unrecognized: usize,
    pub line_endings_normalized: usize,
}

/// Walks roots and normalizes files, writing one notice per rewrite to `out`.
pub struct Normalizer<W> {
    config: NormalizeConfig,
    out: W,
    summary: RunSummary,
}

impl<W: Write> Normalizer<W> {
    pub fn new(config: NormalizeConfig, out: W) -> Self {
        Self {
            config,
            out,
            summary: RunSummary::default(),
        }
    }

    /// Normalize every configured root, in order.
    pub fn run(&mut self) -> Result<RunSummary> {
        let roots = self.config.roots.clone();
        self.normalize(&roots)
    }

    /// Normalize every file under `roots`.  Stops at the first I/O error.
    pub fn normalize(&mut self, roots: &[PathBuf]) -> Result<RunSummary> {
        for root in roots {
            self.normalize_root(root)?;
        }
        Ok(self.summary.clone())
    }

    fn normalize_root(&mut self, root: &Path) -> Result<()> {
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    tracing::warn!(
                        "skipping symlink loop: {}",
                        err.path().map(|p| p.display().to_string()).unwrap_or_default()
                    );
                    self.summary.entries_skipped += 1;
                    continue;
                }
                Err(source) => {
                    return Err(NormalizeError::Walk {
                        root: root.to_path_buf(),
                        source,
                    })
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                tracing::debug!("skipping non-regular entry {}", entry.path().display());
                self.summary.entries_skipped += 1;
                continue;
            }

            let path = entry.path();
            let allowed = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.config.is_allowed_extension(ext));
            if allowed {
                self.normalize_file(path)?;
            } else {
                self.summary.files_ignored += 1;
            }
        }
        Ok(())
    }

    /// Encoding first, then line endings.
    pub fn normalize_file(&mut self, path: &Path) -> Result<()> {
        self.summary.files_examined += 1;
        self.normalize_encoding(path)?;
        self.normalize_line_endings(path)?;
        Ok(())
    }

    pub fn normalize_encoding(&mut self, path: &Path) -> Result<EncodingOutcome> {
        let target = self.config.target;
        let outcome = encoding::normalize_encoding(path, target, &self.config.candidates)?;
        match &outcome {
            EncodingOutcome::AlreadyTarget => {}
            EncodingOutcome::Converted { from } => {
                tracing::debug!("{} decoded as {}", path.display(), from.name());
                self.summary.encoding_converted += 1;
                let label = target.name().to_lowercase();
                self.notice(format_args!("convert into {label} {}", path.display()))?;
            }
            EncodingOutcome::NoCandidate { attempts } => {
                for attempt in attempts {
                    if let Err(failure) = &attempt.result {
                        tracing::debug!(
                            "{}: not {} ({failure})",
                            path.display(),
                            attempt.encoding.name()
                        );
                    }
                }
                tracing::warn!("{}: no candidate encoding matched, left as is", path.display());
                self.summary.encoding_unrecognized += 1;
            }
        }
        Ok(outcome)
    }

    pub fn normalize_line_endings(&mut self, path: &Path) -> Result<LineEndingOutcome> {
        let outcome = line_endings::normalize_line_endings(path)?;
        if let LineEndingOutcome::Normalized { replaced } = outcome {
            tracing::debug!("{}: {replaced} CRLF replaced", path.display());
            self.summary.line_endings_normalized += 1;
            self.notice(format_args!("convert into lf {}", path.display()))?;
        }
        Ok(outcome)
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn notice(&mut self, line: std::fmt::Arguments<'_>) -> Result<()> {
        writeln!(self.out, "{line}").map_err(NormalizeError::Report)
    }
}
