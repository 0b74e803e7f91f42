//! Errors that abort a normalization run.
//!
//! Decode failures are not errors; they surface as
//! [`EncodingOutcome`](crate::core::encoding::EncodingOutcome) values.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to walk {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The notice sink (stdout) rejected a write.
    #[error("failed to report progress")]
    Report(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Read a whole file, tagging failures with the path.
pub(crate) fn read_file(path: &std::path::Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| NormalizeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite a whole file in place, tagging failures with the path.
pub(crate) fn write_file(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
