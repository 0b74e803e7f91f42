//! CRLF → LF normalization.
//!
//! Works on raw bytes so it is safe for any ASCII-compatible encoding.
//! Lone `\r` and lone `\n` are left as they are.

use std::path::Path;

use crate::error::{read_file, write_file, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingOutcome {
    /// No `\r\n` present; nothing written.
    Unchanged,
    /// `replaced` CRLF pairs were rewritten as LF.
    Normalized { replaced: usize },
}

/// Replace every `\r\n` in `bytes` with `\n`.  Returns `None` when there
/// is nothing to replace.
pub fn crlf_to_lf(bytes: &[u8]) -> Option<(Vec<u8>, usize)> {
    if !bytes.windows(2).any(|w| w == b"\r\n") {
        return None;
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut replaced = 0;
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&b'\n') {
            replaced += 1;
            continue;
        }
        out.push(b);
    }
    Some((out, replaced))
}

/// Rewrite the file at `path` with LF line endings, only if it has CRLF.
pub fn normalize_line_endings(path: &Path) -> Result<LineEndingOutcome> {
    let bytes = read_file(path)?;
    match crlf_to_lf(&bytes) {
        Some((normalized, replaced)) => {
            write_file(path, &normalized)?;
            Ok(LineEndingOutcome::Normalized { replaced })
        }
        None => Ok(LineEndingOutcome::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn replaces_only_crlf_pairs() {
        let (out, n) = crlf_to_lf(b"a\r\nb\rc\n\r\r\n").unwrap();
        assert_eq!(out, b"a\nb\rc\n\r\n");
        assert_eq!(n, 2);
    }

    #[test]
    fn lf_only_input_needs_nothing() {
        assert_eq!(crlf_to_lf(b"line1\nline2\n"), None);
        assert_eq!(crlf_to_lf(b""), None);
        assert_eq!(crlf_to_lf(b"trailing\r"), None);
    }

    #[test]
    fn rewrites_crlf_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.c");
        std::fs::write(&path, "line1\r\nline2\r\n").unwrap();

        let outcome = normalize_line_endings(&path).unwrap();
        assert_eq!(outcome, LineEndingOutcome::Normalized { replaced: 2 });
        assert_eq!(std::fs::read(&path).unwrap(), b"line1\nline2\n");

        assert_eq!(
            normalize_line_endings(&path).unwrap(),
            LineEndingOutcome::Unchanged
        );
    }

    #[test]
    fn preserves_non_utf8_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.h");
        std::fs::write(&path, b"\xd6\xd0\r\n\xff\r\n").unwrap();

        normalize_line_endings(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\xd6\xd0\n\xff\n");
    }
}
