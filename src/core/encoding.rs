//! Encoding detection and transcoding to the target encoding.
//!
//! Every candidate is tried strictly (no replacement characters) and each
//! try is recorded as a [`CandidateAttempt`], so "nothing matched" is an
//! ordinary outcome rather than a swallowed error.

use std::fmt;
use std::path::Path;

use encoding_rs::{DecoderResult, Encoding};

use crate::error::{read_file, write_file, Result};

// ───────────────────────────────────────── outcomes ──────────

/// Why a strict decode under one encoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Malformed sequence of `len` bytes starting at `offset`.
    Malformed { offset: usize, len: usize },
    /// Input too large to size an output buffer for.
    TooLarge,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { offset, len } => {
                write!(f, "malformed {len}-byte sequence at offset {offset}")
            }
            Self::TooLarge => f.write_str("input too large"),
        }
    }
}

/// Result of trying one fallback encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAttempt {
    pub encoding: &'static Encoding,
    pub result: std::result::Result<(), DecodeFailure>,
}

/// What [`normalize_encoding`] decided for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingOutcome {
    /// Bytes already valid in the target encoding; nothing written.
    AlreadyTarget,
    /// Decoded under `from` and rewritten in the target encoding.
    Converted { from: &'static Encoding },
    /// No candidate decoded the bytes; file left untouched.
    NoCandidate { attempts: Vec<CandidateAttempt> },
}

// ───────────────────────────────────────── decoding ──────────

/// Decode `bytes` under `encoding`, failing on the first malformed
/// sequence.  BOMs are kept as ordinary characters.
pub fn decode_strict(
    encoding: &'static Encoding,
    bytes: &[u8],
) -> std::result::Result<String, DecodeFailure> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .ok_or(DecodeFailure::TooLarge)?;
    let mut text = String::with_capacity(capacity);
    let (result, read) = decoder.decode_to_string_without_replacement(bytes, &mut text, true);
    match result {
        DecoderResult::InputEmpty => Ok(text),
        DecoderResult::Malformed(bad, consumed_after) => {
            let len = usize::from(bad);
            let offset = read.saturating_sub(usize::from(consumed_after) + len);
            Err(DecodeFailure::Malformed { offset, len })
        }
        // Capacity was sized for the worst case.
        DecoderResult::OutputFull => Err(DecodeFailure::TooLarge),
    }
}

/// Is `bytes` already valid under `target`?
pub fn is_valid_in(target: &'static Encoding, bytes: &[u8]) -> bool {
    target
        .decode_without_bom_handling_and_without_replacement(bytes)
        .is_some()
}

/// Pick the first candidate that decodes `bytes`.  Returns the decoded
/// text with the winning encoding, or every failed attempt.
pub fn detect(
    candidates: &[&'static Encoding],
    bytes: &[u8],
) -> std::result::Result<(&'static Encoding, String), Vec<CandidateAttempt>> {
    let mut attempts = Vec::with_capacity(candidates.len());
    for &encoding in candidates {
        match decode_strict(encoding, bytes) {
            Ok(text) => return Ok((encoding, text)),
            Err(failure) => attempts.push(CandidateAttempt {
                encoding,
                result: Err(failure),
            }),
        }
    }
    Err(attempts)
}

// ───────────────────────────────────────── operation ─────────

/// Make the file at `path` valid in `target`.
///
/// Already-valid files are left alone.  Otherwise the first candidate that
/// decodes strictly wins and the file is overwritten with the text encoded
/// in `target`.  I/O errors propagate; decode failures do not.
pub fn normalize_encoding(
    path: &Path,
    target: &'static Encoding,
    candidates: &[&'static Encoding],
) -> Result<EncodingOutcome> {
    let bytes = read_file(path)?;
    if is_valid_in(target, &bytes) {
        return Ok(EncodingOutcome::AlreadyTarget);
    }

    match detect(candidates, &bytes) {
        Ok((from, text)) => {
            let (encoded, _, _) = target.encode(&text);
            write_file(path, &encoded)?;
            Ok(EncodingOutcome::Converted { from })
        }
        Err(attempts) => Ok(EncodingOutcome::NoCandidate { attempts }),
    }
}
