//! Core normalization: encoding detection, line endings, and tree walking.
//!
//! Everything here is synchronous and single-threaded.  Progress notices go
//! to a caller-supplied writer so the binary can point them at stdout.

pub mod encoding;
pub mod line_endings;
pub mod walk;
