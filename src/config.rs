//! Run configuration: roots, encodings, and the extension allow-list.
//!
//! Everything except the root list and symlink policy is a compile-time
//! constant.  [`NormalizeConfig`] is built once at the CLI boundary and
//! passed down to the walker.

use std::path::PathBuf;

use encoding_rs::Encoding;

// ───────────────────────────────────────── constants ─────────

/// Roots scanned when `--path` is not given.
pub const DEFAULT_ROOTS: &[&str] = &["KBase", "KRender", "KEngine", "KEditor"];

/// File extensions eligible for normalization (exact, case-sensitive).
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp", "c", "h"];

// ───────────────────────────────────────── config ────────────

/// Everything the walker needs to know for one run.
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    pub roots: Vec<PathBuf>,
    pub target: &'static Encoding,
    pub candidates: Vec<&'static Encoding>,
    /// Allow-listed extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Follow symbolic links.  Loops are detected and skipped.
    pub follow_symlinks: bool,
}

impl NormalizeConfig {
    /// Config with the built-in encodings and extensions for `roots`.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            target: encoding_rs::UTF_8,
            // Legacy encodings tried in order when a file is not valid UTF-8.
            candidates: vec![encoding_rs::GBK],
            extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_symlinks: false,
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Does `ext` (no leading dot) pass the allow-list?
    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOTS.iter().map(PathBuf::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots_match_project_layout() {
        let config = NormalizeConfig::default();
        let roots: Vec<_> = config
            .roots
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(roots, ["KBase", "KRender", "KEngine", "KEditor"]);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn extension_match_is_exact() {
        let config = NormalizeConfig::new(Vec::new());
        assert!(config.is_allowed_extension("cpp"));
        assert!(config.is_allowed_extension("h"));
        assert!(!config.is_allowed_extension("CPP"));
        assert!(!config.is_allowed_extension("hpp"));
        assert!(!config.is_allowed_extension(""));
    }

    #[test]
    fn encodings_are_utf8_then_gbk() {
        let config = NormalizeConfig::new(Vec::new());
        assert_eq!(config.target, encoding_rs::UTF_8);
        assert_eq!(config.candidates, vec![encoding_rs::GBK]);
    }
}
