//! Pattern compilation for regex cases.
//!
//! Patterns are anchored at the start of the subject text: a case
//! matches when its pattern matches a *prefix* of the text, not only
//! when it matches the whole text.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{SwitchError, SwitchResult};

/// Compilation flags for pattern cases.
///
/// Two pattern registrations count as duplicates only when both the
/// pattern source and the flags are equal.
///
/// # Example
///
/// ```rust,ignore
/// let flags = PatternFlags::new().case_insensitive(true);
/// s.matches_with("hel+o", flags, || "greeting")?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PatternFlags {
    /// Letters match regardless of case (`(?i)`).
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries (`(?m)`).
    pub multi_line: bool,
    /// `.` also matches `\n` (`(?s)`).
    pub dot_matches_new_line: bool,
    /// Whitespace in the pattern is ignored (`(?x)`).
    pub ignore_whitespace: bool,
}

impl PatternFlags {
    /// Create flags with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Enable or disable multi-line mode.
    pub fn multi_line(mut self, enabled: bool) -> Self {
        self.multi_line = enabled;
        self
    }

    /// Enable or disable `.` matching `\n`.
    pub fn dot_matches_new_line(mut self, enabled: bool) -> Self {
        self.dot_matches_new_line = enabled;
        self
    }

    /// Enable or disable ignoring pattern whitespace.
    pub fn ignore_whitespace(mut self, enabled: bool) -> Self {
        self.ignore_whitespace = enabled;
        self
    }
}

/// Compiles a pattern with the given flags, anchored at the start.
///
/// The user-supplied source is wrapped as `\A(?:source)` so that
/// `is_match` means "matches a prefix of the text". Errors report the
/// original source, not the wrapped form.
pub(crate) fn compile(source: &str, flags: PatternFlags) -> SwitchResult<Regex> {
    let anchored = format!(r"\A(?:{})", source);
    RegexBuilder::new(&anchored)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .ignore_whitespace(flags.ignore_whitespace)
        .build()
        .map_err(|e| SwitchError::invalid_pattern(source, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_matches_prefix_only() {
        let re = compile("hel+o", PatternFlags::new()).unwrap();
        assert!(re.is_match("hello world"), "prefix match should succeed");
        assert!(!re.is_match("say hello"), "mid-string match must not count");
    }

    #[test]
    fn test_compile_not_full_match() {
        // Anchored at the start only, never at the end.
        let re = compile("h", PatternFlags::new()).unwrap();
        assert!(re.is_match("hello"));
    }

    #[test]
    fn test_compile_case_insensitive() {
        let flags = PatternFlags::new().case_insensitive(true);
        let re = compile("hello", flags).unwrap();
        assert!(re.is_match("HELLO there"));
        let plain = compile("hello", PatternFlags::new()).unwrap();
        assert!(!plain.is_match("HELLO there"));
    }

    #[test]
    fn test_compile_invalid_pattern() {
        let err = compile("(unclosed", PatternFlags::new()).unwrap_err();
        match err {
            SwitchError::InvalidPattern { pattern, .. } => {
                assert_eq!(pattern, "(unclosed", "error must report the original source");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_equality() {
        let a = PatternFlags::new().case_insensitive(true);
        let b = PatternFlags::new().case_insensitive(true);
        assert_eq!(a, b);
        assert_ne!(a, PatternFlags::new());
    }
}
