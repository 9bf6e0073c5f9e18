//! Typed error handling for switchcase.
//!
//! Provides structured errors that library consumers can match on,
//! one distinct variant per failure kind in the dispatch contract.

use thiserror::Error;

/// Main error type for dispatcher operations.
///
/// Every variant is fatal to the enclosing switch scope: nothing is
/// retried or recovered internally, the error is handed straight back
/// to the caller.
#[derive(Error, Debug)]
pub enum SwitchError {
    /// A case was registered after the default case.
    #[error("case {key} registered after the default case")]
    CaseAfterDefault { key: String },

    /// The same scalar, membership, or range key appears in two cases.
    #[error("key {key} is used in more than one case")]
    DuplicateKey { key: String },

    /// An equivalent pattern (same source and same flags) was already
    /// registered.
    #[error("pattern {pattern:?} is used in more than one case")]
    DuplicatePattern { pattern: String },

    /// The same predicate function was already registered.
    #[error("predicate is used in more than one case")]
    DuplicatePredicate,

    /// A pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Finalization was reached with no default case registered, or
    /// with nothing at all to invoke.
    #[error("no default case given or no matches")]
    NoDefault,

    /// The result was read before finalization completed.
    #[error("no result has been returned from any case action")]
    NoResult,
}

impl SwitchError {
    /// Create a case-after-default error for the given key description.
    pub fn case_after_default(key: impl Into<String>) -> Self {
        Self::CaseAfterDefault { key: key.into() }
    }

    /// Create a duplicate-key error for the given key description.
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Create a duplicate-pattern error for the given pattern source.
    pub fn duplicate_pattern(pattern: impl Into<String>) -> Self {
        Self::DuplicatePattern {
            pattern: pattern.into(),
        }
    }

    /// Create an invalid-pattern error wrapping the compile failure.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Check if this error was raised while registering a matcher, as
    /// opposed to finalization or result access.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::CaseAfterDefault { .. }
                | Self::DuplicateKey { .. }
                | Self::DuplicatePattern { .. }
                | Self::DuplicatePredicate
                | Self::InvalidPattern { .. }
        )
    }

    /// Get the offending key or pattern description, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::CaseAfterDefault { key } => Some(key),
            Self::DuplicateKey { key } => Some(key),
            Self::DuplicatePattern { pattern } => Some(pattern),
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

/// Convenience type alias for dispatcher results.
pub type SwitchResult<T> = Result<T, SwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = SwitchError::duplicate_key("4");
        assert!(matches!(err, SwitchError::DuplicateKey { .. }));
        assert!(err.to_string().contains("more than one case"));
        assert_eq!(err.key(), Some("4"));
    }

    #[test]
    fn test_invalid_pattern_carries_source() {
        let compile_err = regex::Regex::new("(").unwrap_err();
        let err = SwitchError::invalid_pattern("(", compile_err);
        assert_eq!(err.key(), Some("("));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_is_registration() {
        assert!(SwitchError::case_after_default("7").is_registration());
        assert!(SwitchError::DuplicatePredicate.is_registration());
        assert!(!SwitchError::NoDefault.is_registration());
        assert!(!SwitchError::NoResult.is_registration());
    }

    #[test]
    fn test_finalization_errors_have_no_key() {
        assert_eq!(SwitchError::NoDefault.key(), None);
        assert_eq!(SwitchError::NoResult.key(), None);
    }
}
