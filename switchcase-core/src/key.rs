//! Case-key registry types.
//!
//! Every matcher a dispatcher accepts (scalar equality, membership,
//! range, pattern, predicate) is recorded in a single registry so
//! duplicate registrations are rejected across all matcher kinds. The
//! registry key is a tagged union with kind-aware equality: two keys
//! are equal only when they are the same kind *and* their payloads
//! compare equal. A native `Eq`/`Hash` cannot span these incompatible
//! shapes, hence the explicit variant-by-variant comparison.

use std::fmt;
use std::ops::Bound;

use serde::Serialize;

use crate::pattern::PatternFlags;

/// Matcher kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Scalar equality against the subject.
    Value,
    /// Membership in an explicit candidate list.
    OneOf,
    /// Membership in a range of values.
    Range,
    /// Anchored regex match against the subject text.
    Pattern,
    /// Caller-supplied predicate over the subject.
    Predicate,
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::OneOf => write!(f, "one-of"),
            Self::Range => write!(f, "range"),
            Self::Pattern => write!(f, "pattern"),
            Self::Predicate => write!(f, "predicate"),
        }
    }
}

/// A registered case key, one variant per matcher kind.
#[derive(Debug)]
pub enum CaseKey<T> {
    /// Scalar key compared with `==`.
    Value(T),
    /// Candidate list; the subject matches when it is a member.
    OneOf(Vec<T>),
    /// Range bounds; the subject matches when contained.
    Range {
        start: Bound<T>,
        end: Bound<T>,
    },
    /// Pattern source plus its compilation flags.
    Pattern {
        source: String,
        flags: PatternFlags,
    },
    /// Predicate function, identified by its address.
    Predicate(fn(&T) -> bool),
}

impl<T> CaseKey<T> {
    /// The matcher kind of this key.
    pub fn kind(&self) -> CaseKind {
        match self {
            Self::Value(_) => CaseKind::Value,
            Self::OneOf(_) => CaseKind::OneOf,
            Self::Range { .. } => CaseKind::Range,
            Self::Pattern { .. } => CaseKind::Pattern,
            Self::Predicate(_) => CaseKind::Predicate,
        }
    }

    /// Human-readable key description for error messages and reports.
    pub fn describe(&self) -> String
    where
        T: fmt::Debug,
    {
        match self {
            Self::Value(v) => format!("{:?}", v),
            Self::OneOf(vs) => format!("{:?}", vs),
            Self::Range { start, end } => describe_range(start, end),
            Self::Pattern { source, .. } => format!("/{}/", source),
            Self::Predicate(p) => format!("<predicate@{:p}>", p),
        }
    }
}

impl<T: PartialEq> PartialEq for CaseKey<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::OneOf(a), Self::OneOf(b)) => a == b,
            (
                Self::Range { start: a, end: b },
                Self::Range { start: c, end: d },
            ) => a == c && b == d,
            (
                Self::Pattern { source: a, flags: fa },
                Self::Pattern { source: b, flags: fb },
            ) => a == b && fa == fb,
            // Function pointers are compared by address; two distinct
            // functions with identical behavior are distinct keys.
            (Self::Predicate(a), Self::Predicate(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

fn describe_range<T: fmt::Debug>(start: &Bound<T>, end: &Bound<T>) -> String {
    let lo = match start {
        Bound::Included(v) => format!("{:?}", v),
        Bound::Excluded(v) => format!("{:?}<", v),
        Bound::Unbounded => String::new(),
    };
    let hi = match end {
        Bound::Included(v) => format!("={:?}", v),
        Bound::Excluded(v) => format!("{:?}", v),
        Bound::Unbounded => String::new(),
    };
    format!("{}..{}", lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &i32) -> bool {
        true
    }

    fn never(_: &i32) -> bool {
        false
    }

    #[test]
    fn test_same_kind_equality() {
        assert_eq!(CaseKey::Value(4), CaseKey::Value(4));
        assert_ne!(CaseKey::Value(4), CaseKey::Value(5));
        assert_eq!(CaseKey::OneOf(vec![1, 2]), CaseKey::OneOf(vec![1, 2]));
        // Candidate lists are ordered; a permutation is a different key.
        assert_ne!(CaseKey::OneOf(vec![1, 2]), CaseKey::OneOf(vec![2, 1]));
    }

    #[test]
    fn test_cross_kind_never_equal() {
        let scalar = CaseKey::Value(1);
        let list = CaseKey::OneOf(vec![1]);
        assert_ne!(scalar, list);

        let pattern: CaseKey<i32> = CaseKey::Pattern {
            source: "1".into(),
            flags: PatternFlags::new(),
        };
        let predicate: CaseKey<i32> = CaseKey::Predicate(always);
        assert_ne!(pattern, predicate);
    }

    #[test]
    fn test_pattern_equality_includes_flags() {
        let a: CaseKey<i32> = CaseKey::Pattern {
            source: "x".into(),
            flags: PatternFlags::new(),
        };
        let b: CaseKey<i32> = CaseKey::Pattern {
            source: "x".into(),
            flags: PatternFlags::new().case_insensitive(true),
        };
        assert_ne!(a, b, "same source with different flags is a distinct key");
    }

    #[test]
    fn test_predicate_identity() {
        let a: CaseKey<i32> = CaseKey::Predicate(always);
        let b: CaseKey<i32> = CaseKey::Predicate(always);
        let c: CaseKey<i32> = CaseKey::Predicate(never);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_range_equality() {
        let a: CaseKey<i32> = CaseKey::Range {
            start: Bound::Included(1),
            end: Bound::Excluded(10),
        };
        let b: CaseKey<i32> = CaseKey::Range {
            start: Bound::Included(1),
            end: Bound::Excluded(10),
        };
        let c: CaseKey<i32> = CaseKey::Range {
            start: Bound::Included(1),
            end: Bound::Included(10),
        };
        assert_eq!(a, b);
        assert_ne!(a, c, "inclusive and exclusive ends are distinct keys");
    }

    #[test]
    fn test_describe() {
        assert_eq!(CaseKey::Value(4).describe(), "4");
        assert_eq!(CaseKey::OneOf(vec![1, 2]).describe(), "[1, 2]");
        let range: CaseKey<i32> = CaseKey::Range {
            start: Bound::Included(1),
            end: Bound::Excluded(10),
        };
        assert_eq!(range.describe(), "1..10");
        let pattern: CaseKey<i32> = CaseKey::Pattern {
            source: "^h".into(),
            flags: PatternFlags::new(),
        };
        assert_eq!(pattern.describe(), "/^h/");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CaseKind::OneOf.to_string(), "one-of");
        assert_eq!(CaseKind::Predicate.to_string(), "predicate");
    }
}
