//! switchcase-core: a scoped switch/case dispatcher for Rust.
//!
//! This library provides a multi-way branch construct built around a
//! single dispatcher object: it takes a subject value, accumulates an
//! ordered sequence of candidate matchers inside a closure scope, and
//! fires the first match's action (or, with fallthrough, every action
//! registered after the match) when the scope exits.
//!
//! # Features
//!
//! - **Scalar cases**: `case(4, ..)` matches by equality
//! - **Membership cases**: `case_in([1, 2, 3], ..)` and `case_range(0..10, ..)`
//! - **Pattern cases**: anchored-at-start regex, stringified or raw subjects
//! - **Predicate cases**: plain `fn(&T) -> bool`, evaluated at registration
//! - **Fallthrough**: per-dispatcher or per-case, last action's result wins
//! - **Typed errors**: duplicate keys, cases after the default, missing
//!   defaults, and early result reads are each a distinct error kind
//! - **Guaranteed finalization**: the scope runner is the only way to
//!   construct a dispatcher, so dispatch runs exactly once per scope and
//!   a failing scope body passes through untouched
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use switchcase_core::prelude::*;
//!
//! let label: Result<&str, SwitchError> = switch(code, |s| {
//!     s.case(200, || "ok")?;
//!     s.case_range(300..400, || "redirect")?;
//!     s.matches("5[0-9]{2}", || "server error")?;
//!     s.default(|| "unknown");
//!     Ok(())
//! });
//! ```
//!
//! # Module Organization
//!
//! - [`dispatch`]: The dispatcher, its scope runners, and registration ops
//! - [`key`]: Tagged-union case keys with kind-aware equality
//! - [`pattern`]: Pattern flags and anchored compilation
//! - [`error`]: Typed error handling
//! - [`report`]: Serializable dispatch diagnostics
//! - [`logging`]: Structured logging setup for embedding applications

pub mod dispatch;
pub mod error;
pub mod key;
pub mod logging;
pub mod pattern;
pub mod prelude;
pub mod report;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Scope runners and the dispatcher itself
pub use dispatch::{switch, switch_fallthrough, Action, Switch};

// Error types
pub use error::{SwitchError, SwitchResult};

// Registry keys
pub use key::{CaseKey, CaseKind};

// Pattern flags
pub use pattern::PatternFlags;

// Diagnostics
pub use report::{DispatchReport, KeySummary};

// Logging
pub use logging::init_structured_logging;
