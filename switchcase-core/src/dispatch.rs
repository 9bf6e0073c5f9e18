//! The switch dispatcher: scoped construction, case registration, and
//! finalization.
//!
//! A [`Switch`] is created with a subject value, accumulates an ordered
//! sequence of candidate matchers inside a closure scope, and fires the
//! selected actions when the scope exits. The only way to obtain one is
//! through [`Switch::run`] (or its variants), which guarantees that
//! finalization happens exactly once per scope: on normal body return
//! the dispatch runs, and a body error passes through unchanged with no
//! dispatch at all.
//!
//! ```rust,ignore
//! let label: Result<&str, SwitchError> = Switch::run(code, |s| {
//!     s.case(200, || "ok")?;
//!     s.case_range(300..400, || "redirect")?;
//!     s.when(is_server_error, || "server error")?;
//!     s.default(|| "unknown");
//!     Ok(())
//! });
//! ```

use std::fmt;
use std::ops::RangeBounds;

use tracing::{debug, trace};

use crate::error::{SwitchError, SwitchResult};
use crate::key::CaseKey;
use crate::pattern::{self, PatternFlags};
use crate::report::{DispatchReport, KeySummary};

/// A deferred zero-argument action, invoked at most once during dispatch.
pub type Action<'a, R> = Box<dyn FnOnce() -> R + 'a>;

/// Multi-way branch dispatcher over a single subject value.
///
/// One instance per switch scope. The dispatcher is mutated only by the
/// owning scope's sequential registrations and is finalized exactly once
/// when the scope exits. It is not meant to be shared across threads:
/// concurrent units each construct their own.
///
/// Registration order is significant: the first matching case wins, and
/// in fallthrough mode every case registered after the match fires too,
/// with the last action's return value as the overall result.
pub struct Switch<'a, T, R> {
    /// The value being matched; immutable for the dispatcher's lifetime.
    subject: T,

    /// Every matching case engages a fallthrough chain when set.
    fallthrough_default: bool,

    /// True once any matcher has matched; never reset.
    matched: bool,

    /// True while a fallthrough chain is running.
    chain: bool,

    /// True once the default case is registered; blocks further cases.
    has_default: bool,

    /// Shared registry of every registered key, all matcher kinds.
    keys: Vec<CaseKey<T>>,

    /// Actions selected so far, invoked in order at finalization.
    pending: Vec<Action<'a, R>>,

    /// Value of the last invoked action, set during finalization.
    result: Option<R>,

    /// True only after finalization ran every pending action.
    finalized: bool,
}

impl<'a, T: fmt::Debug, R> Switch<'a, T, R> {
    fn new(subject: T, fallthrough: bool) -> Self {
        Self {
            subject,
            fallthrough_default: fallthrough,
            matched: false,
            chain: false,
            has_default: false,
            keys: Vec::new(),
            pending: Vec::new(),
            result: None,
            finalized: false,
        }
    }

    /// Run a switch scope over `subject` and return the dispatched value.
    ///
    /// The body registers cases against the dispatcher it is handed; on
    /// normal return the pending actions fire in registration order and
    /// the last return value is yielded. If the body returns an error it
    /// is passed through unchanged and nothing is dispatched.
    ///
    /// The error type only needs `From<SwitchError>`, so a body mixing
    /// registration calls with its own fallible work can use `?` freely.
    pub fn run<E, F>(subject: T, body: F) -> Result<R, E>
    where
        E: From<SwitchError>,
        F: FnOnce(&mut Switch<'a, T, R>) -> Result<(), E>,
    {
        Self::scoped(subject, false, body)
    }

    /// Like [`Switch::run`], but every matching case engages fallthrough:
    /// all cases registered after the match fire as well.
    pub fn run_fallthrough<E, F>(subject: T, body: F) -> Result<R, E>
    where
        E: From<SwitchError>,
        F: FnOnce(&mut Switch<'a, T, R>) -> Result<(), E>,
    {
        Self::scoped(subject, true, body)
    }

    fn scoped<E, F>(subject: T, fallthrough: bool, body: F) -> Result<R, E>
    where
        E: From<SwitchError>,
        F: FnOnce(&mut Switch<'a, T, R>) -> Result<(), E>,
    {
        let mut switch = Switch::new(subject, fallthrough);
        // Pass-through: a failing body short-circuits finalization
        // entirely, so no action ever fires for an abandoned scope.
        body(&mut switch)?;
        switch.finalize()?;
        match switch.result {
            Some(value) => Ok(value),
            None => Err(SwitchError::NoResult.into()),
        }
    }

    /// The subject value this dispatcher matches against.
    pub fn subject(&self) -> &T {
        &self.subject
    }

    /// Whether any matcher has matched so far.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Whether the default case has been registered.
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// The dispatched value.
    ///
    /// Only readable after finalization, which happens when the scope
    /// exits; inside the body this always fails with
    /// [`SwitchError::NoResult`].
    pub fn result(&self) -> SwitchResult<&R> {
        if !self.finalized {
            return Err(SwitchError::NoResult);
        }
        self.result.as_ref().ok_or(SwitchError::NoResult)
    }

    /// Snapshot of the dispatcher state for diagnostics.
    pub fn report(&self) -> DispatchReport {
        DispatchReport {
            subject: format!("{:?}", self.subject),
            fallthrough: self.fallthrough_default,
            matched: self.matched,
            has_default: self.has_default,
            finalized: self.finalized,
            pending_actions: self.pending.len(),
            keys: self
                .keys
                .iter()
                .map(|k| KeySummary {
                    kind: k.kind(),
                    key: k.describe(),
                })
                .collect(),
        }
    }

    /// Register a scalar case: fires when `subject == key`.
    pub fn case<F>(&mut self, key: T, action: F) -> SwitchResult<()>
    where
        T: PartialEq,
        F: FnOnce() -> R + 'a,
    {
        self.case_opt(key, false, Box::new(action))
    }

    /// Register a scalar case that engages fallthrough when it matches.
    pub fn case_fallthrough<F>(&mut self, key: T, action: F) -> SwitchResult<()>
    where
        T: PartialEq,
        F: FnOnce() -> R + 'a,
    {
        self.case_opt(key, true, Box::new(action))
    }

    /// Register a membership case: fires when the subject is one of the
    /// candidates.
    pub fn case_in<I, F>(&mut self, candidates: I, action: F) -> SwitchResult<()>
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
        F: FnOnce() -> R + 'a,
    {
        self.case_in_opt(candidates, false, Box::new(action))
    }

    /// Register a membership case that engages fallthrough when it
    /// matches.
    pub fn case_in_fallthrough<I, F>(&mut self, candidates: I, action: F) -> SwitchResult<()>
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
        F: FnOnce() -> R + 'a,
    {
        self.case_in_opt(candidates, true, Box::new(action))
    }

    /// Register a range case: fires when the range contains the subject.
    pub fn case_range<B, F>(&mut self, range: B, action: F) -> SwitchResult<()>
    where
        T: PartialEq + PartialOrd + Clone,
        B: RangeBounds<T>,
        F: FnOnce() -> R + 'a,
    {
        self.case_range_opt(range, false, Box::new(action))
    }

    /// Register a range case that engages fallthrough when it matches.
    pub fn case_range_fallthrough<B, F>(&mut self, range: B, action: F) -> SwitchResult<()>
    where
        T: PartialEq + PartialOrd + Clone,
        B: RangeBounds<T>,
        F: FnOnce() -> R + 'a,
    {
        self.case_range_opt(range, true, Box::new(action))
    }

    fn case_opt(&mut self, key: T, fallthrough: bool, action: Action<'a, R>) -> SwitchResult<()>
    where
        T: PartialEq,
    {
        let hit = self.subject == key;
        self.admit(CaseKey::Value(key))?;
        self.dispatch_case(hit, fallthrough, action);
        Ok(())
    }

    fn case_in_opt<I>(
        &mut self,
        candidates: I,
        fallthrough: bool,
        action: Action<'a, R>,
    ) -> SwitchResult<()>
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
    {
        let candidates: Vec<T> = candidates.into_iter().collect();
        let hit = candidates.contains(&self.subject);
        self.admit(CaseKey::OneOf(candidates))?;
        self.dispatch_case(hit, fallthrough, action);
        Ok(())
    }

    fn case_range_opt<B>(
        &mut self,
        range: B,
        fallthrough: bool,
        action: Action<'a, R>,
    ) -> SwitchResult<()>
    where
        T: PartialEq + PartialOrd + Clone,
        B: RangeBounds<T>,
    {
        let hit = range.contains(&self.subject);
        let key = CaseKey::Range {
            start: range.start_bound().cloned(),
            end: range.end_bound().cloned(),
        };
        self.admit(key)?;
        self.dispatch_case(hit, fallthrough, action);
        Ok(())
    }

    /// Register a pattern case matched against the subject's string
    /// representation.
    ///
    /// The pattern is anchored at the start: it fires when it matches a
    /// prefix of the text.
    pub fn matches<F>(&mut self, pattern: &str, action: F) -> SwitchResult<()>
    where
        T: PartialEq + fmt::Display,
        F: FnOnce() -> R + 'a,
    {
        self.matches_with(pattern, PatternFlags::new(), action)
    }

    /// Register a pattern case with explicit compilation flags.
    pub fn matches_with<F>(
        &mut self,
        pattern: &str,
        flags: PatternFlags,
        action: F,
    ) -> SwitchResult<()>
    where
        T: PartialEq + fmt::Display,
        F: FnOnce() -> R + 'a,
    {
        let regex = pattern::compile(pattern, flags)?;
        self.admit(CaseKey::Pattern {
            source: pattern.to_string(),
            flags,
        })?;
        if !self.matched {
            let text = self.subject.to_string();
            if regex.is_match(&text) {
                debug!(pattern = %pattern, "pattern case matched");
                self.matched = true;
                self.pending.push(Box::new(action));
            }
        }
        Ok(())
    }

    /// Register a pattern case matched against the subject's own text,
    /// without stringification.
    pub fn matches_raw<F>(&mut self, pattern: &str, action: F) -> SwitchResult<()>
    where
        T: PartialEq + AsRef<str>,
        F: FnOnce() -> R + 'a,
    {
        self.matches_raw_with(pattern, PatternFlags::new(), action)
    }

    /// Register a raw-text pattern case with explicit compilation flags.
    pub fn matches_raw_with<F>(
        &mut self,
        pattern: &str,
        flags: PatternFlags,
        action: F,
    ) -> SwitchResult<()>
    where
        T: PartialEq + AsRef<str>,
        F: FnOnce() -> R + 'a,
    {
        let regex = pattern::compile(pattern, flags)?;
        self.admit(CaseKey::Pattern {
            source: pattern.to_string(),
            flags,
        })?;
        if !self.matched && regex.is_match(self.subject.as_ref()) {
            debug!(pattern = %pattern, "pattern case matched");
            self.matched = true;
            self.pending.push(Box::new(action));
        }
        Ok(())
    }

    /// Register a predicate case: fires when `predicate(subject)` is
    /// true and nothing matched before.
    ///
    /// The predicate runs immediately at registration time, in
    /// registration order and even when a match already exists; only
    /// the append is guarded. Predicates are identified by function
    /// address for duplicate detection, which is why this takes a plain
    /// `fn` rather than an arbitrary closure.
    pub fn when<F>(&mut self, predicate: fn(&T) -> bool, action: F) -> SwitchResult<()>
    where
        T: PartialEq,
        F: FnOnce() -> R + 'a,
    {
        self.admit(CaseKey::Predicate(predicate))?;
        let hit = predicate(&self.subject);
        if !self.matched && hit {
            debug!("predicate case matched");
            self.matched = true;
            self.pending.push(Box::new(action));
        }
        Ok(())
    }

    /// Register the default case.
    ///
    /// The default fires only when nothing else has been selected.
    /// Registering it is always safe, even after a match, but no case
    /// of any kind may be registered afterwards. Repeated calls are
    /// no-ops beyond the first.
    pub fn default<F>(&mut self, action: F)
    where
        F: FnOnce() -> R + 'a,
    {
        self.has_default = true;
        if self.pending.is_empty() {
            trace!("default case armed");
            self.pending.push(Box::new(action));
        }
    }

    /// Shared admission path: reject cases after the default, reject
    /// duplicates across the whole registry, then record the key. Keys
    /// are recorded even when a match already occurred so that later
    /// duplicates are still caught.
    fn admit(&mut self, key: CaseKey<T>) -> SwitchResult<()>
    where
        T: PartialEq,
    {
        if self.has_default {
            return Err(SwitchError::case_after_default(key.describe()));
        }
        if self.keys.iter().any(|k| *k == key) {
            return Err(match &key {
                CaseKey::Pattern { source, .. } => SwitchError::duplicate_pattern(source.as_str()),
                CaseKey::Predicate(_) => SwitchError::DuplicatePredicate,
                _ => SwitchError::duplicate_key(key.describe()),
            });
        }
        trace!(key = %key.describe(), kind = %key.kind(), "case key recorded");
        self.keys.push(key);
        Ok(())
    }

    /// Dispatch effect shared by the `case*` family. Once a fallthrough
    /// chain is running, the key of a subsequent case is irrelevant:
    /// its action is appended unconditionally and the chain stays
    /// engaged until the scope ends.
    fn dispatch_case(&mut self, hit: bool, fallthrough: bool, action: Action<'a, R>) {
        if !self.matched {
            if hit {
                debug!(fallthrough = self.fallthrough_default || fallthrough, "case matched");
                self.matched = true;
                self.chain = self.fallthrough_default || fallthrough;
                self.pending.push(action);
            }
        } else if self.fallthrough_default || self.chain {
            trace!("case appended via fallthrough");
            self.chain = true;
            self.pending.push(action);
        }
    }

    /// Run every pending action in registration order. The stored
    /// result is the last action's return value, mirroring native
    /// fallthrough semantics where the last statement executed wins.
    fn finalize(&mut self) -> SwitchResult<()> {
        if !self.has_default || self.pending.is_empty() {
            return Err(SwitchError::NoDefault);
        }
        let actions = std::mem::take(&mut self.pending);
        debug!(actions = actions.len(), matched = self.matched, "dispatching");
        for action in actions {
            self.result = Some(action());
        }
        self.finalized = true;
        Ok(())
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Switch<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("subject", &self.subject)
            .field("fallthrough_default", &self.fallthrough_default)
            .field("matched", &self.matched)
            .field("has_default", &self.has_default)
            .field("pending", &self.pending.len())
            .field("finalized", &self.finalized)
            .finish()
    }
}

/// Run a switch scope over `subject`; sugar for [`Switch::run`].
pub fn switch<'a, T, R, E, F>(subject: T, body: F) -> Result<R, E>
where
    T: fmt::Debug,
    E: From<SwitchError>,
    F: FnOnce(&mut Switch<'a, T, R>) -> Result<(), E>,
{
    Switch::run(subject, body)
}

/// Run a fallthrough switch scope; sugar for [`Switch::run_fallthrough`].
pub fn switch_fallthrough<'a, T, R, E, F>(subject: T, body: F) -> Result<R, E>
where
    T: fmt::Debug,
    E: From<SwitchError>,
    F: FnOnce(&mut Switch<'a, T, R>) -> Result<(), E>,
{
    Switch::run_fallthrough(subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_case_dispatch() {
        let result: Result<&str, SwitchError> = Switch::run(4, |s| {
            s.case(3, || "three")?;
            s.case(4, || "four")?;
            s.default(|| "other");
            Ok(())
        });
        assert_eq!(result.unwrap(), "four");
    }

    #[test]
    fn test_default_only() {
        let result: Result<String, SwitchError> = Switch::run(42, |s| {
            s.case(7, || "seven".to_string())?;
            s.default(|| "default".to_string());
            Ok(())
        });
        assert_eq!(result.unwrap(), "default");
    }

    #[test]
    fn test_mid_body_introspection() {
        let result: Result<u8, SwitchError> = Switch::run(1, |s| {
            assert_eq!(*s.subject(), 1);
            assert!(!s.matched());
            assert!(!s.has_default());
            assert!(matches!(s.result(), Err(SwitchError::NoResult)));

            s.case(1, || 10)?;
            assert!(s.matched());
            // Still no result: actions run at scope exit, not here.
            assert!(matches!(s.result(), Err(SwitchError::NoResult)));

            s.default(|| 0);
            assert!(s.has_default());
            Ok(())
        });
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    fn test_actions_borrow_environment() {
        let label = String::from("found it");
        let result: Result<&str, SwitchError> = Switch::run(2, |s| {
            s.case(2, || label.as_str())?;
            s.default(|| "missing");
            Ok(())
        });
        assert_eq!(result.unwrap(), "found it");
    }

    #[test]
    fn test_debug_formatting() {
        let result: Result<(), SwitchError> = Switch::run(9, |s| {
            let repr = format!("{:?}", s);
            assert!(repr.contains("subject: 9"));
            s.default(|| ());
            Ok(())
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_free_function_sugar() {
        let result: Result<i32, SwitchError> = switch("b", |s| {
            s.case("a", || 1)?;
            s.case("b", || 2)?;
            s.default(|| 0);
            Ok(())
        });
        assert_eq!(result.unwrap(), 2);
    }
}
