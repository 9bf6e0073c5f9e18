//! Dispatch diagnostics - plaintext and JSON.

use std::fmt;

use serde::Serialize;

use crate::key::CaseKind;

/// Snapshot of a dispatcher's state, suitable for structured logging
/// or debugging a scope that did not select what the author expected.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    /// Debug representation of the subject value.
    pub subject: String,
    /// Whether dispatcher-level fallthrough is enabled.
    pub fallthrough: bool,
    /// Whether any matcher has matched.
    pub matched: bool,
    /// Whether the default case has been registered.
    pub has_default: bool,
    /// Whether finalization has completed.
    pub finalized: bool,
    /// Number of actions currently selected for dispatch.
    pub pending_actions: usize,
    /// Every registered key, in registration order.
    pub keys: Vec<KeySummary>,
}

/// One registered key in a [`DispatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct KeySummary {
    /// Matcher kind of the key.
    pub kind: CaseKind,
    /// Human-readable key description.
    pub key: String,
}

impl DispatchReport {
    /// Render the report as pretty-printed JSON.
    ///
    /// Falls back to the debug representation if serialization fails,
    /// which cannot happen for this shape but is handled anyway.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "switch on {} (fallthrough: {}, matched: {}, default: {}, pending: {})",
            self.subject, self.fallthrough, self.matched, self.has_default, self.pending_actions
        )?;
        for entry in &self.keys {
            writeln!(f, "- {} {}", entry.kind, entry.key)?;
        }
        Ok(())
    }
}
