//! Prelude module for convenient imports.
//!
//! Import the commonly used types with a single line:
//!
//! ```rust,ignore
//! use switchcase_core::prelude::*;
//! ```

// Scope runners
pub use crate::dispatch::{switch, switch_fallthrough, Switch};

// Error handling
pub use crate::error::{SwitchError, SwitchResult};

// Pattern flags
pub use crate::pattern::PatternFlags;

// Diagnostics
pub use crate::report::DispatchReport;
