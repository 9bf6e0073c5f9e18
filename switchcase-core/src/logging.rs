//! Structured logging setup using **tracing**.
//!
//! The dispatcher emits `trace!`/`debug!` events as keys are recorded,
//! matches fire, and finalization dispatches. The library never installs
//! a subscriber on its own; an embedding application that wants those
//! events as structured output can call [`init_structured_logging`]
//! once at startup.

/// Initializes the global tracing collector (subscriber).
///
/// Configures structured JSON output to stderr, filtered through the
/// `RUST_LOG` environment variable (e.g. `RUST_LOG=switchcase_core=trace`).
/// Calling this more than once is a no-op.
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
