//! System-level utilities
//!
//! Currently only the tracing subscriber setup lives here.

pub mod logging;

pub use logging::init_logging;
