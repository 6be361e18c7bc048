//! Shared utilities for the MGT workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
