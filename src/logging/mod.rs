//! Logging module for the ActivityNet dataset tooling
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Dual logging (file + stdout)
//! - Log file management with timestamps
//!
//! Library code only emits `tracing` events; installing the subscriber via
//! `setup_logging` is left to the consuming application.

mod formatter;
mod setup;

// Re-export the public API
pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
