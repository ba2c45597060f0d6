//! Simulation harness: program loading.

/// Program file parsing and loading into memory.
pub mod loader;
