//! Error types for the loader and configuration layers.
//!
//! The pipeline engine itself never returns a `Result`: unknown opcodes
//! clear the run flag and unmapped memory accesses are silently resolved
//! (zero on read, dropped on write). Only the program loader and the
//! configuration loader can fail, and they fail with a typed error rather
//! than a bag of strings.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading a program file or a config file.
#[derive(Debug)]
pub enum SimError {
    /// The program file could not be opened or read.
    ProgramFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A line in the program file was not a valid hexadecimal word.
    MalformedWord {
        /// 1-based line number in the program file.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The configuration file could not be read or parsed.
    Config(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ProgramFile { path, source } => {
                write!(f, "can't open program file {}: {}", path.display(), source)
            }
            SimError::MalformedWord { line, token } => {
                write!(f, "line {line}: not a hexadecimal word: {token:?}")
            }
            SimError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ProgramFile { source, .. } => Some(source),
            SimError::MalformedWord { .. } | SimError::Config(_) => None,
        }
    }
}
