//! Program file loading.
//!
//! A program file is a text file with one 32-bit instruction per line,
//! written as a hexadecimal integer. Parsing stops at EOF; blank lines are
//! skipped.

use std::path::Path;

use crate::common::SimError;
use crate::core::memory::Memory;

/// Reads `path` and parses each non-blank line as a hexadecimal word.
pub fn load_program(path: &Path) -> Result<Vec<u32>, SimError> {
    let text = std::fs::read_to_string(path).map_err(|e| SimError::ProgramFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let token = line.split_whitespace().next();
        let Some(token) = token else { continue };
        let digits = token.trim_start_matches("0x").trim_start_matches("0X");
        let word = u32::from_str_radix(digits, 16).map_err(|_| SimError::MalformedWord {
            line: idx + 1,
            token: token.to_string(),
        })?;
        words.push(word);
    }

    Ok(words)
}

/// Writes `words` into `memory` at consecutive little-endian addresses
/// starting at `base`.
pub fn write_program(memory: &mut Memory, base: u32, words: &[u32]) {
    for (i, word) in words.iter().enumerate() {
        memory.write32(base + (i as u32) * 4, *word);
    }
}
