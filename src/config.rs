//! Configuration for the pipeline simulator, loaded from a TOML file.
//!
//! Every field has a default, so a config file may override as little or
//! as much as it likes (or be omitted entirely — `Config::default()` gives
//! the memory map described in the specification).

use serde::Deserialize;

const DEFAULT_TEXT_BASE: u32 = 0x0040_0000;
const DEFAULT_TEXT_SIZE: usize = 0x10_0000;
const DEFAULT_DATA_BASE: u32 = 0x1000_0000;
const DEFAULT_DATA_SIZE: usize = 0x10_0000;
const DEFAULT_STACK_TOP: u32 = 0x7FFF_FFFC;
const DEFAULT_STACK_SIZE: usize = 0x10_0000;

/// Top-level simulator configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// General run controls.
    pub general: GeneralConfig,
    /// Memory region layout.
    pub memory: MemoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

/// General simulation controls.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    /// Whether to emit a per-cycle trace to stderr.
    pub trace_cycles: bool,
    /// Whether data forwarding starts enabled.
    pub forwarding: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: false,
            forwarding: true,
        }
    }
}

/// Memory region layout, as hex-string bases and byte sizes.
///
/// Bases and sizes are stored as hex strings (matching the lineage's
/// convention for address-shaped config fields) and parsed on access.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MemoryConfig {
    /// Base address of the text (program) region.
    pub text_base: String,
    /// Size in bytes of the text region.
    pub text_size: String,
    /// Base address of the data region.
    pub data_base: String,
    /// Size in bytes of the data region.
    pub data_size: String,
    /// Highest address of the stack region (stack grows down from here).
    pub stack_top: String,
    /// Size in bytes of the stack region.
    pub stack_size: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            text_base: hex(DEFAULT_TEXT_BASE),
            text_size: hex(DEFAULT_TEXT_SIZE as u32),
            data_base: hex(DEFAULT_DATA_BASE),
            data_size: hex(DEFAULT_DATA_SIZE as u32),
            stack_top: hex(DEFAULT_STACK_TOP),
            stack_size: hex(DEFAULT_STACK_SIZE as u32),
        }
    }
}

impl MemoryConfig {
    /// Parsed text region base.
    pub fn text_base(&self) -> u32 {
        parse_hex(&self.text_base, DEFAULT_TEXT_BASE)
    }
    /// Parsed text region size.
    pub fn text_size(&self) -> usize {
        parse_hex(&self.text_size, DEFAULT_TEXT_SIZE as u32) as usize
    }
    /// Parsed data region base.
    pub fn data_base(&self) -> u32 {
        parse_hex(&self.data_base, DEFAULT_DATA_BASE)
    }
    /// Parsed data region size.
    pub fn data_size(&self) -> usize {
        parse_hex(&self.data_size, DEFAULT_DATA_SIZE as u32) as usize
    }
    /// Parsed highest stack address.
    pub fn stack_top(&self) -> u32 {
        parse_hex(&self.stack_top, DEFAULT_STACK_TOP)
    }
    /// Parsed stack region size.
    pub fn stack_size(&self) -> usize {
        parse_hex(&self.stack_size, DEFAULT_STACK_SIZE as u32) as usize
    }
}

fn parse_hex(s: &str, default: u32) -> u32 {
    let s = s.trim_start_matches("0x");
    u32::from_str_radix(s, 16).unwrap_or(default)
}

fn hex(v: u32) -> String {
    format!("{v:#x}")
}

/// Loads a `Config` from a TOML file, falling back to defaults for any
/// field the file omits.
pub fn load(path: &std::path::Path) -> Result<Config, crate::common::SimError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| crate::common::SimError::Config(format!("{}: {e}", path.display())))?;
    toml::from_str(&text).map_err(|e| crate::common::SimError::Config(e.to_string()))
}
