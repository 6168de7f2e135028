//! # Printer Configuration
//!
//! Paper profiles for ESC/POS receipt printers.
//!
//! | Profile | Paper | Columns (Font A) |
//! |---------|-------|------------------|
//! | `MM58` | 58 mm | 32 |
//! | `MM80` | 80 mm | 48 |
//!
//! ```
//! use kvittering::printer::PrinterConfig;
//!
//! let config = PrinterConfig::default();
//! assert_eq!(config.columns, 32);
//! ```

use std::str::FromStr;

use crate::error::KvitteringError;

/// Serial line speed used for every print job
pub const BAUD_RATE: u32 = 9600;

/// # Printer Configuration
///
/// Describes the paper a receipt is laid out for. Only the column count
/// affects output: it sets the width of rules and two-column rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Profile name as accepted on the command line
    pub name: &'static str,

    /// Characters per line at normal size
    pub columns: usize,
}

impl PrinterConfig {
    /// 58 mm paper, 32 characters per line
    pub const MM58: PrinterConfig = PrinterConfig {
        name: "58mm",
        columns: 32,
    };

    /// 80 mm paper, 48 characters per line
    pub const MM80: PrinterConfig = PrinterConfig {
        name: "80mm",
        columns: 48,
    };

    /// All known profiles
    pub const ALL: [PrinterConfig; 2] = [Self::MM58, Self::MM80];
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MM58
    }
}

impl FromStr for PrinterConfig {
    type Err = KvitteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|profile| profile.name == wanted || profile.name.trim_end_matches("mm") == wanted)
            .ok_or_else(|| {
                KvitteringError::Config(format!(
                    "Unknown paper profile '{s}' (expected 58mm or 80mm)"
                ))
            })
    }
}
