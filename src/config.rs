//! # Settings
//!
//! Optional JSON settings file shared by the CLI and the HTTP server.
//!
//! ```json
//! {
//!   "device": "/dev/ttyUSB0",
//!   "paper": "58mm",
//!   "listen": "0.0.0.0:8080",
//!   "business": {
//!     "businessName": "Salong Saks",
//!     "address": "Storgata 1, 0155 Oslo",
//!     "phone": "22 33 44 55",
//!     "email": "post@salongsaks.no",
//!     "orgNumber": "999 888 777"
//!   }
//! }
//! ```
//!
//! Every field is optional. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KvitteringError, Result};
use crate::printer::PrinterConfig;
use crate::receipt::{Business, Receipt};

/// Default HTTP listen address
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Printer device; discovered when unset
    pub device: Option<PathBuf>,
    /// Paper profile name ("58mm" or "80mm")
    pub paper: Option<String>,
    /// HTTP listen address
    pub listen: Option<String>,
    /// Header defaults for receipts that leave business fields empty
    pub business: Business,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            KvitteringError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
            .map_err(|e| KvitteringError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| KvitteringError::Config(e.to_string()))?;
        settings.printer()?;
        Ok(settings)
    }

    /// The configured paper profile
    pub fn printer(&self) -> Result<PrinterConfig> {
        self.paper
            .as_deref()
            .map_or(Ok(PrinterConfig::default()), str::parse)
    }

    pub fn listen_addr(&self) -> &str {
        self.listen.as_deref().unwrap_or(DEFAULT_LISTEN)
    }

    /// Fill empty header fields of `receipt` from the business defaults.
    pub fn apply_business(&self, mut receipt: Receipt) -> Receipt {
        receipt.business = receipt.business.with_defaults(&self.business);
        receipt
    }
}
