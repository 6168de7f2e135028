//! # Printer Module
//!
//! Printer-specific configuration.
//!
//! - [`config`]: Paper profiles and the fixed serial line speed

pub mod config;

pub use config::{BAUD_RATE, PrinterConfig};
