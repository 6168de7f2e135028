//! # Kvittering - Receipt Printing for Salon Point of Sale
//!
//! Kvittering turns a completed sale into an ESC/POS command stream and sends
//! it to a serial-connected thermal receipt printer. It provides:
//!
//! - **Protocol implementation**: ESC/POS command builders and a decoder
//! - **Command encoder**: a chained builder over an ordered chunk buffer
//! - **Receipt formatter**: the fixed salon receipt layout
//! - **Transport**: serial printing over USB-serial and RFCOMM devices
//! - **HTTP server**: print endpoints for the salon front end
//!
//! ## Quick Start
//!
//! ```no_run
//! use kvittering::{
//!     receipt::{format_receipt, Business, LineItem, Receipt},
//!     transport::PrintTransport,
//! };
//!
//! # async fn example() -> kvittering::error::Result<()> {
//! let receipt = Receipt {
//!     business: Business {
//!         business_name: "Salong Saks".into(),
//!         ..Default::default()
//!     },
//!     order_number: "1042".into(),
//!     items: vec![LineItem::new("Herreklipp", 1, 500.0)],
//!     subtotal: 400.0,
//!     tax: 100.0,
//!     total: 500.0,
//!     payment_method: "KORT".into(),
//!     ..Default::default()
//! };
//!
//! let transport = PrintTransport::tty(Some("/dev/ttyUSB0".into()));
//! transport.print(&format_receipt(&receipt)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`encoder`] | Command encoder and buffer |
//! | [`receipt`] | Receipt model and formatter |
//! | [`transport`] | Serial print transport |
//! | [`printer`] | Paper profiles |
//! | [`config`] | Settings file |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod config;
pub mod encoder;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod receipt;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use encoder::CommandEncoder;
pub use error::KvitteringError;
pub use printer::PrinterConfig;
pub use receipt::{LineItem, Receipt, format_receipt};
pub use transport::{PrintTransport, is_serial_supported};
