//! Server state and configuration.

use tokio::sync::Mutex;

use crate::config::Settings;
use crate::error::Result;
use crate::printer::PrinterConfig;
use crate::receipt::Business;
use crate::transport::PrintTransport;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Paper profile receipts are laid out for
    pub printer: PrinterConfig,
    /// Header defaults for receipts that leave business fields empty
    pub business: Business,
}

impl ServerConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            listen_addr: settings.listen_addr().to_string(),
            printer: settings.printer()?,
            business: settings.business.clone(),
        })
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub transport: PrintTransport,
    /// Held for the duration of one print so jobs never interleave on a port
    pub print_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: ServerConfig, transport: PrintTransport) -> Self {
        Self {
            config,
            transport,
            print_lock: Mutex::new(()),
        }
    }
}
