//! # Printer Transport Layer
//!
//! Delivers a finished command stream to a serial-connected receipt printer.
//!
//! ## Print Sequence
//!
//! ```text
//! is_available? ── no ──> UnsupportedTransport (nothing else is touched)
//!      │
//!     yes
//!      │
//! request_port ──> open(9600) ──> write_all ──> close
//!                      │              │           ▲
//!                      └── error ─────┴───────────┘  close is always attempted
//! ```
//!
//! Any failure after the capability check is reported once as
//! [`KvitteringError::Transport`]. Nothing is retried: printing is a one-shot
//! action the user repeats by hand.
//!
//! ## Cancellation
//!
//! A print cannot be cancelled once started. Callers that race
//! [`PrintTransport::print`] against a timer must accept that a port whose
//! write never completes may stay open.
//!
//! ## Backends
//!
//! - [`tty`]: Unix serial devices (USB serial, RFCOMM Bluetooth serial)
//! - [`discover`]: Finding candidate devices

pub mod discover;
pub mod tty;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{KvitteringError, Result};
use crate::printer::BAUD_RATE;

pub use tty::{TtyHost, TtyPort};

/// Source of serial ports on the current host.
#[async_trait]
pub trait SerialHost: Send + Sync {
    /// Whether this host can do serial I/O at all. Must have no side effects.
    fn is_available(&self) -> bool;

    /// The configured device, if one was chosen up front
    fn device(&self) -> Option<String> {
        None
    }

    /// Select a port to print to.
    async fn request_port(&self) -> io::Result<Box<dyn SerialPort>>;
}

/// One acquired serial port.
#[async_trait]
pub trait SerialPort: Send {
    /// Human readable port name for logs and errors
    fn name(&self) -> String;

    async fn open(&mut self, baud_rate: u32) -> io::Result<()>;

    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Release the port. Must be safe to call on a port that never opened.
    async fn close(&mut self) -> io::Result<()>;
}

/// # Print Transport
///
/// Cheap to clone; clones share the same host.
///
/// ```no_run
/// use kvittering::receipt::{demo_receipt, format_receipt};
/// use kvittering::transport::PrintTransport;
///
/// # async fn example() -> kvittering::error::Result<()> {
/// let transport = PrintTransport::tty(Some("/dev/ttyUSB0".into()));
/// if transport.is_supported() {
///     transport.print(&format_receipt(&demo_receipt())).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PrintTransport {
    host: Arc<dyn SerialHost>,
    baud_rate: u32,
}

impl PrintTransport {
    pub fn new(host: impl SerialHost + 'static) -> Self {
        Self {
            host: Arc::new(host),
            baud_rate: BAUD_RATE,
        }
    }

    /// Transport over local tty devices; `None` picks the first discovered port.
    pub fn tty(device: Option<PathBuf>) -> Self {
        Self::new(TtyHost::new(device))
    }

    /// Capability check without side effects
    pub fn is_supported(&self) -> bool {
        self.host.is_available()
    }

    /// The configured device, if any
    pub fn device(&self) -> Option<String> {
        self.host.device()
    }

    /// Send `data` to the printer in one write.
    pub async fn print(&self, data: &[u8]) -> Result<()> {
        if !self.host.is_available() {
            warn!("serial printing requested on a host without serial support");
            return Err(KvitteringError::UnsupportedTransport);
        }

        let mut port = self
            .host
            .request_port()
            .await
            .map_err(|e| KvitteringError::transport("acquire serial port", e))?;
        let name = port.name();
        info!(port = %name, bytes = data.len(), "printing");

        let written = async {
            port.open(self.baud_rate)
                .await
                .map_err(|e| KvitteringError::transport(&format!("open {name}"), e))?;
            debug!(port = %name, baud = self.baud_rate, "port open");
            port.write_all(data)
                .await
                .map_err(|e| KvitteringError::transport(&format!("write {name}"), e))
        }
        .await;

        let closed = port
            .close()
            .await
            .map_err(|e| KvitteringError::transport(&format!("close {name}"), e));

        match (written, closed) {
            (Ok(()), Ok(())) => {
                info!(port = %name, "print finished");
                Ok(())
            }
            (Err(e), Ok(())) => {
                warn!(port = %name, error = %e, "print failed");
                Err(e)
            }
            (Err(e), Err(close_err)) => {
                warn!(port = %name, error = %e, close_error = %close_err, "print failed");
                Err(e)
            }
            (Ok(()), Err(e)) => {
                warn!(port = %name, error = %e, "close failed");
                Err(e)
            }
        }
    }
}

/// Whether this machine can print over serial at all.
pub fn is_serial_supported() -> bool {
    TtyHost::default().is_available()
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory host recording every port call.

    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum FailAt {
        #[default]
        Nowhere,
        Acquire,
        Open,
        Write,
        Close,
    }

    #[derive(Clone, Default)]
    pub struct RecordingHost {
        pub unavailable: bool,
        pub fail_at: FailAt,
        pub log: Arc<Mutex<Vec<String>>>,
        pub written: Arc<Mutex<Vec<u8>>>,
    }

    impl RecordingHost {
        pub fn failing(fail_at: FailAt) -> Self {
            Self {
                fail_at,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        pub fn bytes(&self) -> Vec<u8> {
            self.written.lock().unwrap().clone()
        }
    }

    fn fail(step: &str) -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, format!("{step} failed"))
    }

    #[async_trait]
    impl SerialHost for RecordingHost {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        async fn request_port(&self) -> io::Result<Box<dyn SerialPort>> {
            self.log.lock().unwrap().push("acquire".into());
            if self.fail_at == FailAt::Acquire {
                return Err(fail("acquire"));
            }
            Ok(Box::new(RecordingPort {
                host: self.clone(),
            }))
        }
    }

    struct RecordingPort {
        host: RecordingHost,
    }

    #[async_trait]
    impl SerialPort for RecordingPort {
        fn name(&self) -> String {
            "memory".into()
        }

        async fn open(&mut self, baud_rate: u32) -> io::Result<()> {
            self.host.log.lock().unwrap().push(format!("open {baud_rate}"));
            if self.host.fail_at == FailAt::Open {
                return Err(fail("open"));
            }
            Ok(())
        }

        async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            self.host.log.lock().unwrap().push("write".into());
            if self.host.fail_at == FailAt::Write {
                return Err(fail("write"));
            }
            self.host.written.lock().unwrap().extend_from_slice(data);
            Ok(())
        }

        async fn close(&mut self) -> io::Result<()> {
            self.host.log.lock().unwrap().push("close".into());
            if self.host.fail_at == FailAt::Close {
                return Err(fail("close"));
            }
            Ok(())
        }
    }
}
