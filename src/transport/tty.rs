//! # Serial TTY Transport
//!
//! Prints through a Unix serial device: USB-serial adapters (`/dev/ttyUSB0`,
//! `/dev/ttyACM0`) or an RFCOMM-bound Bluetooth printer (`/dev/rfcomm0`).
//!
//! ## TTY Configuration
//!
//! The device is opened write-only and switched to raw mode so binary data
//! is transmitted without modification:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL and XON/XOFF flow control are disabled
//! - **No output processing**: OPOST is disabled (no LF to CRLF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON, ISIG, IEXTEN off
//! - **Line speed**: input and output set to the requested baud rate
//!
//! Disabling XON/XOFF matters: 0x11 and 0x13 may appear in command
//! parameters and must not be swallowed by the line discipline.
//!
//! ## Port Selection
//!
//! A [`TtyHost`] created with a device path always uses that path. Without
//! one, the first device reported by [`discover::list_ports`] is chosen.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::discover;
use super::{SerialHost, SerialPort};

/// Host serial ports exposed as device files
#[derive(Debug, Clone, Default)]
pub struct TtyHost {
    device: Option<PathBuf>,
}

impl TtyHost {
    pub fn new(device: Option<PathBuf>) -> Self {
        Self { device }
    }

    pub fn device_path(&self) -> Option<&Path> {
        self.device.as_deref()
    }
}

#[async_trait]
impl SerialHost for TtyHost {
    fn is_available(&self) -> bool {
        cfg!(unix)
    }

    fn device(&self) -> Option<String> {
        self.device.as_ref().map(|path| path.display().to_string())
    }

    async fn request_port(&self) -> io::Result<Box<dyn SerialPort>> {
        let path = match &self.device {
            Some(path) => path.clone(),
            None => {
                let candidates = tokio::task::spawn_blocking(discover::list_ports)
                    .await
                    .map_err(io::Error::other)?;
                debug!(?candidates, "discovered serial devices");
                candidates.into_iter().next().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "no serial printer found")
                })?
            }
        };

        Ok(Box::new(TtyPort::new(path)))
    }
}

/// A serial device file, opened on demand
#[derive(Debug)]
pub struct TtyPort {
    path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl TtyPort {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

#[async_trait]
impl SerialPort for TtyPort {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn open(&mut self, baud_rate: u32) -> io::Result<()> {
        let path = self.path.clone();
        let file = tokio::task::spawn_blocking(move || -> io::Result<File> {
            let file = OpenOptions::new().write(true).open(&path)?;
            configure_tty_raw(&file, baud_rate)?;
            Ok(file)
        })
        .await
        .map_err(io::Error::other)??;

        self.file = Some(tokio::fs::File::from_std(file));
        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "port is not open"))?;
        file.write_all(data).await?;
        file.flush().await
    }

    async fn close(&mut self) -> io::Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let file = file.into_std().await;
        // Dropping the file closes the descriptor once output has drained.
        tokio::task::spawn_blocking(move || drain(&file))
            .await
            .map_err(io::Error::other)?
    }
}

/// Map a baud rate to its termios speed constant.
#[cfg(unix)]
fn speed_for(baud_rate: u32) -> io::Result<libc::speed_t> {
    match baud_rate {
        9600 => Ok(libc::B9600),
        19200 => Ok(libc::B19200),
        38400 => Ok(libc::B38400),
        57600 => Ok(libc::B57600),
        115200 => Ok(libc::B115200),
        other => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported baud rate {other}"),
        )),
    }
}

/// Put a tty into raw 8N1 mode at `baud_rate`.
#[cfg(unix)]
fn configure_tty_raw(file: &File, baud_rate: u32) -> io::Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    let speed = speed_for(baud_rate)?;

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8 | libc::CLOCAL | libc::CREAD;

    if unsafe { libc::cfsetispeed(&mut termios, speed) } != 0
        || unsafe { libc::cfsetospeed(&mut termios, speed) } != 0
    {
        return Err(io::Error::last_os_error());
    }

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File, _baud_rate: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "serial ports are not supported on this platform",
    ))
}

/// Block until everything written to the tty has been transmitted.
#[cfg(unix)]
fn drain(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    if unsafe { libc::tcdrain(file.as_raw_fd()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn drain(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_device_reported() {
        let host = TtyHost::new(Some("/dev/ttyUSB3".into()));
        assert_eq!(host.device().as_deref(), Some("/dev/ttyUSB3"));
        assert_eq!(host.device_path(), Some(Path::new("/dev/ttyUSB3")));
        assert_eq!(TtyHost::default().device(), None);
    }

    #[tokio::test]
    async fn test_configured_device_is_used_without_opening() {
        let host = TtyHost::new(Some("/dev/ttyUSB3".into()));
        let port = host.request_port().await.unwrap();
        assert_eq!(port.name(), "/dev/ttyUSB3");
    }

    #[tokio::test]
    async fn test_write_before_open_fails() {
        let mut port = TtyPort::new("/dev/null");
        let err = port.write_all(b"x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[tokio::test]
    async fn test_close_unopened_port_is_noop() {
        let mut port = TtyPort::new("/dev/does-not-exist");
        assert!(!port.is_open());
        port.close().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_missing_device_fails() {
        let mut port = TtyPort::new("/dev/kvittering-missing-tty");
        let err = port.open(9600).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!port.is_open());
    }

    #[cfg(unix)]
    #[test]
    fn test_speed_mapping() {
        assert_eq!(speed_for(9600).unwrap(), libc::B9600);
        assert_eq!(
            speed_for(1234).unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );
    }
}
