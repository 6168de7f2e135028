//! # Serial Device Discovery
//!
//! Finds device files a receipt printer is likely attached to.
//!
//! | Pattern | Typical device |
//! |---------|----------------|
//! | `ttyUSB*` | USB-serial adapter (FTDI, CH340, PL2303) |
//! | `ttyACM*` | USB CDC printer |
//! | `rfcomm*` | Bluetooth SPP printer bound with `rfcomm bind` |
//! | `cu.usbserial*`, `cu.usbmodem*` | macOS USB serial |
//!
//! ## Bluetooth Setup (Linux)
//!
//! ```bash
//! $ bluetoothctl pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # creates /dev/rfcomm0
//! ```
//!
//! [`rfcomm_device_for`] then maps the printer's MAC address to its device.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Device name prefixes treated as printer candidates
pub const PORT_PREFIXES: &[&str] = &["ttyUSB", "ttyACM", "rfcomm", "cu.usbserial", "cu.usbmodem"];

/// Candidate serial devices under `/dev`, sorted by path.
pub fn list_ports() -> Vec<PathBuf> {
    list_ports_in(Path::new("/dev"))
}

/// Candidate serial devices in `dir`, sorted by path.
///
/// An unreadable directory yields no candidates.
pub fn list_ports_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut ports: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            PORT_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        })
        .map(|entry| entry.path())
        .collect();

    ports.sort();
    ports
}

/// Validate a Bluetooth MAC address format (XX:XX:XX:XX:XX:XX).
pub fn is_valid_mac(mac: &str) -> bool {
    let parts: Vec<&str> = mac.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// The RFCOMM device bound to `mac`, from `/proc/net/rfcomm`.
///
/// Returns `Ok(None)` when the address is not bound or the device file is
/// missing.
pub fn rfcomm_device_for(mac: &str) -> io::Result<Option<PathBuf>> {
    if !is_valid_mac(mac) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid Bluetooth address '{mac}'"),
        ));
    }

    let table = match fs::read_to_string("/proc/net/rfcomm") {
        Ok(table) => table,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(parse_rfcomm_table(&table, mac)
        .map(|name| PathBuf::from(format!("/dev/{name}")))
        .filter(|path| path.exists()))
}

/// Find the device name bound to `mac` in an rfcomm table.
///
/// Lines look like `rfcomm0: 00:11:62:AA:BB:CC channel 1 clean`.
fn parse_rfcomm_table(table: &str, mac: &str) -> Option<String> {
    let mac = mac.to_uppercase();
    table
        .lines()
        .find(|line| line.to_uppercase().contains(&mac))
        .and_then(|line| line.split(':').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mac_addresses() {
        assert!(is_valid_mac("00:11:22:33:44:55"));
        assert!(is_valid_mac("aa:bb:cc:dd:ee:ff"));
    }

    #[test]
    fn test_invalid_mac_addresses() {
        assert!(!is_valid_mac("00:11:22:33:44")); // too short
        assert!(!is_valid_mac("00-11-22-33-44-55")); // wrong separator
        assert!(!is_valid_mac("GG:HH:II:JJ:KK:LL")); // invalid hex
        assert!(!is_valid_mac(""));
    }

    #[test]
    fn test_rfcomm_rejects_bad_mac() {
        let err = rfcomm_device_for("printer").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_parse_rfcomm_table() {
        let table = "rfcomm0: 00:11:62:AA:BB:CC channel 1 clean\n\
                     rfcomm1: 00:11:62:DD:EE:FF channel 1 connected [tty-attached]\n";

        assert_eq!(
            parse_rfcomm_table(table, "00:11:62:dd:ee:ff").as_deref(),
            Some("rfcomm1")
        );
        assert_eq!(parse_rfcomm_table(table, "00:00:00:00:00:00"), None);
        assert_eq!(parse_rfcomm_table("", "00:11:62:AA:BB:CC"), None);
    }

    #[test]
    fn test_list_ports_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ttyUSB1", "tty0", "rfcomm0", "ttyACM0", "null", "ttyUSB0"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = list_ports_in(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["rfcomm0", "ttyACM0", "ttyUSB0", "ttyUSB1"]);
    }

    #[test]
    fn test_list_ports_missing_dir() {
        assert!(list_ports_in(Path::new("/definitely/not/here")).is_empty());
    }
}
