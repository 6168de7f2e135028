//! # ESC/POS Printer Commands
//!
//! Basic printer control: initialization, paper cut and cash drawer kick.
//!
//! ## Escape Sequence Structure
//!
//! Every command is a fixed-length byte sequence starting with one of two
//! prefix bytes:
//!
//! | Prefix | Hex | Used for |
//! |--------|-----|----------|
//! | ESC | 0x1B | Reset, alignment, emphasis, underline, drawer |
//! | GS  | 0x1D | Character size, cutter |
//!
//! Text is not a command: it is sent as raw UTF-8 bytes and printed as-is.
//! Printer state set by a command (bold, alignment, size) persists until the
//! next command changes it or the printer is initialized again.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on defaults: left aligned, normal size,
/// bold and underline off.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ## Example
///
/// ```
/// use kvittering::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// Cut mode for [`cut`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Cut the paper completely
    #[default]
    Full = 0,
    /// Leave a small hinge so the receipt stays on the roll
    Partial = 1,
}

/// # Cut Paper (GS V n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS V n |
/// | Hex     | 1D 56 n |
///
/// - `n = 0`: full cut
/// - `n = 1`: partial cut
///
/// ```
/// use kvittering::protocol::commands::{cut, CutMode};
///
/// assert_eq!(cut(CutMode::Full), vec![0x1D, 0x56, 0x00]);
/// assert_eq!(cut(CutMode::Partial), vec![0x1D, 0x56, 0x01]);
/// ```
#[inline]
pub fn cut(mode: CutMode) -> Vec<u8> {
    vec![GS, b'V', mode as u8]
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// Drawer connector pin used by [`open_drawer`] (pin 2)
pub const DRAWER_PIN: u8 = 0x00;

/// Pulse on-time in units of 2 ms
pub const DRAWER_PULSE_ON: u8 = 0x19;

/// Pulse off-time in units of 2 ms
pub const DRAWER_PULSE_OFF: u8 = 0xFA;

/// # Kick Cash Drawer (ESC p m t1 t2)
///
/// Sends a pulse to the drawer connected to the printer's drawer port.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC p m t1 t2 |
/// | Hex     | 1B 70 00 19 FA |
///
/// The pin and timing are fixed: pin 2, 50 ms on, 500 ms off.
#[inline]
pub fn open_drawer() -> Vec<u8> {
    vec![ESC, b'p', DRAWER_PIN, DRAWER_PULSE_ON, DRAWER_PULSE_OFF]
}
