//! # ESC/POS Text Styling Commands
//!
//! | Style | Command | Hex |
//! |-------|---------|-----|
//! | Alignment | ESC a n | 1B 61 n |
//! | Character size | GS ! n | 1D 21 n |
//! | Bold | ESC E n | 1B 45 n |
//! | Underline | ESC - n | 1B 2D n |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// # Set Text Alignment (ESC a n)
///
/// Takes effect at the start of the next line and persists until changed.
///
/// ```
/// use kvittering::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Smallest size multiplier
pub const MIN_SCALE: u8 = 1;

/// Largest size multiplier
pub const MAX_SCALE: u8 = 8;

/// # Set Character Size (GS ! n)
///
/// Width and height multipliers are clamped to `1..=8` and packed into one
/// parameter byte:
///
/// ```text
/// n = (width - 1) << 4 | (height - 1)
/// ```
///
/// | Size | n |
/// |------|---|
/// | 1x1 (normal) | 0x00 |
/// | 1x2 (double height) | 0x01 |
/// | 2x2 (double) | 0x11 |
/// | 8x8 | 0x77 |
///
/// ```
/// use kvittering::protocol::text::size;
///
/// assert_eq!(size(2, 2), vec![0x1D, 0x21, 0x11]);
/// assert_eq!(size(1, 1), vec![0x1D, 0x21, 0x00]);
/// ```
pub fn size(width: u8, height: u8) -> Vec<u8> {
    let w = width.clamp(MIN_SCALE, MAX_SCALE) - 1;
    let h = height.clamp(MIN_SCALE, MAX_SCALE) - 1;
    vec![GS, b'!', (w << 4) | h]
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Bold On/Off (ESC E n)
#[inline]
pub fn bold(on: bool) -> Vec<u8> {
    vec![ESC, b'E', on as u8]
}

/// # Underline On/Off (ESC - n)
///
/// Only the single-dot underline (`n = 1`) is used.
#[inline]
pub fn underline(on: bool) -> Vec<u8> {
    vec![ESC, b'-', on as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_codes() {
        assert_eq!(align(Alignment::Left), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align(Alignment::Right), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_size_packing() {
        assert_eq!(size(1, 1), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size(1, 2), vec![0x1D, 0x21, 0x01]);
        assert_eq!(size(2, 1), vec![0x1D, 0x21, 0x10]);
        assert_eq!(size(2, 2), vec![0x1D, 0x21, 0x11]);
        assert_eq!(size(8, 8), vec![0x1D, 0x21, 0x77]);
    }

    #[test]
    fn test_size_clamps_out_of_range() {
        assert_eq!(size(0, 0), size(1, 1));
        assert_eq!(size(9, 200), size(8, 8));
        assert_eq!(size(0, 3), vec![0x1D, 0x21, 0x02]);
    }

    #[test]
    fn test_bold_and_underline() {
        assert_eq!(bold(true), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold(false), vec![0x1B, 0x45, 0x00]);
        assert_eq!(underline(true), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline(false), vec![0x1B, 0x2D, 0x00]);
    }
}
