//! # Command Encoder
//!
//! A fluent builder that turns print directives into ESC/POS bytes.
//!
//! Every operation appends exactly one fully formed chunk to the encoder's
//! [`CommandBuffer`] and returns the encoder for chaining. Nothing is
//! validated beyond clamping numeric parameters; text is passed through as
//! UTF-8.
//!
//! ## Example
//!
//! ```
//! use kvittering::encoder::CommandEncoder;
//! use kvittering::protocol::text::Alignment;
//!
//! let mut enc = CommandEncoder::new();
//! enc.initialize()
//!     .align(Alignment::Center)
//!     .bold(true)
//!     .println("SALONG")
//!     .bold(false)
//!     .line('-', 32)
//!     .columns("1x Herreklipp", "500.00 kr", 32)
//!     .cut(false);
//!
//! let bytes = enc.finalize();
//! assert_eq!(&bytes[..2], &[0x1B, 0x40]);
//! ```
//!
//! ## Column Width
//!
//! [`columns`](CommandEncoder::columns) counts every `char` as one printed
//! cell. Wide glyphs (CJK, emoji) will push the right column past the edge;
//! receipts in this domain are Latin text so this is accepted.
//!
//! ## One Job Per Encoder
//!
//! An encoder is built, driven and flattened for a single print job. Share
//! nothing between concurrent jobs: construct a fresh encoder for each.

mod buffer;

pub use buffer::CommandBuffer;

use crate::protocol::commands::{self, CutMode, LF};
use crate::protocol::text::{self, Alignment};

/// Default width in characters for rules and columns (58 mm paper)
pub const DEFAULT_WIDTH: usize = 32;

/// Default fill character for [`CommandEncoder::line`]
pub const DEFAULT_RULE: char = '-';

/// ESC/POS command builder
#[derive(Debug, Clone, Default)]
pub struct CommandEncoder {
    buf: CommandBuffer,
}

impl CommandEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    // === Printer Control ===

    /// Reset printer to defaults (ESC @)
    pub fn initialize(&mut self) -> &mut Self {
        self.buf.append(commands::init());
        self
    }

    /// Cut paper; `partial` leaves a small hinge
    pub fn cut(&mut self, partial: bool) -> &mut Self {
        let mode = if partial {
            CutMode::Partial
        } else {
            CutMode::Full
        };
        self.buf.append(commands::cut(mode));
        self
    }

    /// Kick the cash drawer
    pub fn open_drawer(&mut self) -> &mut Self {
        self.buf.append(commands::open_drawer());
        self
    }

    // === Text Style ===

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.buf.append(text::align(alignment));
        self
    }

    /// Character size multipliers, each clamped to 1..=8
    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        self.buf.append(text::size(width, height));
        self
    }

    pub fn bold(&mut self, on: bool) -> &mut Self {
        self.buf.append(text::bold(on));
        self
    }

    pub fn underline(&mut self, on: bool) -> &mut Self {
        self.buf.append(text::underline(on));
        self
    }

    // === Text Output ===

    /// Write raw text without a line break
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.append(s.as_bytes());
        self
    }

    /// Write text followed by one line feed
    pub fn println(&mut self, s: &str) -> &mut Self {
        let mut chunk = Vec::with_capacity(s.len() + 1);
        chunk.extend_from_slice(s.as_bytes());
        chunk.push(LF);
        self.buf.append(chunk);
        self
    }

    /// Emit `lines` line feeds
    pub fn feed(&mut self, lines: usize) -> &mut Self {
        self.buf.append(vec![LF; lines]);
        self
    }

    /// Horizontal rule: `fill` repeated `width` times, then a line feed
    pub fn line(&mut self, fill: char, width: usize) -> &mut Self {
        let mut rule = fill.to_string().repeat(width);
        rule.push('\n');
        self.buf.append(rule.into_bytes());
        self
    }

    /// Left and right text on one line, space-padded to `width`.
    ///
    /// When the two texts together are as wide as or wider than `width` they
    /// are printed back to back: no padding, no truncation.
    pub fn columns(&mut self, left: &str, right: &str, width: usize) -> &mut Self {
        let used = left.chars().count() + right.chars().count();
        let padding = width.saturating_sub(used);

        let mut row = String::with_capacity(left.len() + padding + right.len() + 1);
        row.push_str(left);
        row.extend(std::iter::repeat_n(' ', padding));
        row.push_str(right);
        row.push('\n');
        self.buf.append(row.into_bytes());
        self
    }

    // === Build ===

    /// The encoded stream so far, leaving the encoder untouched
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.flatten()
    }

    /// Consume the encoder and return the encoded stream
    pub fn finalize(self) -> Vec<u8> {
        self.buf.flatten()
    }

    /// Drop everything encoded so far so the encoder can build a new receipt
    pub fn clear(&mut self) -> &mut Self {
        self.buf.clear();
        self
    }

    /// Underlying chunk buffer
    pub fn buffer(&self) -> &CommandBuffer {
        &self.buf
    }
}
