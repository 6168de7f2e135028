//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for ESC/POS-compatible thermal receipt
//! printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, cash drawer)
//! - [`text`]: Text styling (alignment, size, bold, underline)
//! - [`decode`]: Splitting an encoded stream back into commands and text
//!
//! ## Usage Example
//!
//! ```
//! use kvittering::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::bold(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold(false));
//! data.extend(commands::cut(commands::CutMode::Full));
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! ```
//!
//! ## Command Table
//!
//! | Directive | Bytes |
//! |---|---|
//! | initialize | `1B 40` |
//! | align(left/center/right) | `1B 61 <00/01/02>` |
//! | size(w,h) | `1D 21 <(w-1)<<4 \| (h-1)>` |
//! | bold(on/off) | `1B 45 <01/00>` |
//! | underline(on/off) | `1B 2D <01/00>` |
//! | cut(full/partial) | `1D 56 <00/01>` |
//! | open drawer | `1B 70 00 19 FA` |

pub mod commands;
pub mod decode;
pub mod text;
