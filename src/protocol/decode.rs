//! # Command Stream Decoding
//!
//! Splits an encoded byte stream back into the commands and text it was built
//! from. Only the fixed-length commands this crate emits are recognised;
//! any other escape sequence is kept as text so nothing is silently dropped.
//!
//! Used for plain-text previews of a receipt and for structural assertions in
//! tests.

use super::commands::{CutMode, ESC, GS};
use super::text::Alignment;

/// A decoded printer command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Init,
    Align(Alignment),
    Size { width: u8, height: u8 },
    Bold(bool),
    Underline(bool),
    Cut(CutMode),
    OpenDrawer,
}

impl Command {
    /// Length of the encoded command in bytes
    pub fn encoded_len(&self) -> usize {
        match self {
            Command::Init => 2,
            Command::OpenDrawer => 5,
            _ => 3,
        }
    }
}

/// One piece of a decoded stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Command(Command),
    /// A run of printable bytes, line feeds included
    Text(String),
}

/// Decode a byte stream into commands and text runs.
///
/// ```
/// use kvittering::protocol::decode::{decode, Command, Segment};
///
/// let segments = decode(&[0x1B, 0x40, b'h', b'i', 0x0A]);
/// assert_eq!(
///     segments,
///     vec![Segment::Command(Command::Init), Segment::Text("hi\n".into())]
/// );
/// ```
pub fn decode(data: &[u8]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text: Vec<u8> = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        if let Some(command) = match_command(&data[pos..]) {
            if !text.is_empty() {
                segments.push(Segment::Text(String::from_utf8_lossy(&text).into_owned()));
                text.clear();
            }
            pos += command.encoded_len();
            segments.push(Segment::Command(command));
        } else {
            text.push(data[pos]);
            pos += 1;
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(String::from_utf8_lossy(&text).into_owned()));
    }

    segments
}

/// Printable text of a stream with every recognised command removed.
pub fn plain_text(data: &[u8]) -> String {
    decode(data)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Command(_) => None,
        })
        .collect()
}

/// Only the commands of a stream, in order.
pub fn commands(data: &[u8]) -> Vec<Command> {
    decode(data)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Command(command) => Some(command),
            Segment::Text(_) => None,
        })
        .collect()
}

fn match_command(data: &[u8]) -> Option<Command> {
    match data {
        [ESC, b'@', ..] => Some(Command::Init),
        [ESC, b'a', n, ..] => match n {
            0 => Some(Command::Align(Alignment::Left)),
            1 => Some(Command::Align(Alignment::Center)),
            2 => Some(Command::Align(Alignment::Right)),
            _ => None,
        },
        [ESC, b'E', n @ (0 | 1), ..] => Some(Command::Bold(*n == 1)),
        [ESC, b'-', n @ (0 | 1), ..] => Some(Command::Underline(*n == 1)),
        [ESC, b'p', 0x00, 0x19, 0xFA, ..] => Some(Command::OpenDrawer),
        [GS, b'!', n, ..] if n >> 4 < 8 && n & 0x0F < 8 => Some(Command::Size {
            width: (n >> 4) + 1,
            height: (n & 0x0F) + 1,
        }),
        [GS, b'V', 0, ..] => Some(Command::Cut(CutMode::Full)),
        [GS, b'V', 1, ..] => Some(Command::Cut(CutMode::Partial)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{commands as cmd, text};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_every_command() {
        let mut data = Vec::new();
        data.extend(cmd::init());
        data.extend(text::align(Alignment::Right));
        data.extend(text::size(3, 2));
        data.extend(text::bold(true));
        data.extend(text::underline(false));
        data.extend(cmd::cut(CutMode::Partial));
        data.extend(cmd::open_drawer());

        assert_eq!(
            commands(&data),
            vec![
                Command::Init,
                Command::Align(Alignment::Right),
                Command::Size {
                    width: 3,
                    height: 2
                },
                Command::Bold(true),
                Command::Underline(false),
                Command::Cut(CutMode::Partial),
                Command::OpenDrawer,
            ]
        );
    }

    #[test]
    fn test_encoded_len_matches_builders() {
        assert_eq!(Command::Init.encoded_len(), cmd::init().len());
        assert_eq!(
            Command::OpenDrawer.encoded_len(),
            cmd::open_drawer().len()
        );
        assert_eq!(Command::Bold(true).encoded_len(), text::bold(true).len());
    }

    #[test]
    fn test_text_between_commands() {
        let mut data = b"left".to_vec();
        data.extend(text::bold(true));
        data.extend("Skjeggstuss 200.00 kr\n".as_bytes());

        assert_eq!(
            decode(&data),
            vec![
                Segment::Text("left".into()),
                Segment::Command(Command::Bold(true)),
                Segment::Text("Skjeggstuss 200.00 kr\n".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_escape_kept_as_text() {
        // ESC a 7 is not a valid alignment
        let data = [ESC, b'a', 7, b'x'];
        assert_eq!(
            decode(&data),
            vec![Segment::Text(String::from_utf8_lossy(&data).into_owned())]
        );
    }

    #[test]
    fn test_truncated_command_is_text() {
        let data = [GS, b'V'];
        assert_eq!(plain_text(&data), "\u{1d}V");
    }

    #[test]
    fn test_plain_text_strips_commands() {
        let mut data = cmd::init();
        data.extend(text::align(Alignment::Center));
        data.extend("Takk for besøket!\n".as_bytes());
        data.extend(cmd::cut(CutMode::Full));

        assert_eq!(plain_text(&data), "Takk for besøket!\n");
    }

    #[test]
    fn test_empty_stream() {
        assert!(decode(&[]).is_empty());
        assert_eq!(plain_text(&[]), "");
    }
}
