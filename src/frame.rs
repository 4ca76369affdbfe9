//! Wire framing.
//!
//! Outgoing: `[CMD_HI, CMD_LO]`, or with compensation
//! `[CMD_HI, CMD_LO, RH_HI, RH_LO, CRC(RH), T_HI, T_LO, CRC(T)]`.
//!
//! Incoming: zero to three `[DATA_HI, DATA_LO, CRC(DATA)]` words.

use core::ops::Range;

use log::warn;

use crate::crc::crc8;
use crate::error::ProtocolError;

pub const MAX_COMMAND_LEN: usize = 8;
pub const MAX_RESPONSE_LEN: usize = 9;
pub const WORD_LEN: usize = 3;

/// Compensation parameters carried by a command frame.
///
/// Both raw values travel together or not at all.
#[derive(Clone, Copy, Hash, Debug, Default, PartialEq, Eq)]
pub enum Params {
    #[default]
    Bare,
    Compensated {
        raw_humidity: u16,
        raw_temperature: u16,
    },
}

impl Params {
    /// Supplying only one of the two values yields [`Params::Bare`].
    /// Zero is a valid raw value.
    pub fn from_raw(raw_humidity: Option<u16>, raw_temperature: Option<u16>) -> Self {
        match (raw_humidity, raw_temperature) {
            (Some(raw_humidity), Some(raw_temperature)) => Self::Compensated {
                raw_humidity,
                raw_temperature,
            },
            _ => Self::Bare,
        }
    }
}

/// Fixed-capacity outgoing frame.
#[derive(Clone, Debug)]
pub struct CommandFrame {
    buf: [u8; MAX_COMMAND_LEN],
    len: usize,
}

impl CommandFrame {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_COMMAND_LEN],
            len: 0,
        }
    }

    /// Overwrites the frame and returns the bytes to put on the bus.
    pub fn encode(&mut self, code: u16, params: Params) -> &[u8] {
        self.buf[..2].copy_from_slice(&code.to_be_bytes());
        self.len = match params {
            Params::Bare => 2,
            Params::Compensated {
                raw_humidity,
                raw_temperature,
            } => {
                put_word(&mut self.buf[2..5], raw_humidity);
                put_word(&mut self.buf[5..8], raw_temperature);
                MAX_COMMAND_LEN
            }
        };
        self.as_bytes()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for CommandFrame {
    fn default() -> Self {
        Self::new()
    }
}

fn put_word(dst: &mut [u8], value: u16) {
    dst[..2].copy_from_slice(&value.to_be_bytes());
    dst[2] = crc8(&dst[..2]);
}

pub fn build_command(code: u16, params: Params) -> CommandFrame {
    let mut frame = CommandFrame::new();
    frame.encode(code, params);
    frame
}

fn check_len(len: usize) -> Result<(), ProtocolError> {
    match len {
        0 | 3 | 6 | 9 => Ok(()),
        _ => Err(ProtocolError::InvalidLength(len)),
    }
}

/// Byte ranges of one response word.
#[derive(Clone, Hash, Debug, PartialEq, Eq)]
pub struct Group {
    pub index: usize,
    pub data: Range<usize>,
    pub crc: Range<usize>,
}

impl Group {
    fn at(index: usize) -> Self {
        let start = WORD_LEN * index;
        Self {
            index,
            data: start..start + 2,
            crc: start + 2..start + 3,
        }
    }
}

/// Iterator over the words of a response of a given length.
/// Clone it to walk the same response again.
#[derive(Clone, Debug)]
pub struct Groups {
    indices: Range<usize>,
}

impl Iterator for Groups {
    type Item = Group;

    fn next(&mut self) -> Option<Group> {
        self.indices.next().map(Group::at)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for Groups {}

pub fn groups(len: usize) -> Result<Groups, ProtocolError> {
    check_len(len)?;
    Ok(Groups {
        indices: 0..len / WORD_LEN,
    })
}

/// A decoded response word. `crc_ok` is informational when
/// verification is disabled.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct Word {
    pub data: [u8; 2],
    pub crc_ok: bool,
}

impl Word {
    const EMPTY: Self = Self {
        data: [0; 2],
        crc_ok: false,
    };

    pub fn value(&self) -> u16 {
        u16::from_be_bytes(self.data)
    }
}

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct Response {
    words: [Word; MAX_RESPONSE_LEN / WORD_LEN],
    count: usize,
}

impl Response {
    pub fn words(&self) -> &[Word] {
        &self.words[..self.count]
    }

    pub fn value(&self, index: usize) -> Option<u16> {
        self.words().get(index).map(Word::value)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Splits `buf` into words and validates their checksums.
///
/// With `verify_crc` set the first bad word fails the whole response.
pub fn parse_response(
    buf: &[u8],
    expected_len: usize,
    verify_crc: bool,
) -> Result<Response, ProtocolError> {
    let groups = groups(expected_len)?;
    if buf.len() < expected_len {
        return Err(ProtocolError::BufferTooShort {
            expected: expected_len,
            actual: buf.len(),
        });
    }

    let mut response = Response {
        words: [Word::EMPTY; MAX_RESPONSE_LEN / WORD_LEN],
        count: 0,
    };

    for group in groups {
        let data = [buf[group.data.start], buf[group.data.start + 1]];
        let received = buf[group.crc.start];
        let computed = crc8(&data);

        if verify_crc && computed != received {
            warn!(
                "CRC mismatch in word {}: received {:#04x}, computed {:#04x}",
                group.index, received, computed
            );
            return Err(ProtocolError::ChecksumMismatch {
                group: group.index,
                expected: received,
                computed,
            });
        }

        response.words[group.index] = Word {
            data,
            crc_ok: computed == received,
        };
        response.count += 1;
    }

    Ok(response)
}
