//! bit level manipulation of byte buffers
//!
//! Everything in this module treats a byte buffer as a single stream of
//! bits, most significant bit of the first byte first.
//!
//! * [`BitWriter`] and [`BitReader`] pack and unpack fixed width values
//!   (the 11 bits mnemonic indices for example);
//! * [`convert_bits`] regroups a sequence of `from`-bit units into a
//!   sequence of `to`-bit units (8 bits bytes to bech32's 5 bits symbols
//!   and back).
//!
use std::{error, fmt, result};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// only groups of 1 to 8 bits are supported. Contains the
    /// requested `(from, to)` widths.
    InvalidBitGroups(u8, u8),

    /// the trailing bits of the input do not form a canonical padding:
    /// more than 4 bits are left over, or the left over bits are not zero.
    InvalidIncompleteGroup,
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidBitGroups(from, to) => write!(
                f,
                "only bit groups between 1 and 8 allowed, received {} to {}",
                from, to
            ),
            Error::InvalidIncompleteGroup => write!(f, "invalid incomplete group"),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[inline]
fn mask(width: u32) -> u32 {
    (1u32 << width) - 1
}

/// regroup `data`, made of `from` bits units, into `to` bits units.
///
/// Only the `from` least significant bits of every input byte are used.
///
/// With `pad` set, a trailing partial group is completed with zeros and
/// emitted. Without it, a trailing partial group is only tolerated if it is
/// at most 4 bits long and all zeros (it is then dropped).
///
/// # Example
///
/// ```
/// use zenon::util::bits::convert_bits;
///
/// let five = convert_bits(&[0xff], 8, 5, true).unwrap();
/// assert_eq!(five, vec![0b11111, 0b11100]);
///
/// let eight = convert_bits(&five, 5, 8, false).unwrap();
/// assert_eq!(eight, vec![0xff]);
/// ```
pub fn convert_bits(data: &[u8], from: u8, to: u8, pad: bool) -> Result<Vec<u8>> {
    if from < 1 || from > 8 || to < 1 || to > 8 {
        return Err(Error::InvalidBitGroups(from, to));
    }
    let from_bits = u32::from(from);
    let to_bits = u32::from(to);

    let mut regrouped = Vec::with_capacity(data.len() * from as usize / to as usize + 1);
    let mut acc = 0u32;
    let mut filled = 0u32;

    for &value in data {
        acc = (acc << from_bits) | (u32::from(value) & mask(from_bits));
        filled += from_bits;
        while filled >= to_bits {
            filled -= to_bits;
            regrouped.push(((acc >> filled) & mask(to_bits)) as u8);
        }
        acc &= mask(filled);
    }

    if filled > 0 {
        if pad {
            regrouped.push(((acc << (to_bits - filled)) & mask(to_bits)) as u8);
        } else if filled > 4 || acc != 0 {
            return Err(Error::InvalidIncompleteGroup);
        }
    }

    Ok(regrouped)
}

/// accumulate fixed width values into a byte buffer
pub struct BitWriter {
    buffer: Vec<u8>,
    acc: u32,
    filled: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            buffer: Vec::new(),
            acc: 0,
            filled: 0,
        }
    }

    /// append the `width` least significant bits of `value`.
    ///
    /// # panic
    ///
    /// `width` is limited to 16 bits, wider values are a programming error.
    pub fn write(&mut self, value: u16, width: u32) {
        assert!(width <= 16, "cannot write more than 16 bits at once");
        self.acc = (self.acc << width) | (u32::from(value) & mask(width));
        self.filled += width;
        while self.filled >= 8 {
            self.filled -= 8;
            self.buffer.push((self.acc >> self.filled) as u8);
        }
        self.acc &= mask(self.filled);
    }

    /// number of bits written so far
    pub fn len(&self) -> usize {
        self.buffer.len() * 8 + self.filled as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// the written bytes, the last byte being padded with zeros
    /// on its least significant bits.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.buffer.push((self.acc << (8 - self.filled)) as u8);
        }
        ::std::mem::replace(&mut self.buffer, Vec::new())
    }
}
impl Default for BitWriter {
    fn default() -> Self {
        BitWriter::new()
    }
}
impl Drop for BitWriter {
    fn drop(&mut self) {
        super::securemem::zero(&mut self.buffer);
        self.acc = 0;
    }
}

/// read fixed width values out of a byte buffer
pub struct BitReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            buffer: bytes,
            position: 0,
        }
    }

    /// number of bits left to read
    pub fn remaining(&self) -> usize {
        self.buffer.len() * 8 - self.position
    }

    /// read the next `width` bits, `None` if the buffer is exhausted.
    pub fn read(&mut self, width: u32) -> Option<u16> {
        if width > 16 || self.remaining() < width as usize {
            return None;
        }
        let mut value = 0u16;
        for _ in 0..width {
            let byte = self.buffer[self.position / 8];
            let bit = (byte >> (7 - (self.position % 8))) & 1;
            value = (value << 1) | u16::from(bit);
            self.position += 1;
        }
        Some(value)
    }
}
