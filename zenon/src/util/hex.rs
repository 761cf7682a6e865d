//! Lower case hexadecimal, used to print keys and seeds.
//!
//! ```
//! use zenon::util::hex;
//!
//! let key = [0xde, 0xad, 0xbe, 0xef];
//!
//! assert_eq!(hex::decode(&hex::encode(&key)).unwrap(), key);
//! ```
use std::{error, fmt, result};

const ALPHABET: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// not a hexadecimal digit, at the given offset of the input
    UnknownSymbol(usize),
    /// the input does not contain an even number of symbols
    OddLength(usize),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownSymbol(idx) => write!(f, "not an hexadecimal digit at offset {}", idx),
            Error::OddLength(len) => write!(f, "odd number of hexadecimal digits ({})", len),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// ```
/// # use zenon::util::hex::encode;
/// assert_eq!(encode(b"zenon"), "7a656e6f6e");
/// ```
pub fn encode(input: &[u8]) -> String {
    let mut s = String::with_capacity(input.len() * 2);
    for byte in input {
        s.push(ALPHABET[(byte >> 4) as usize] as char);
        s.push(ALPHABET[(byte & 0xf) as usize] as char);
    }
    s
}

fn symbol(idx: usize, byte: u8) -> Result<u8> {
    match byte {
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'0'..=b'9' => Ok(byte - b'0'),
        _ => Err(Error::UnknownSymbol(idx)),
    }
}

/// accepts both upper and lower case digits.
///
/// ```
/// # use zenon::util::hex::{decode, Error};
/// assert_eq!(decode("7A656e6f6e").unwrap(), b"zenon");
/// assert_eq!(decode("7"), Err(Error::OddLength(1)));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(Error::OddLength(bytes.len()));
    }
    let mut b = Vec::with_capacity(bytes.len() / 2);
    for (idx, pair) in bytes.chunks(2).enumerate() {
        let hi = symbol(idx * 2, pair[0])?;
        let lo = symbol(idx * 2 + 1, pair[1])?;
        b.push(hi << 4 | lo);
    }
    Ok(b)
}
