//! Bech32 and Bech32m encoding
//!
//! A bech32 string is made of a human readable part (the `hrp`), the
//! separator `1`, the data part in a 32 symbols alphabet and a 6 symbols
//! checksum. The checksum is a BCH code over the hrp and the data; the
//! constant it must verify against tells apart the original bech32
//! ([BIP173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki))
//! from bech32m ([BIP350](https://github.com/bitcoin/bips/blob/master/bip-0350.mediawiki)).
//!
//! # Example
//!
//! ```
//! use zenon::bech32::{self, Variant};
//!
//! let encoded = bech32::encode_from_base256("z", &[0u8; 20], Variant::Bech32).unwrap();
//! assert_eq!(encoded, "z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqsggv2f");
//!
//! let (hrp, bytes, variant) = bech32::decode_to_base256(&encoded).unwrap();
//! assert_eq!(hrp, "z");
//! assert_eq!(bytes, vec![0u8; 20]);
//! assert_eq!(variant, Variant::Bech32);
//! ```

use crate::util::bits;
use std::{error, fmt, result};

/// the 32 symbols of the data part, indexed by their 5 bits value
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

pub const SEPARATOR: char = '1';

/// number of symbols of the checksum
pub const CHECKSUM_LENGTH: usize = 6;

/// the shortest valid string: a 1 character hrp, the separator and
/// the checksum.
pub const MIN_LENGTH: usize = 8;

/// the longest string accepted by [`decode`](./fn.decode.html)
pub const MAX_LENGTH: usize = 90;

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// reverse lookup of `CHARSET`, -1 for the characters out of the charset
const CHARSET_REV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, 15, -1, 10, 17, 21, 20, 26, 30, 7, 5, -1, -1, -1, -1, -1, -1, -1, 29, -1, 24, 13, 25,
    9, 8, 23, -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1, -1, -1, -1,
    -1, -1, 29, -1, 24, 13, 25, 9, 8, 23, -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14,
    6, 4, 2, -1, -1, -1, -1, -1,
];

/// The checksum flavour of a bech32 string.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Variant {
    /// BIP173, checksum constant `1`
    Bech32,
    /// BIP350, checksum constant `0x2bc830a3`
    Bech32m,
}
impl Variant {
    pub fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => 1,
            Variant::Bech32m => 0x2bc8_30a3,
        }
    }

    fn from_remainder(c: u32) -> Option<Self> {
        match c {
            1 => Some(Variant::Bech32),
            0x2bc8_30a3 => Some(Variant::Bech32m),
            _ => None,
        }
    }
}
impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variant::Bech32 => write!(f, "bech32"),
            Variant::Bech32m => write!(f, "bech32m"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// the string is shorter than `MIN_LENGTH`, or longer than
    /// `MAX_LENGTH` for the bounded decoder. Contains the length.
    InvalidLength(usize),
    /// a character out of the printable US-ASCII range (33 to 126)
    InvalidCharacter(char),
    /// the string mixes lower and upper case characters
    MixedCase,
    /// there is no `1` in the string
    MissingSeparator,
    /// the last `1` leaves an empty hrp or less than 6 characters after
    /// it. Contains the position of the separator.
    InvalidSeparatorIndex(usize),
    /// a data character is not part of `CHARSET`
    NonCharsetChar(char),
    /// the checksum verifies neither variant. Contains the checksum
    /// expected for each variant and the one found in the string.
    InvalidChecksum {
        expected: String,
        expected_m: String,
        actual: String,
    },
    /// a value given to the encoder does not fit in 5 bits
    InvalidDataByte(u8),
    /// the hrp given to the encoder is empty or out of the printable
    /// US-ASCII range
    InvalidHrp(String),
    Bits(bits::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidLength(len) => write!(f, "invalid bech32 string length {}", len),
            Error::InvalidCharacter(c) => {
                write!(f, "invalid character in bech32 string {:?}", c)
            }
            Error::MixedCase => write!(f, "string not all lowercase or all uppercase"),
            Error::MissingSeparator => write!(f, "missing separator '{}'", SEPARATOR),
            Error::InvalidSeparatorIndex(idx) => {
                write!(f, "invalid separator index {}", idx)
            }
            Error::NonCharsetChar(c) => write!(f, "invalid character not part of charset: {:?}", c),
            Error::InvalidChecksum {
                expected,
                expected_m,
                actual,
            } => write!(
                f,
                "invalid checksum (expected (bech32={}, bech32m={}) got {})",
                expected, expected_m, actual
            ),
            Error::InvalidDataByte(b) => write!(f, "invalid data byte: {}", b),
            Error::InvalidHrp(hrp) => write!(f, "invalid human readable part {:?}", hrp),
            Error::Bits(err) => write!(f, "{}", err),
        }
    }
}
impl From<bits::Error> for Error {
    fn from(e: bits::Error) -> Self {
        Error::Bits(e)
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Bits(ref err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

fn polymod(values: &[u8], chk: u32) -> u32 {
    let mut chk = chk;
    for &v in values {
        let top = chk >> 25;
        chk = (chk & 0x01ff_ffff) << 5 ^ u32::from(v);
        for (i, g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

/// the checksum state after the hrp: its high bits, a zero, its low bits
fn hrp_polymod(hrp: &[u8]) -> u32 {
    let high: Vec<u8> = hrp.iter().map(|c| c >> 5).collect();
    let low: Vec<u8> = hrp.iter().map(|c| c & 0x1f).collect();
    let chk = polymod(&high, 1);
    let chk = polymod(&[0], chk);
    polymod(&low, chk)
}

fn create_checksum(hrp: &[u8], data: &[u8], variant: Variant) -> [u8; CHECKSUM_LENGTH] {
    let chk = polymod(data, hrp_polymod(hrp));
    let chk = polymod(&[0u8; CHECKSUM_LENGTH], chk) ^ variant.constant();
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((chk >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

fn to_chars(data: &[u8]) -> String {
    data.iter().map(|&d| CHARSET[d as usize] as char).collect()
}

fn check_hrp(hrp: &str) -> Result<()> {
    if hrp.is_empty() || !hrp.bytes().all(|b| b >= 33 && b <= 126) {
        return Err(Error::InvalidHrp(hrp.to_owned()));
    }
    Ok(())
}

/// encode the hrp and the 5 bits values of `data` with the checksum of the
/// given variant. The output is lowercase, whatever the case of the hrp.
///
/// ```
/// use zenon::bech32::{encode, Variant};
///
/// assert_eq!(encode("A", &[], Variant::Bech32).unwrap(), "a12uel5l");
/// assert_eq!(encode("a", &[], Variant::Bech32m).unwrap(), "a1lqfn3a");
/// ```
///
/// # Error
///
/// fails with [`InvalidDataByte`](enum.Error.html#variant.InvalidDataByte)
/// if one of the values does not fit in 5 bits.
///
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> Result<String> {
    check_hrp(hrp)?;
    if let Some(&b) = data.iter().find(|&&b| b > 0x1f) {
        return Err(Error::InvalidDataByte(b));
    }
    let hrp = hrp.to_ascii_lowercase();
    let checksum = create_checksum(hrp.as_bytes(), data, variant);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    out.push_str(&hrp);
    out.push(SEPARATOR);
    out.push_str(&to_chars(data));
    out.push_str(&to_chars(&checksum));
    Ok(out)
}

/// decode a bech32 string of at most 90 characters.
///
/// Returns the lowercase hrp, the 5 bits values of the data part (without
/// the checksum) and the variant the checksum verified against.
///
/// ```
/// use zenon::bech32::{decode, Error, Variant};
///
/// assert_eq!(decode("A12UEL5L"), Ok(("a".to_owned(), vec![], Variant::Bech32)));
/// assert_eq!(decode("a12UEL5L"), Err(Error::MixedCase));
/// ```
pub fn decode(s: &str) -> Result<(String, Vec<u8>, Variant)> {
    if s.len() > MAX_LENGTH {
        return Err(Error::InvalidLength(s.len()));
    }
    decode_no_limit(s)
}

/// decode a bech32 string of any length, for the uses (long hrps,
/// large payloads) out of the 90 characters limit of BIP173.
pub fn decode_no_limit(s: &str) -> Result<(String, Vec<u8>, Variant)> {
    // the length is checked in characters: any non ASCII character is
    // reported as an invalid character rather than a length error.
    let len = s.chars().count();
    if len < MIN_LENGTH {
        return Err(Error::InvalidLength(len));
    }
    if let Some(c) = s.chars().find(|&c| (c as u32) < 33 || (c as u32) > 126) {
        return Err(Error::InvalidCharacter(c));
    }

    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let pos = match s.rfind(SEPARATOR) {
        None => return Err(Error::MissingSeparator),
        Some(pos) => pos,
    };
    if pos < 1 || pos + CHECKSUM_LENGTH + 1 > s.len() {
        return Err(Error::InvalidSeparatorIndex(pos));
    }

    let hrp = &s[..pos];
    let mut data = Vec::with_capacity(s.len() - pos - 1);
    for c in s[pos + 1..].chars() {
        match CHARSET_REV.get(c as usize) {
            Some(&v) if v >= 0 => data.push(v as u8),
            _ => return Err(Error::NonCharsetChar(c)),
        }
    }

    let remainder = polymod(&data, hrp_polymod(hrp.as_bytes()));
    let payload_len = data.len() - CHECKSUM_LENGTH;
    let variant = match Variant::from_remainder(remainder) {
        Some(variant) => variant,
        None => {
            let payload = &data[..payload_len];
            return Err(Error::InvalidChecksum {
                expected: to_chars(&create_checksum(hrp.as_bytes(), payload, Variant::Bech32)),
                expected_m: to_chars(&create_checksum(
                    hrp.as_bytes(),
                    payload,
                    Variant::Bech32m,
                )),
                actual: to_chars(&data[payload_len..]),
            });
        }
    };

    data.truncate(payload_len);
    Ok((hrp.to_owned(), data, variant))
}

/// regroup the given bytes into 5 bits values (padding the last group)
/// and encode them.
pub fn encode_from_base256(hrp: &str, data: &[u8], variant: Variant) -> Result<String> {
    let converted = bits::convert_bits(data, 8, 5, true)?;
    encode(hrp, &converted, variant)
}

/// decode the string and regroup its 5 bits values into bytes. The
/// padding bits must be zeros.
pub fn decode_to_base256(s: &str) -> Result<(String, Vec<u8>, Variant)> {
    let (hrp, data, variant) = decode(s)?;
    let converted = bits::convert_bits(&data, 5, 8, false)?;
    Ok((hrp, converted, variant))
}
