//! hardened derivation paths
//!
//! Only hardened derivation exists for ed25519 keys, a path is therefore
//! written `m` followed by one or more `/<index>'` segments, for example
//! `m/44'/73404'/0'`. The apostrophe is mandatory on every segment.
//!
//! ```
//! use zenon::hdpath::{Path, HARDENED_OFFSET};
//!
//! let path: Path = "m/44'/73404'/0'".parse().unwrap();
//! assert_eq!(path.as_ref(), &[44 + HARDENED_OFFSET, 73404 + HARDENED_OFFSET, HARDENED_OFFSET]);
//! assert_eq!(path.to_string(), "m/44'/73404'/0'");
//! ```

use std::{error, fmt, result, str};

/// offset added to an index to make it a hardened derivation index
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// the path does not follow the `m/<n>'/<n>'...` grammar
    InvalidPath(String),

    /// one of the segments is not a decimal number, or it does not
    /// fit once the hardened offset is added.
    InvalidIndex(String),

    /// the index given to build a path is already hardened
    IndexOutOfBound(u32),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPath(p) => write!(f, "invalid derivation path \"{}\"", p),
            Error::InvalidIndex(s) => write!(f, "invalid derivation index \"{}\"", s),
            Error::IndexOutOfBound(i) => write!(
                f,
                "derivation index 0x{:x} out of bound, expected below 0x{:x}",
                i, HARDENED_OFFSET
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// a derivation path, made only of hardened indices (the offset is
/// already applied to the stored values).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Path(Vec<u32>);
impl Path {
    /// build a path from the given non hardened indices, the hardened
    /// offset is added to every one of them.
    ///
    /// ```
    /// use zenon::hdpath::{Path, Error};
    ///
    /// assert_eq!(Path::hardened(&[44, 73404, 0]).unwrap().to_string(), "m/44'/73404'/0'");
    /// assert_eq!(Path::hardened(&[0x8000_0000]), Err(Error::IndexOutOfBound(0x8000_0000)));
    /// ```
    pub fn hardened(indices: &[u32]) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::InvalidPath("m".to_owned()));
        }
        let mut v = Vec::with_capacity(indices.len());
        for &index in indices {
            if index >= HARDENED_OFFSET {
                return Err(Error::IndexOutOfBound(index));
            }
            v.push(index + HARDENED_OFFSET);
        }
        Ok(Path(v))
    }

    pub fn iter(&self) -> ::std::slice::Iter<u32> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
impl AsRef<[u32]> for Path {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}
impl<'a> IntoIterator for &'a Path {
    type Item = &'a u32;
    type IntoIter = ::std::slice::Iter<'a, u32>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for index in self.0.iter() {
            write!(f, "/{}'", index - HARDENED_OFFSET)?;
        }
        Ok(())
    }
}

fn parse_segment(segment: &str) -> Result<u32> {
    let digits = match segment.strip_suffix('\'') {
        Some(digits) => digits,
        None => return Err(Error::InvalidIndex(segment.to_owned())),
    };
    // `u32::from_str` accepts a leading `+`, only plain digits are valid here
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidIndex(segment.to_owned()));
    }
    digits
        .parse::<u32>()
        .ok()
        .and_then(|index| index.checked_add(HARDENED_OFFSET))
        .ok_or_else(|| Error::InvalidIndex(segment.to_owned()))
}

impl str::FromStr for Path {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let mut segments = s.split('/');
        if segments.next() != Some("m") {
            return Err(Error::InvalidPath(s.to_owned()));
        }
        let indices = segments.map(parse_segment).collect::<Result<Vec<_>>>()?;
        if indices.is_empty() {
            return Err(Error::InvalidPath(s.to_owned()));
        }
        Ok(Path(indices))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::arbitrary::Wrapper;

    #[test]
    fn parse_valid_paths() {
        let path: Path = "m/0'".parse().unwrap();
        assert_eq!(path.as_ref(), &[HARDENED_OFFSET]);

        let path: Path = "m/44'/73404'/2147483647'".parse().unwrap();
        assert_eq!(
            path.as_ref(),
            &[0x8000_002C, 0x8001_1EBC, 0xFFFF_FFFF]
        );
    }

    #[test]
    fn reject_invalid_paths() {
        let invalids = ["", "m", "m/", "M/0'", "n/0'", "/0'", "0'", "m/0'/"];
        for p in invalids.iter() {
            assert!(p.parse::<Path>().is_err(), "{} should be invalid", p);
        }
    }

    #[test]
    fn reject_invalid_segments() {
        let invalids = [
            "m/0",
            "m/44'/0",
            "m/'",
            "m/+1'",
            "m/-1'",
            "m/1''",
            "m/ 1'",
            "m/0x1'",
            "m/a'",
            "m/2147483648'",
            "m/4294967296'",
        ];
        for p in invalids.iter() {
            match p.parse::<Path>() {
                Err(Error::InvalidIndex(_)) => {}
                r => panic!("{}: expected an invalid index, got {:?}", p, r),
            }
        }
    }

    #[test]
    fn hardened_bounds() {
        assert!(Path::hardened(&[0x7FFF_FFFF]).is_ok());
        assert_eq!(
            Path::hardened(&[1, 0x8000_0000]),
            Err(Error::IndexOutOfBound(0x8000_0000))
        );
        assert!(Path::hardened(&[]).is_err());
    }

    quickcheck! {
        fn display_parse_roundtrip(path: Wrapper<Path>) -> bool {
            path.to_string().parse::<Path>() == Ok(path.unwrap())
        }
    }
}
