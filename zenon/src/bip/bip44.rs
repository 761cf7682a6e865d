//! BIP44 accounts
//!
//! Every account of the wallet lives at `m/44'/73404'/<account>'`: the
//! purpose and the coin type are fixed, only the account number varies.
//! All three levels are hardened, the last level of the path being the
//! account key itself.
//!
//! # Example
//!
//! ```
//! use zenon::bip::bip44::Account;
//!
//! let account = Account::new(3).unwrap();
//!
//! assert_eq!(account.to_path().to_string(), "m/44'/73404'/3'");
//! ```

use crate::hdpath::{Path, HARDENED_OFFSET};
use std::{error, fmt, result};

/// number of levels of an account path
pub const BIP44_PATH_LENGTH: usize = 3;
/// `44'`
pub const BIP44_PURPOSE: u32 = 0x8000002C;
/// the BIP44 coin type of zenon, hardened (73404')
pub const BIP44_COIN_TYPE: u32 = 0x80011EBC;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub enum Error {
    /// the path does not have `BIP44_PATH_LENGTH` levels
    InvalidLength(usize),

    /// first level is not `44'`
    InvalidPurpose(u32),

    /// second level is not the zenon coin type
    InvalidType(u32),

    /// the account number does not fit in 31 bits, it cannot be
    /// hardened.
    AccountOutOfBound(u32),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidLength(given) => write!(
                f,
                "account path of {} levels expected, found {}",
                BIP44_PATH_LENGTH, given
            ),
            Error::InvalidPurpose(given) => write!(
                f,
                "bip44 purpose 0x{:x} expected, found 0x{:x}",
                BIP44_PURPOSE, given
            ),
            Error::InvalidType(given) => write!(
                f,
                "zenon coin type 0x{:x} expected, found 0x{:x}",
                BIP44_COIN_TYPE, given
            ),
            Error::AccountOutOfBound(given) => write!(
                f,
                "account number must be below 0x{:x}, found 0x{:x}",
                HARDENED_OFFSET, given
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account(u32);
impl Account {
    pub fn new(account: u32) -> Result<Self> {
        if account >= HARDENED_OFFSET {
            return Err(Error::AccountOutOfBound(account));
        }
        Ok(Account(account))
    }

    /// retrieve the account from a `m/44'/73404'/<account>'` path.
    ///
    /// ```
    /// use zenon::bip::bip44::{Account, Error};
    /// use zenon::hdpath::Path;
    ///
    /// let path: Path = "m/44'/73404'/7'".parse().unwrap();
    /// assert_eq!(Account::from_path(&path).unwrap().get_account_number(), 7);
    ///
    /// let path: Path = "m/44'/1815'/7'".parse().unwrap();
    /// assert_eq!(Account::from_path(&path), Err(Error::InvalidType(0x80000717)));
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.as_ref() {
            &[purpose, coin_type, account] => {
                if purpose != BIP44_PURPOSE {
                    return Err(Error::InvalidPurpose(purpose));
                }
                if coin_type != BIP44_COIN_TYPE {
                    return Err(Error::InvalidType(coin_type));
                }
                Account::new(account - HARDENED_OFFSET)
            }
            indices => Err(Error::InvalidLength(indices.len())),
        }
    }

    pub fn get_account_number(&self) -> u32 {
        self.0
    }
    pub fn get_scheme_value(&self) -> u32 {
        self.0 | HARDENED_OFFSET
    }

    /// the full derivation path of the account key
    pub fn to_path(&self) -> Path {
        match Path::hardened(&[
            BIP44_PURPOSE - HARDENED_OFFSET,
            BIP44_COIN_TYPE - HARDENED_OFFSET,
            self.0,
        ]) {
            Ok(path) => path,
            // every index is below the hardened offset: the constants by
            // definition, the account by construction.
            Err(err) => unreachable!("invalid bip44 path: {}", err),
        }
    }
}
impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
#[cfg(feature = "generic-serialization")]
impl serde::Serialize for Account {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}
#[cfg(feature = "generic-serialization")]
impl<'de> serde::Deserialize<'de> for Account {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AccountVisitor;
        impl<'de> serde::de::Visitor<'de> for AccountVisitor {
            type Value = Account;

            fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "an account number below 2^31")
            }

            fn visit_u16<E>(self, v: u16) -> result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                serde::de::Visitor::visit_u32(self, u32::from(v))
            }
            fn visit_u32<E>(self, v: u32) -> result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Account::new(v).map_err(|_| {
                    E::invalid_value(
                        serde::de::Unexpected::Unsigned(u64::from(v)),
                        &"from 0 to 0x7fffffff",
                    )
                })
            }

            fn visit_u64<E>(self, v: u64) -> result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v > 0xFFFFFFFF {
                    return Err(E::invalid_value(
                        serde::de::Unexpected::Unsigned(v),
                        &"an account number below 2^31",
                    ));
                }
                serde::de::Visitor::visit_u32(self, v as u32)
            }
        }
        deserializer.deserialize_u32(AccountVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn account_bounds() {
        assert!(Account::new(0).is_ok());
        assert!(Account::new(0x7FFF_FFFF).is_ok());
        assert_eq!(
            Account::new(0x8000_0000),
            Err(Error::AccountOutOfBound(0x8000_0000))
        );
        assert_eq!(
            Account::new(0xFFFF_FFFF),
            Err(Error::AccountOutOfBound(0xFFFF_FFFF))
        );
    }

    #[test]
    fn account_path() {
        let account = Account::new(0).unwrap();
        assert_eq!(
            account.to_path().as_ref(),
            &[BIP44_PURPOSE, BIP44_COIN_TYPE, HARDENED_OFFSET]
        );
        assert_eq!(account.get_scheme_value(), HARDENED_OFFSET);

        let account = Account::new(0x7FFF_FFFF).unwrap();
        assert_eq!(account.to_path().to_string(), "m/44'/73404'/2147483647'");
    }

    #[test]
    fn from_path_errors() {
        let path: Path = "m/44'/73404'".parse().unwrap();
        assert_eq!(Account::from_path(&path), Err(Error::InvalidLength(2)));
        let path: Path = "m/49'/73404'/0'".parse().unwrap();
        assert_eq!(
            Account::from_path(&path),
            Err(Error::InvalidPurpose(0x80000031))
        );
    }

    quickcheck! {
        fn path_roundtrip(account: u32) -> bool {
            let account = account % HARDENED_OFFSET;
            let account = Account::new(account).unwrap();
            Account::from_path(&account.to_path()) == Ok(account)
        }
    }

    #[cfg(feature = "generic-serialization")]
    #[test]
    fn serde_account() {
        let account = Account::new(42).unwrap();
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, "42");
        let decoded: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, account);
        assert!(serde_json::from_str::<Account>("2147483648").is_err());
    }
}
