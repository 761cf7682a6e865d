//! Address creation and parsing
//!
//! An address is built from an ed25519 public key: the key is hashed with
//! SHA3-256 and the first 19 bytes of the digest are prefixed with the
//! address version byte. The 20 resulting bytes, the *core bytes*, are
//! encoded in bech32 with the `z` human readable part.
//!
//! ```
//! use zenon::address::Address;
//!
//! let address: Address = "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm".parse().unwrap();
//! assert_eq!(address.as_core_bytes()[0], 0x00);
//! assert_eq!(address.to_string(), "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm");
//! ```

use cryptoxide::digest::Digest;
use cryptoxide::sha3::Sha3;

use crate::bech32::{self, Variant};
use crate::hdwallet::PublicKey;
use crate::util::hex;

use std::{error, fmt, result, str};

/// human readable part of the bech32 encoded addresses
pub const HRP: &str = "z";

/// version byte of the addresses derived from a public key
pub const VERSION: u8 = 0;

/// number of bytes of an address, the version byte included
pub const ADDRESS_SIZE: usize = 20;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    Bech32(bech32::Error),
    /// the bech32 string does not use the `z` human readable part
    InvalidPrefix(String),
    /// the decoded payload is not `ADDRESS_SIZE` bytes long
    InvalidSize(usize),
    /// addresses are only written with the `Bech32` checksum
    InvalidVariant(Variant),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bech32(err) => write!(f, "invalid bech32 address: {}", err),
            Error::InvalidPrefix(hrp) => write!(
                f,
                "invalid address prefix, expected \"{}\" but received \"{}\"",
                HRP, hrp
            ),
            Error::InvalidSize(sz) => write!(
                f,
                "invalid address size, expected {} bytes but received {} bytes",
                ADDRESS_SIZE, sz
            ),
            Error::InvalidVariant(variant) => write!(
                f,
                "invalid address checksum, expected {} but received {}",
                Variant::Bech32, variant
            ),
        }
    }
}
impl From<bech32::Error> for Error {
    fn from(e: bech32::Error) -> Self {
        Error::Bech32(e)
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Bech32(ref err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_SIZE]);
impl Address {
    /// compute the address of the given public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let mut sha3 = Sha3::sha3_256();
        let mut digest = [0u8; 32];
        sha3.input(public_key.as_ref());
        sha3.result(&mut digest);

        let mut core = [0u8; ADDRESS_SIZE];
        core[0] = VERSION;
        core[1..].copy_from_slice(&digest[..ADDRESS_SIZE - 1]);
        Address(core)
    }

    pub fn from_core_bytes(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Address(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(Error::InvalidSize(bytes.len()));
        }
        let mut buf = [0u8; ADDRESS_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Address(buf))
    }

    pub fn as_core_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn version(&self) -> u8 {
        self.0[0]
    }

    /// the bech32 text form of the address
    pub fn to_bech32(&self) -> Result<String> {
        Ok(bech32::encode_from_base256(HRP, &self.0, Variant::Bech32)?)
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_bech32() {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}
impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0))
    }
}
impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl str::FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let (hrp, bytes, variant) = bech32::decode_to_base256(s)?;
        if hrp != HRP {
            return Err(Error::InvalidPrefix(hrp));
        }
        if variant != Variant::Bech32 {
            return Err(Error::InvalidVariant(variant));
        }
        Address::from_slice(&bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PUBLIC_KEY: &str = "0676964bd73881f251782a9c40cda2e6063381fdc06e11c083ffae0170821379";
    const CORE_BYTES: &str = "0059b22b6dd761a0d3bca049f84c61d6b2875109";
    const ADDRESS: &str = "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm";

    fn public_key() -> PublicKey {
        PublicKey::from_slice(&hex::decode(PUBLIC_KEY).unwrap()).unwrap()
    }

    #[test]
    fn address_from_public_key() {
        let address = Address::from_public_key(&public_key());
        assert_eq!(hex::encode(address.as_core_bytes()), CORE_BYTES);
        assert_eq!(address.version(), VERSION);
        assert_eq!(address.to_string(), ADDRESS);
    }

    #[test]
    fn address_is_deterministic() {
        let pk = public_key();
        assert_eq!(Address::from_public_key(&pk), Address::from_public_key(&pk));
    }

    #[test]
    fn parse_address() {
        let address: Address = ADDRESS.parse().unwrap();
        assert_eq!(hex::encode(address.as_core_bytes()), CORE_BYTES);
        let upper: Address = ADDRESS.to_uppercase().parse().unwrap();
        assert_eq!(upper, address);
    }

    #[test]
    fn parse_errors() {
        let other_prefix = bech32::encode_from_base256("a", &[0; 20], Variant::Bech32).unwrap();
        assert_eq!(
            other_prefix.parse::<Address>(),
            Err(Error::InvalidPrefix("a".to_owned()))
        );
        let short = bech32::encode_from_base256(HRP, &[0; 19], Variant::Bech32).unwrap();
        assert_eq!(short.parse::<Address>(), Err(Error::InvalidSize(19)));
        let bech32m = bech32::encode_from_base256(HRP, &[0; 20], Variant::Bech32m).unwrap();
        assert_eq!(bech32m, "z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq95cq0t");
        assert_eq!(
            bech32m.parse::<Address>(),
            Err(Error::InvalidVariant(Variant::Bech32m))
        );
        match "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllq".parse::<Address>() {
            Err(Error::Bech32(bech32::Error::InvalidChecksum { .. })) => {}
            r => panic!("expected a checksum error, got {:?}", r),
        }
    }
}
