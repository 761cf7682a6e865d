//! SLIP-0010 key derivation on ed25519
//!
//! The master key is the HMAC-SHA512 of the seed keyed with
//! `"ed25519 seed"`. Each child is the HMAC-SHA512, keyed with the parent
//! chain code, of `0x00 || parent key || index`. Only hardened indices
//! exist on this curve: a public parent cannot derive children.
//!
//! Paths are parsed by [`hdpath`](../hdpath/index.html).
//!
//! ```
//! use zenon::bip::bip39::{Seed, SEED_SIZE};
//! use zenon::hdwallet;
//!
//! let seed = Seed::from_bytes([0; SEED_SIZE]);
//! let xprv = hdwallet::derive_for_path("m/44'/73404'/0'", &seed).unwrap();
//! let public_key = xprv.public();
//! ```
//!
use cryptoxide::ed25519;
use cryptoxide::hmac::Hmac;
use cryptoxide::mac::Mac;
use cryptoxide::sha2::Sha512;
use log::trace;

use crate::bip::bip39;
use crate::hdpath::{self, Path, HARDENED_OFFSET};
use crate::util::{hex, securemem};

use std::{error, fmt, result};

pub const KEY_SIZE: usize = 32;
pub const CHAIN_CODE_SIZE: usize = 32;
pub const XPRV_SIZE: usize = KEY_SIZE + CHAIN_CODE_SIZE;
pub const PUBLIC_KEY_SIZE: usize = 32;

/// HMAC key used to compute the master key from a seed
pub const SEED_MODIFIER: &[u8] = b"ed25519 seed";

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// `XPRV_SIZE` bytes expected
    InvalidXPrvSize(usize),
    InvalidPublicKeySize(usize),
    /// a child key was requested with a non hardened index
    ExpectedHardDerivation(u32),
    PathError(hdpath::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidXPrvSize(sz) => write!(
                f,
                "extended private key of {} bytes expected, found {} bytes",
                XPRV_SIZE, sz
            ),
            Error::InvalidPublicKeySize(sz) => write!(
                f,
                "public key of {} bytes expected, found {} bytes",
                PUBLIC_KEY_SIZE, sz
            ),
            Error::ExpectedHardDerivation(index) => write!(
                f,
                "ed25519 keys only support hardened derivation, received index 0x{:x}",
                index
            ),
            Error::PathError(err) => write!(f, "{}", err),
        }
    }
}
impl From<hdpath::Error> for Error {
    fn from(e: hdpath::Error) -> Error {
        Error::PathError(e)
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::PathError(ref err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

fn hmac_sha512(key: &[u8], chunks: &[&[u8]]) -> [u8; XPRV_SIZE] {
    let mut mac = Hmac::new(Sha512::new(), key);
    for chunk in chunks {
        mac.input(chunk);
    }
    let mut out = [0u8; XPRV_SIZE];
    mac.raw_result(&mut out);
    out
}

/// Extended Private Key: the 32 bytes private key followed by
/// the 32 bytes chain code.
pub struct XPrv([u8; XPRV_SIZE]);
impl XPrv {
    /// create the master key of the wallet from the given BIP39 `Seed`.
    pub fn generate_from_seed(seed: &bip39::Seed) -> Self {
        Self::generate_from_bytes(seed.as_ref())
    }

    /// create the master key from arbitrary seed bytes
    pub fn generate_from_bytes(seed: &[u8]) -> Self {
        trace!("computing master key from {} bytes of seed", seed.len());
        XPrv(hmac_sha512(SEED_MODIFIER, &[seed]))
    }

    pub fn from_bytes(bytes: [u8; XPRV_SIZE]) -> Self {
        XPrv(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != XPRV_SIZE {
            return Err(Error::InvalidXPrvSize(bytes.len()));
        }
        let mut buf = [0u8; XPRV_SIZE];
        buf[..].clone_from_slice(bytes);
        Ok(XPrv::from_bytes(buf))
    }

    /// the 32 bytes private key
    pub fn key(&self) -> &[u8] {
        &self.0[..KEY_SIZE]
    }

    pub fn chain_code(&self) -> &[u8] {
        &self.0[KEY_SIZE..]
    }

    /// derive the child key at the given (already hardened) index.
    ///
    /// ```
    /// use zenon::hdwallet::{XPrv, Error, XPRV_SIZE};
    ///
    /// let xprv = XPrv::from_bytes([0; XPRV_SIZE]);
    /// assert!(xprv.derive(0x8000_0000).is_ok());
    /// assert_eq!(xprv.derive(44).map(|_| ()), Err(Error::ExpectedHardDerivation(44)));
    /// ```
    pub fn derive(&self, index: u32) -> Result<Self> {
        if index < HARDENED_OFFSET {
            return Err(Error::ExpectedHardDerivation(index));
        }
        trace!("deriving child key 0x{:x}", index);
        let index_bytes = index.to_be_bytes();
        Ok(XPrv(hmac_sha512(
            self.chain_code(),
            &[&[0u8][..], self.key(), &index_bytes[..]],
        )))
    }

    /// derive every index of the path, starting from this key.
    pub fn derive_path(&self, path: &Path) -> Result<Self> {
        let mut xprv = self.clone();
        for index in path {
            xprv = xprv.derive(*index)?;
        }
        Ok(xprv)
    }

    /// the ed25519 public key associated to this private key. The private
    /// key is used as the ed25519 secret seed.
    pub fn public(&self) -> PublicKey {
        let (mut secret, public) = ed25519::keypair(self.key());
        securemem::zero(&mut secret);
        PublicKey(public)
    }
}
impl PartialEq for XPrv {
    fn eq(&self, rhs: &XPrv) -> bool {
        self.0[..] == rhs.0[..]
    }
}
impl Eq for XPrv {}
impl Clone for XPrv {
    fn clone(&self) -> Self {
        XPrv(self.0)
    }
}
impl fmt::Debug for XPrv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Display for XPrv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl AsRef<[u8]> for XPrv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl Drop for XPrv {
    fn drop(&mut self) {
        securemem::zero(&mut self.0);
    }
}

/// parse the given path and derive it from the master key of the seed.
///
/// # Error
///
/// fails with a [`PathError`](enum.Error.html#variant.PathError) if the
/// path does not follow the `m/<n>'/<n>'...` grammar.
///
pub fn derive_for_path(path: &str, seed: &bip39::Seed) -> Result<XPrv> {
    let path: Path = path.parse()?;
    XPrv::generate_from_seed(seed).derive_path(&path)
}

/// ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);
impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidPublicKeySize(bytes.len()));
        }
        let mut buf = [0u8; PUBLIC_KEY_SIZE];
        buf[..].clone_from_slice(bytes);
        Ok(PublicKey::from_bytes(buf))
    }
}
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
