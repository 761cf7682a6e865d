//! Zenon key management
//!
//! From a BIP39 mnemonic phrase to a bech32 `z1...` address:
//!
//! * [`bip::bip39`](./bip/bip39/index.html): entropy, mnemonics and seed;
//! * [`hdwallet`](./hdwallet/index.html): SLIP-0010 ed25519 hardened
//!   derivation, along the paths of [`hdpath`](./hdpath/index.html);
//! * [`bip::bip44`](./bip/bip44/index.html): the `m/44'/73404'/<account>'`
//!   account paths;
//! * [`address`](./address/index.html) and [`bech32`](./bech32/index.html):
//!   address computation and text encoding;
//! * [`keystore`](./keystore/index.html): the whole pipeline at once.

#[cfg(feature = "generic-serialization")]
#[macro_use]
extern crate serde_derive;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod util;

pub mod bech32;
pub mod bip;
pub mod hdpath;
pub mod hdwallet;

pub mod address;
pub mod keystore;
