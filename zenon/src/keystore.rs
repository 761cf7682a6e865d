//! Key store
//!
//! Runs the whole pipeline from a mnemonic phrase to an address:
//!
//! 1. the phrase is validated and the entropy recovered;
//! 2. the seed is stretched from the phrase and the passphrase;
//! 3. the account key is derived at `m/44'/73404'/<account>'`;
//! 4. the address is computed from the public key of the account.
//!
//! Every intermediate value is kept in the [`KeyStore`](./struct.KeyStore.html),
//! hex encoded.
//!
//! ```
//! use zenon::bip::bip39::dictionary;
//! use zenon::keystore::KeyStore;
//!
//! let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let keystore = KeyStore::from_mnemonic(&dictionary::ENGLISH, mnemonic, b"", 0).unwrap();
//!
//! assert_eq!(keystore.address, "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm");
//! ```

use log::debug;

use crate::address::{self, Address};
use crate::bip::bip39::{self, dictionary, Entropy, Seed, Type};
use crate::bip::bip44::{self, Account};
use crate::hdwallet::{self, XPrv};
use crate::util::hex;

use std::{error, fmt, result};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    Bip39(bip39::Error),
    Bip44(bip44::Error),
    HdWallet(hdwallet::Error),
    Address(address::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bip39(err) => write!(f, "invalid mnemonic: {}", err),
            Error::Bip44(err) => write!(f, "invalid account: {}", err),
            Error::HdWallet(err) => write!(f, "key derivation failed: {}", err),
            Error::Address(err) => write!(f, "address encoding failed: {}", err),
        }
    }
}
impl From<bip39::Error> for Error {
    fn from(e: bip39::Error) -> Self {
        Error::Bip39(e)
    }
}
impl From<bip44::Error> for Error {
    fn from(e: bip44::Error) -> Self {
        Error::Bip44(e)
    }
}
impl From<hdwallet::Error> for Error {
    fn from(e: hdwallet::Error) -> Self {
        Error::HdWallet(e)
    }
}
impl From<address::Error> for Error {
    fn from(e: address::Error) -> Self {
        Error::Address(e)
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Bip39(ref err) => Some(err),
            Error::Bip44(ref err) => Some(err),
            Error::HdWallet(ref err) => Some(err),
            Error::Address(ref err) => Some(err),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// every value computed along the derivation of an account address
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub struct KeyStore {
    pub mnemonic: String,
    pub entropy: String,
    pub seed: String,
    #[cfg_attr(feature = "generic-serialization", serde(rename = "privatekey"))]
    pub private_key: String,
    #[cfg_attr(feature = "generic-serialization", serde(rename = "publickey"))]
    pub public_key: String,
    pub address: String,
    #[cfg_attr(feature = "generic-serialization", serde(rename = "corebytes"))]
    pub core_bytes: String,
}
impl KeyStore {
    /// validate the mnemonic phrase and derive the key store of the account.
    ///
    /// Any white spaces are accepted between the words. The seed is
    /// stretched from the phrase exactly as given, and the phrase is kept
    /// unchanged in the key store.
    pub fn from_mnemonic<D>(dic: &D, mnemonic: &str, password: &[u8], account: u32) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let account = Account::new(account)?;
        let entropy = bip39::mnemonic_to_entropy(dic, mnemonic)?;
        let seed = Seed::from_phrase(mnemonic, password);
        Self::build(mnemonic.to_owned(), &entropy, &seed, account)
    }

    /// generate a new random entropy of the given type and derive the key
    /// store of the account.
    ///
    /// ```
    /// extern crate rand;
    /// # use zenon::bip::bip39::{dictionary, Type};
    /// # use zenon::keystore::KeyStore;
    ///
    /// let keystore = KeyStore::generate(&dictionary::ENGLISH, Type::Type24Words, rand::random, b"", 0).unwrap();
    /// assert_eq!(keystore.mnemonic.split(' ').count(), 24);
    /// ```
    pub fn generate<D, G>(dic: &D, t: Type, gen: G, password: &[u8], account: u32) -> Result<Self>
    where
        D: dictionary::Language,
        G: Fn() -> u8,
    {
        let entropy = Entropy::generate(t, gen);
        Self::from_entropy(dic, &entropy, password, account)
    }

    /// write the entropy as a phrase of the dictionary and derive the key
    /// store of the account from that phrase.
    pub fn from_entropy<D>(dic: &D, entropy: &Entropy, password: &[u8], account: u32) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let account = Account::new(account)?;
        let mnemonic = entropy.to_mnemonics().to_string(dic);
        let seed = Seed::from_mnemonic_string(&mnemonic, password);
        Self::build(mnemonic.to_string(), entropy, &seed, account)
    }

    fn build(mnemonic: String, entropy: &Entropy, seed: &Seed, account: Account) -> Result<Self> {
        debug!(
            "deriving key store from a {} words mnemonic, account {}",
            entropy.get_type(),
            account
        );

        let xprv = derive_account(seed, account)?;
        let public_key = xprv.public();
        let address = Address::from_public_key(&public_key);

        Ok(KeyStore {
            mnemonic,
            entropy: hex::encode(entropy.as_ref()),
            seed: hex::encode(seed.as_ref()),
            private_key: hex::encode(xprv.key()),
            public_key: public_key.to_string(),
            address: address.to_bech32()?,
            core_bytes: hex::encode(address.as_core_bytes()),
        })
    }
}

fn derive_account(seed: &Seed, account: Account) -> Result<XPrv> {
    let path = account.to_path();
    debug!("deriving account key at {}", path);
    Ok(XPrv::generate_from_seed(seed).derive_path(&path)?)
}

/// validate the mnemonic phrase and compute the address of the account.
///
/// As for [`KeyStore::from_mnemonic`](./struct.KeyStore.html#method.from_mnemonic)
/// the seed is stretched from the phrase as given.
///
/// ```
/// use zenon::bip::bip39::dictionary;
/// use zenon::keystore::address_for_account;
///
/// let mnemonic = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
/// let address = address_for_account(&dictionary::ENGLISH, mnemonic, b"", 1).unwrap();
///
/// assert_eq!(address.to_string(), "z1qpkmcwhgxda6vdlkhmzfextpxgseglna9vns02");
/// ```
pub fn address_for_account<D>(dic: &D, mnemonic: &str, password: &[u8], account: u32) -> Result<Address>
where
    D: dictionary::Language,
{
    let account = Account::new(account)?;
    let _ = bip39::mnemonic_to_entropy(dic, mnemonic)?;
    let seed = Seed::from_phrase(mnemonic, password);
    let xprv = derive_account(&seed, account)?;
    Ok(Address::from_public_key(&xprv.public()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bip::bip39::dictionary::ENGLISH;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn known_answer_account_0() {
        let keystore = KeyStore::from_mnemonic(&ENGLISH, MNEMONIC, b"", 0).unwrap();
        assert_eq!(
            keystore,
            KeyStore {
                mnemonic: MNEMONIC.to_owned(),
                entropy: "00000000000000000000000000000000".to_owned(),
                seed: "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4".to_owned(),
                private_key: "776148e6eecb116598ec89e26e28fe0e3a56742a148592b4bb8c952a9e48dd47".to_owned(),
                public_key: "0676964bd73881f251782a9c40cda2e6063381fdc06e11c083ffae0170821379".to_owned(),
                address: "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm".to_owned(),
                core_bytes: "0059b22b6dd761a0d3bca049f84c61d6b2875109".to_owned(),
            }
        );
    }

    #[test]
    fn passphrase_changes_everything_but_the_entropy() {
        let keystore = KeyStore::from_mnemonic(&ENGLISH, MNEMONIC, b"TREZOR", 0).unwrap();
        assert_eq!(keystore.entropy, "00000000000000000000000000000000");
        assert_eq!(
            keystore.seed,
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
        assert_eq!(keystore.address, "z1qqnxwxsznkjcf4pdl3faajythpxn06lnjeyd46");
    }

    #[test]
    fn account_1() {
        let keystore = KeyStore::from_mnemonic(&ENGLISH, MNEMONIC, b"", 1).unwrap();
        assert_eq!(keystore.address, "z1qpkmcwhgxda6vdlkhmzfextpxgseglna9vns02");
        assert_eq!(
            address_for_account(&ENGLISH, MNEMONIC, b"", 1).unwrap().to_string(),
            keystore.address
        );
    }

    #[test]
    fn seed_is_stretched_from_the_phrase_as_given() {
        let spaced = format!("  {}\n", MNEMONIC.replace(' ', " \t "));
        let keystore = KeyStore::from_mnemonic(&ENGLISH, &spaced, b"", 0).unwrap();
        assert_eq!(keystore.mnemonic, spaced);
        assert_eq!(keystore.entropy, "00000000000000000000000000000000");
        assert_eq!(
            keystore.seed,
            hex::encode(Seed::from_phrase(&spaced, b"").as_ref())
        );
        assert_ne!(
            keystore.seed,
            hex::encode(Seed::from_phrase(MNEMONIC, b"").as_ref())
        );
        assert_ne!(keystore.address, "z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm");
        assert_eq!(
            address_for_account(&ENGLISH, &spaced, b"", 0).unwrap().to_string(),
            keystore.address
        );
    }

    #[test]
    fn double_space_changes_the_seed() {
        let doubled = MNEMONIC.replacen(' ', "  ", 1);
        let keystore = KeyStore::from_mnemonic(&ENGLISH, &doubled, b"", 0).unwrap();
        assert_eq!(keystore.mnemonic, doubled);
        assert_eq!(
            keystore.seed,
            hex::encode(Seed::from_phrase(&doubled, b"").as_ref())
        );
        assert!(keystore.seed.starts_with("1525a8d0b3e08e7b"));
    }

    #[test]
    fn pipeline_errors() {
        let bad_checksum = MNEMONIC.replace("about", "abandon");
        assert_eq!(
            address_for_account(&ENGLISH, &bad_checksum, b"", 0),
            Err(Error::Bip39(bip39::Error::InvalidChecksum(0b0011, 0)))
        );
        assert_eq!(
            KeyStore::from_mnemonic(&ENGLISH, "abandon about", b"", 0),
            Err(Error::Bip39(bip39::Error::WrongNumberOfWords(2)))
        );
        assert_eq!(
            KeyStore::from_mnemonic(&ENGLISH, MNEMONIC, b"", 0x8000_0000),
            Err(Error::Bip44(bip44::Error::AccountOutOfBound(0x8000_0000)))
        );
    }

    #[test]
    fn generated_keystore_can_be_recovered() {
        let generated =
            KeyStore::generate(&ENGLISH, Type::Type15Words, rand::random, b"pass", 5).unwrap();
        let recovered = KeyStore::from_mnemonic(&ENGLISH, &generated.mnemonic, b"pass", 5).unwrap();
        assert_eq!(generated, recovered);
        assert_eq!(generated.entropy.len(), 40);
    }

    #[cfg(feature = "generic-serialization")]
    #[test]
    fn json_field_names() {
        let keystore = KeyStore::from_mnemonic(&ENGLISH, MNEMONIC, b"", 0).unwrap();
        let json = serde_json::to_value(&keystore).unwrap();
        let mut keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "address",
                "corebytes",
                "entropy",
                "mnemonic",
                "privatekey",
                "publickey",
                "seed"
            ]
        );
        let decoded: KeyStore = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, keystore);
    }
}
