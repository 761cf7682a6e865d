//! BIP39 mnemonic phrases
//!
//! The wallet secret is a random entropy of 128 to 256 bits. It is shown
//! to the user as a phrase of 12 to 24 words, each word carrying 11 bits
//! of the entropy followed by a few bits of its SHA-256 checksum. The
//! phrase, not the entropy, is then stretched with PBKDF2 into the 64
//! bytes [`Seed`](./struct.Seed.html) the master key is computed from.
//!
//! Reference: [BIP-0039](https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki)
//!
//! # Example
//!
//! A new wallet:
//!
//! ```
//! extern crate rand;
//!
//! use zenon::bip::bip39::*;
//!
//! let entropy = Entropy::generate(Type::Type24Words, rand::random);
//! let phrase = entropy.to_mnemonics().to_string(&dictionary::ENGLISH);
//!
//! // the phrase is what the user writes down, the seed is recomputed
//! // from it every time the wallet is opened.
//! let seed = Seed::from_mnemonic_string(&phrase, b"optional passphrase");
//! ```
//!
//! Opening a wallet from the phrase:
//!
//! ```
//! use zenon::bip::bip39::*;
//!
//! let phrase = "mimic left ask vacant toast follow bitter join diamond gate attend obey";
//!
//! let seed = Seed::from_mnemonic_checked(&dictionary::ENGLISH, phrase, b"optional passphrase")
//!     .expect("a valid english phrase");
//! ```
//!

use crate::util::bits::{BitReader, BitWriter};
use crate::util::{hex, securemem};
use cryptoxide::digest::Digest;
use cryptoxide::hmac::Hmac;
use cryptoxide::pbkdf2::pbkdf2;
use cryptoxide::sha2::{Sha256, Sha512};
use log::trace;
use std::{error, fmt, ops::Deref, result, str};

/// number of bits encoded by one mnemonic word
pub const BITS_PER_WORD: u32 = 11;

/// number of PBKDF2 iterations used to stretch a mnemonic into a `Seed`
pub const SEED_ITERATIONS: u32 = 2048;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// the phrase does not have 12, 15, 18, 21 or 24 words. Contains the
    /// number of words found.
    WrongNumberOfWords(usize),

    /// the entropy is not 128, 160, 192, 224 or 256 bits long. Contains
    /// the size found, in bits.
    WrongKeySize(usize),

    /// a word index does not fit in 11 bits
    MnemonicOutOfBound(u16),

    LanguageError(dictionary::Error),

    /// the seed is not `SEED_SIZE` bytes long
    InvalidSeedSize(usize),

    /// the checksum carried by the last word does not match the entropy:
    /// `(expected, found)`, both right aligned.
    InvalidChecksum(u8, u8),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidSeedSize(sz) => write!(
                f,
                "invalid seed size, expected {} bytes but received {} bytes",
                SEED_SIZE, sz
            ),
            Error::WrongNumberOfWords(sz) => {
                write!(f, "unsupported number of mnemonic words: {}", sz)
            }
            Error::WrongKeySize(sz) => write!(
                f,
                "unsupported entropy size: {} bits (expected 128, 160, 192, 224 or 256)",
                sz
            ),
            Error::MnemonicOutOfBound(val) => {
                write!(f, "mnemonic index {} out of bound", val)
            }
            Error::LanguageError(err) => write!(f, "{}", err),
            Error::InvalidChecksum(expected, found) => write!(
                f,
                "invalid mnemonic checksum, expected {:08b} but found {:08b}",
                expected, found
            ),
        }
    }
}
impl From<dictionary::Error> for Error {
    fn from(e: dictionary::Error) -> Self {
        Error::LanguageError(e)
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::LanguageError(ref error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The wallet secret, one variant per supported phrase length.
///
/// The bytes are wiped when the value is dropped.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone)]
pub enum Entropy {
    Entropy12([u8; 16]),
    Entropy15([u8; 20]),
    Entropy18([u8; 24]),
    Entropy21([u8; 28]),
    Entropy24([u8; 32]),
}
impl Entropy {
    /// # Error
    ///
    /// [`WrongKeySize`](enum.Error.html#variant.WrongKeySize) if the slice
    /// is not 16, 20, 24, 28 or 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let t = Type::from_entropy_size(bytes.len() * 8)?;
        Ok(Self::new(t, bytes))
    }

    /// fill a new entropy with the bytes returned by `gen`.
    ///
    /// ```
    /// extern crate rand;
    /// # use zenon::bip::bip39::*;
    ///
    /// let entropy = Entropy::generate(Type::Type15Words, rand::random);
    /// assert_eq!(entropy.len(), 20);
    /// ```
    pub fn generate<G>(t: Type, gen: G) -> Self
    where
        G: Fn() -> u8,
    {
        let bytes = [0u8; 32];
        let mut entropy = Self::new(t, &bytes[..]);
        for e in entropy.as_mut().iter_mut() {
            *e = gen();
        }
        entropy
    }

    fn new(t: Type, bytes: &[u8]) -> Self {
        let mut e = match t {
            Type::Type12Words => Entropy::Entropy12([0u8; 16]),
            Type::Type15Words => Entropy::Entropy15([0u8; 20]),
            Type::Type18Words => Entropy::Entropy18([0u8; 24]),
            Type::Type21Words => Entropy::Entropy21([0u8; 28]),
            Type::Type24Words => Entropy::Entropy24([0u8; 32]),
        };
        let len = e.as_ref().len();
        e.as_mut().copy_from_slice(&bytes[..len]);
        e
    }

    #[inline]
    pub fn get_type(&self) -> Type {
        match self {
            Entropy::Entropy12(_) => Type::Type12Words,
            Entropy::Entropy15(_) => Type::Type15Words,
            Entropy::Entropy18(_) => Type::Type18Words,
            Entropy::Entropy21(_) => Type::Type21Words,
            Entropy::Entropy24(_) => Type::Type24Words,
        }
    }

    fn as_mut(&mut self) -> &mut [u8] {
        match self {
            Entropy::Entropy12(ref mut b) => b.as_mut(),
            Entropy::Entropy15(ref mut b) => b.as_mut(),
            Entropy::Entropy18(ref mut b) => b.as_mut(),
            Entropy::Entropy21(ref mut b) => b.as_mut(),
            Entropy::Entropy24(ref mut b) => b.as_mut(),
        }
    }

    fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        let mut res = [0u8; 32];
        hasher.input(self.as_ref());
        hasher.result(&mut res);
        res
    }

    /// the first `entropy bits / 32` bits of the SHA-256 of the entropy,
    /// right aligned in the returned byte (4 bits for 12 words, up to 8
    /// bits for 24 words).
    ///
    /// ```
    /// # use zenon::bip::bip39::*;
    ///
    /// let entropy = Entropy::Entropy12([0; 16]);
    ///
    /// assert_eq!(entropy.checksum(), 0b0011);
    /// ```
    pub fn checksum(&self) -> u8 {
        let hash = self.hash()[0];
        hash >> (8 - self.get_type().checksum_size_bits())
    }

    /// recover the entropy packed in the word indices and verify the
    /// checksum carried by the trailing bits.
    ///
    /// ```
    /// # use zenon::bip::bip39::*;
    ///
    /// let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    /// let mnemonics = Mnemonics::from_string(&dictionary::ENGLISH, phrase).unwrap();
    ///
    /// assert_eq!(Entropy::from_mnemonics(&mnemonics).unwrap(), Entropy::Entropy12([0; 16]));
    /// ```
    pub fn from_mnemonics(mnemonics: &Mnemonics) -> Result<Self> {
        let t = mnemonics.get_type();

        let mut to_validate = BitWriter::new();
        for mnemonic in mnemonics.0.iter() {
            to_validate.write(mnemonic.0, BITS_PER_WORD);
        }

        let mut bytes = to_validate.into_bytes();
        let entropy_size = t.to_key_size() / 8;

        let entropy = Self::new(t, &bytes[..entropy_size]);
        // the checksum bits directly follow the entropy bits, they are the
        // most significant bits of the byte following the entropy.
        let found = bytes[entropy_size] >> (8 - t.checksum_size_bits());
        securemem::zero(&mut bytes);

        let expected = entropy.checksum();
        if expected != found {
            return Err(Error::InvalidChecksum(expected, found));
        }

        Ok(entropy)
    }

    /// split the entropy, followed by its checksum, in 11 bits word
    /// indices.
    pub fn to_mnemonics(&self) -> Mnemonics {
        let t = self.get_type();
        let mut combined = Vec::from(self.as_ref());
        combined.extend(&self.hash()[..]);

        let mut words = Vec::with_capacity(t.mnemonic_count());
        {
            let mut reader = BitReader::new(&combined);
            for _ in 0..t.mnemonic_count() {
                // the entropy is followed by the 256 bits of its hash, there
                // are always enough bits to read every word. 11 bits values
                // are valid mnemonic indices.
                match reader.read(BITS_PER_WORD) {
                    Some(n) => words.push(MnemonicIndex(n)),
                    None => unreachable!("entropy and its hash hold enough bits"),
                }
            }
        }
        securemem::zero(&mut combined);

        Mnemonics(words)
    }
}
impl fmt::Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        match self {
            Entropy::Entropy12(ref b) => b.as_ref(),
            Entropy::Entropy15(ref b) => b.as_ref(),
            Entropy::Entropy18(ref b) => b.as_ref(),
            Entropy::Entropy21(ref b) => b.as_ref(),
            Entropy::Entropy24(ref b) => b.as_ref(),
        }
    }
}
impl Deref for Entropy {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}
impl Drop for Entropy {
    fn drop(&mut self) {
        securemem::zero(self.as_mut())
    }
}

/// write the raw entropy as a phrase of the given dictionary.
///
/// ```
/// # use zenon::bip::bip39::*;
///
/// let mnemonics = entropy_to_mnemonic(&dictionary::ENGLISH, &[0u8; 16]).unwrap();
/// assert_eq!(
///     &*mnemonics,
///     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
/// );
/// ```
pub fn entropy_to_mnemonic<D>(dic: &D, entropy: &[u8]) -> Result<MnemonicString>
where
    D: dictionary::Language,
{
    let entropy = Entropy::from_slice(entropy)?;
    Ok(entropy.to_mnemonics().to_string(dic))
}

/// parse the phrase (words separated by any white spaces) and recover
/// its entropy.
///
/// # Error
///
/// The checks are done in this order:
///
/// 1. [`WrongNumberOfWords`](enum.Error.html#variant.WrongNumberOfWords);
/// 2. [`LanguageError`](enum.Error.html#variant.LanguageError) for the
///    first word missing from the dictionary;
/// 3. [`InvalidChecksum`](enum.Error.html#variant.InvalidChecksum).
pub fn mnemonic_to_entropy<D>(dic: &D, mnemonics: &str) -> Result<Entropy>
where
    D: dictionary::Language,
{
    let mnemonics = Mnemonics::from_string(dic, mnemonics)?;
    Entropy::from_mnemonics(&mnemonics)
}

/// ```
/// # use zenon::bip::bip39::*;
///
/// assert!(is_valid(&dictionary::ENGLISH, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"));
/// assert!(!is_valid(&dictionary::ENGLISH, "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo"));
/// ```
pub fn is_valid<D>(dic: &D, mnemonics: &str) -> bool
where
    D: dictionary::Language,
{
    match mnemonic_to_entropy(dic, mnemonics) {
        Ok(_) => true,
        Err(err) => {
            trace!("invalid mnemonic phrase: {}", err);
            false
        }
    }
}

pub const SEED_SIZE: usize = 64;

/// The 64 bytes stretched out of a phrase and a passphrase, input of the
/// master key computation (see [`hdwallet`](../../hdwallet/index.html)).
///
/// The bytes are wiped when the value is dropped.
pub struct Seed([u8; SEED_SIZE]);
impl Seed {
    /// ```
    /// use zenon::bip::bip39::{Seed, SEED_SIZE};
    ///
    /// let seed = Seed::from_bytes([0u8; SEED_SIZE]);
    /// assert_eq!(seed.len(), SEED_SIZE);
    /// ```
    pub fn from_bytes(buf: [u8; SEED_SIZE]) -> Self {
        Seed(buf)
    }

    /// # Error
    ///
    /// [`InvalidSeedSize`](enum.Error.html#variant.InvalidSeedSize) if the
    /// slice is not `SEED_SIZE` bytes long.
    pub fn from_slice(buf: &[u8]) -> Result<Self> {
        if buf.len() != SEED_SIZE {
            return Err(Error::InvalidSeedSize(buf.len()));
        }
        let mut v = [0u8; SEED_SIZE];
        v[..].clone_from_slice(buf);
        Ok(Seed::from_bytes(v))
    }

    /// stretch a phrase already validated by
    /// [`MnemonicString::new`](./struct.MnemonicString.html#method.new).
    ///
    /// The passphrase is an additional secret: the same phrase with
    /// another passphrase opens another, equally valid, wallet.
    pub fn from_mnemonic_string(mnemonics: &MnemonicString, password: &[u8]) -> Self {
        Self::from_phrase(&mnemonics.0, password)
    }

    /// PBKDF2-HMAC-SHA512 of the phrase, salted with `"mnemonic"`
    /// followed by the passphrase, `SEED_ITERATIONS` rounds.
    ///
    /// The phrase is used as is: neither the words nor the checksum are
    /// verified, see [`from_mnemonic_checked`](#method.from_mnemonic_checked).
    pub fn from_phrase(phrase: &str, password: &[u8]) -> Self {
        let mut salt = Vec::from("mnemonic".as_bytes());
        salt.extend_from_slice(password);
        let mut mac = Hmac::new(Sha512::new(), phrase.as_bytes());
        let mut result = [0; SEED_SIZE];
        pbkdf2(&mut mac, &salt, SEED_ITERATIONS, &mut result);
        securemem::zero(&mut salt);
        Self::from_bytes(result)
    }

    /// verify the phrase (words and checksum) before stretching it.
    ///
    /// ```
    /// # use zenon::bip::bip39::*;
    ///
    /// let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
    /// assert!(Seed::from_mnemonic_checked(&dictionary::ENGLISH, bad, b"").is_err());
    /// ```
    pub fn from_mnemonic_checked<D>(dic: &D, phrase: &str, password: &[u8]) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let _ = mnemonic_to_entropy(dic, phrase)?;
        Ok(Self::from_phrase(phrase, password))
    }
}
impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}
impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.as_ref()))
    }
}
impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
impl Deref for Seed {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}
impl Drop for Seed {
    fn drop(&mut self) {
        securemem::zero(&mut self.0);
    }
}

/// A phrase whose words have been found in a dictionary, in the right
/// number. The checksum is not verified, use
/// [`is_valid`](./fn.is_valid.html) for that.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub struct MnemonicString(String);
impl MnemonicString {
    /// ```
    /// # use zenon::bip::bip39::*;
    ///
    /// let phrase = "legal winner thank year wave sausage worth useful legal winner thank yellow";
    /// assert!(MnemonicString::new(&dictionary::ENGLISH, phrase.to_owned()).is_ok());
    /// assert!(MnemonicString::new(&dictionary::ENGLISH, "legal winner".to_owned()).is_err());
    /// ```
    pub fn new<D>(dic: &D, s: String) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let _ = Mnemonics::from_string(dic, &s)?;

        Ok(MnemonicString(s))
    }
}
impl Deref for MnemonicString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}
impl fmt::Display for MnemonicString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported phrase lengths.
///
/// | words | entropy (bits) | checksum (bits) |
/// | ----- | -------------- | --------------- |
/// | 12    | 128            | 4               |
/// | 15    | 160            | 5               |
/// | 18    | 192            | 6               |
/// | 21    | 224            | 7               |
/// | 24    | 256            | 8               |
///
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
pub enum Type {
    Type12Words,
    Type15Words,
    Type18Words,
    Type21Words,
    Type24Words,
}
impl Type {
    pub fn from_word_count(len: usize) -> Result<Self> {
        match len {
            12 => Ok(Type::Type12Words),
            15 => Ok(Type::Type15Words),
            18 => Ok(Type::Type18Words),
            21 => Ok(Type::Type21Words),
            24 => Ok(Type::Type24Words),
            _ => Err(Error::WrongNumberOfWords(len)),
        }
    }

    pub fn from_entropy_size(len: usize) -> Result<Self> {
        match len {
            128 => Ok(Type::Type12Words),
            160 => Ok(Type::Type15Words),
            192 => Ok(Type::Type18Words),
            224 => Ok(Type::Type21Words),
            256 => Ok(Type::Type24Words),
            _ => Err(Error::WrongKeySize(len)),
        }
    }

    /// entropy size, in bits
    pub fn to_key_size(self) -> usize {
        self.mnemonic_count() / 3 * 32
    }

    pub fn checksum_size_bits(self) -> u32 {
        (self.to_key_size() / 32) as u32
    }

    pub fn mnemonic_count(self) -> usize {
        match self {
            Type::Type12Words => 12,
            Type::Type15Words => 15,
            Type::Type18Words => 18,
            Type::Type21Words => 21,
            Type::Type24Words => 24,
        }
    }
}
impl Default for Type {
    fn default() -> Type {
        Type::Type24Words
    }
}
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic_count())
    }
}
impl str::FromStr for Type {
    type Err = &'static str;
    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let count = s.parse::<usize>().map_err(|_| "not a number of words")?;
        Type::from_word_count(count).map_err(|_| "unsupported number of words")
    }
}

pub const MAX_MNEMONIC_VALUE: u16 = 2047;

/// Position of a word in a dictionary, always below 2048.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct MnemonicIndex(pub u16);

impl MnemonicIndex {
    /// ```
    /// # use zenon::bip::bip39::*;
    /// #
    /// assert!(MnemonicIndex::new(2047).is_ok());
    /// assert_eq!(MnemonicIndex::new(2048), Err(Error::MnemonicOutOfBound(2048)));
    /// ```
    pub fn new(m: u16) -> Result<Self> {
        if m <= MAX_MNEMONIC_VALUE {
            Ok(MnemonicIndex(m))
        } else {
            Err(Error::MnemonicOutOfBound(m))
        }
    }

    /// # panic
    ///
    /// if the dictionary has less than 2048 words, which the constructors
    /// of this module do not allow.
    pub fn to_word<D>(self, dic: &D) -> String
    where
        D: dictionary::Language,
    {
        match dic.lookup_word(self) {
            Ok(word) => word,
            Err(err) => panic!("dictionary {} is incomplete: {}", dic.name(), err),
        }
    }

    pub fn from_word<D>(dic: &D, word: &str) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let v = dic.lookup_mnemonic(word)?;
        Ok(v)
    }
}

/// The word indices of a phrase, independent of any dictionary.
///
/// The same indices written with two dictionaries give the same entropy
/// but two different seeds: the seed is computed from the words.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Mnemonics(Vec<MnemonicIndex>);

impl AsRef<[MnemonicIndex]> for Mnemonics {
    fn as_ref(&self) -> &[MnemonicIndex] {
        &self.0[..]
    }
}

impl Mnemonics {
    /// # panic
    ///
    /// never for values built with `from_string` or `from_mnemonics`, which
    /// check the number of words.
    pub fn get_type(&self) -> Type {
        match Type::from_word_count(self.0.len()) {
            Ok(t) => t,
            Err(err) => panic!("mnemonics built without validation: {}", err),
        }
    }

    pub fn to_string<D>(&self, dic: &D) -> MnemonicString
    where
        D: dictionary::Language,
    {
        let words: Vec<String> = self.0.iter().map(|m| m.to_word(dic)).collect();
        MnemonicString(words.join(dic.separator()))
    }

    /// look every word of the phrase up in the dictionary. The number of
    /// words is checked first.
    pub fn from_string<D>(dic: &D, mnemonics: &str) -> Result<Self>
    where
        D: dictionary::Language,
    {
        let words: Vec<&str> = mnemonics.split_whitespace().collect();
        let _ = Type::from_word_count(words.len())?;

        let mut vec = Vec::with_capacity(words.len());
        for word in words {
            vec.push(MnemonicIndex::from_word(dic, word)?);
        }
        Mnemonics::from_mnemonics(vec)
    }

    pub fn from_mnemonics(mnemonics: Vec<MnemonicIndex>) -> Result<Self> {
        let _ = Type::from_word_count(mnemonics.len())?;
        Ok(Mnemonics(mnemonics))
    }
}

pub mod dictionary {
    //! Word lists
    //!
    //! A dictionary maps the 2048 word indices to words and back. The
    //! English list of BIP39 is built in ([`ENGLISH`](./constant.ENGLISH.html)),
    //! any other list of 2048 distinct words can be loaded with
    //! [`Dictionary::from_words`](./struct.Dictionary.html#method.from_words).
    //!
    //! Dictionaries are values handed to the functions needing one: using
    //! another list means building another dictionary, nothing global is
    //! modified.
    //!
    //! Words are compared byte for byte, no unicode normalisation is done.
    //!

    use std::collections::HashMap;
    use std::{error, fmt, result};

    use super::MnemonicIndex;

    pub const DICTIONARY_SIZE: usize = 2048;

    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
    #[cfg_attr(feature = "generic-serialization", derive(Serialize, Deserialize))]
    pub enum Error {
        MnemonicWordNotFoundInDictionary(String),

        /// the list given to build a dictionary does not have 2048 words
        InvalidDictionarySize(usize),

        DuplicateWord(String),

        /// empty word, or word containing white spaces
        InvalidWord(String),
    }
    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Error::MnemonicWordNotFoundInDictionary(s) => {
                    write!(f, "mnemonic word not found in dictionary \"{}\"", s)
                }
                Error::InvalidDictionarySize(sz) => write!(
                    f,
                    "invalid dictionary, expected {} words but received {}",
                    DICTIONARY_SIZE, sz
                ),
                Error::DuplicateWord(s) => write!(f, "duplicate word in dictionary \"{}\"", s),
                Error::InvalidWord(s) => write!(f, "invalid word in dictionary \"{}\"", s),
            }
        }
    }
    impl error::Error for Error {}

    pub type Result<T> = result::Result<T, Error>;

    pub trait Language {
        fn name(&self) -> &str;
        fn separator(&self) -> &'static str;
        fn lookup_mnemonic(&self, word: &str) -> Result<MnemonicIndex>;
        fn lookup_word(&self, mnemonic: MnemonicIndex) -> Result<String>;
    }

    /// A word list known at compile time. The words must be sorted, the
    /// reverse lookup is a binary search.
    pub struct DefaultDictionary {
        pub words: [&'static str; DICTIONARY_SIZE],
        pub name: &'static str,
    }
    impl Language for DefaultDictionary {
        fn name(&self) -> &str {
            self.name
        }
        fn separator(&self) -> &'static str {
            " "
        }
        fn lookup_mnemonic(&self, word: &str) -> Result<MnemonicIndex> {
            match self.words.binary_search_by(|probe| (*probe).cmp(word)) {
                Err(_) => Err(Error::MnemonicWordNotFoundInDictionary(word.to_string())),
                Ok(v) => Ok(MnemonicIndex(v as u16)),
            }
        }
        fn lookup_word(&self, mnemonic: MnemonicIndex) -> Result<String> {
            self.words
                .get(mnemonic.0 as usize)
                .map(|s| String::from(*s))
                .ok_or_else(|| Error::MnemonicWordNotFoundInDictionary(mnemonic.0.to_string()))
        }
    }

    /// the English word list of BIP39
    pub const ENGLISH: DefaultDictionary = DefaultDictionary {
        words: include!("bip39_english.txt"),
        name: "english",
    };

    /// A word list loaded at runtime, in any order.
    ///
    /// ```
    /// use zenon::bip::bip39::dictionary::{self, Dictionary, Language};
    ///
    /// let words = dictionary::ENGLISH.words.iter().map(|w| w.to_uppercase()).collect();
    /// let upper = Dictionary::from_words("english-upper", words).unwrap();
    ///
    /// assert_eq!(upper.lookup_mnemonic("ZOO").unwrap().0, 2047);
    /// ```
    #[derive(Debug, Clone)]
    pub struct Dictionary {
        name: String,
        words: Vec<String>,
        indices: HashMap<String, MnemonicIndex>,
    }
    impl Dictionary {
        /// build the dictionary and its reverse lookup table together.
        ///
        /// # Error
        ///
        /// the list must hold exactly 2048 distinct, non empty words
        /// without white spaces.
        pub fn from_words<S: Into<String>>(name: S, words: Vec<String>) -> Result<Self> {
            if words.len() != DICTIONARY_SIZE {
                return Err(Error::InvalidDictionarySize(words.len()));
            }
            let mut indices = HashMap::with_capacity(DICTIONARY_SIZE);
            for (i, word) in words.iter().enumerate() {
                if word.is_empty() || word.chars().any(char::is_whitespace) {
                    return Err(Error::InvalidWord(word.clone()));
                }
                if indices.insert(word.clone(), MnemonicIndex(i as u16)).is_some() {
                    return Err(Error::DuplicateWord(word.clone()));
                }
            }
            Ok(Dictionary {
                name: name.into(),
                words,
                indices,
            })
        }

        pub fn words(&self) -> &[String] {
            &self.words
        }
    }
    impl Language for Dictionary {
        fn name(&self) -> &str {
            &self.name
        }
        fn separator(&self) -> &'static str {
            " "
        }
        fn lookup_mnemonic(&self, word: &str) -> Result<MnemonicIndex> {
            self.indices
                .get(word)
                .cloned()
                .ok_or_else(|| Error::MnemonicWordNotFoundInDictionary(word.to_string()))
        }
        fn lookup_word(&self, mnemonic: MnemonicIndex) -> Result<String> {
            self.words
                .get(mnemonic.0 as usize)
                .cloned()
                .ok_or_else(|| Error::MnemonicWordNotFoundInDictionary(mnemonic.0.to_string()))
        }
    }
}
