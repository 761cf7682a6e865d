#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches, SubCommand};
use std::{env, fmt, process};

use zenon::address::{self, Address};
use zenon::bip::bip39::{self, dictionary, Type};
use zenon::keystore::KeyStore;
use zenon::util::hex;

const ENVIRONMENT_PASSPHRASE: &str = "ZENON_PASSPHRASE";
const ENVIRONMENT_ACCOUNT: &str = "ZENON_ACCOUNT";

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(global_verbose_definition())
        .arg(global_quiet_definition())
        .subcommand(
            SubCommand::with_name("generate")
                .about("generate a new random mnemonic and print its key store")
                .arg(words_definition())
                .arg(account_definition())
                .arg(passphrase_definition()),
        )
        .subcommand(
            SubCommand::with_name("recover")
                .about("print the key store of the given mnemonic phrase")
                .arg(mnemonic_definition())
                .arg(account_definition())
                .arg(passphrase_definition()),
        )
        .subcommand(
            SubCommand::with_name("validate")
                .about("check the given mnemonic phrase (words and checksum)")
                .arg(mnemonic_definition()),
        )
        .subcommand(
            SubCommand::with_name("address")
                .about("decode a bech32 address and print its core bytes")
                .arg(address_definition()),
        )
        .get_matches();

    configure_logger(&matches);

    match matches.subcommand() {
        ("generate", Some(matches)) => subcommand_generate(matches),
        ("recover", Some(matches)) => subcommand_recover(matches),
        ("validate", Some(matches)) => subcommand_validate(matches),
        ("address", Some(matches)) => subcommand_address(matches),
        _ => {
            println!("{}", matches.usage());
            process::exit(1)
        }
    }
}

fn global_verbose_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("VERBOSE")
        .long("verbose")
        .short("v")
        .multiple(true)
        .global(true)
        .help("increase the log level, repeat for more details")
}
fn global_quiet_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("QUIET")
        .long("quiet")
        .short("q")
        .global(true)
        .conflicts_with("VERBOSE")
        .help("only log errors")
}

fn configure_logger<'a>(matches: &ArgMatches<'a>) {
    let level = if matches.is_present("QUIET") {
        log::LevelFilter::Error
    } else {
        match matches.occurrences_of("VERBOSE") {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    builder.init();
}

fn mnemonic_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("MNEMONIC")
        .required(true)
        .multiple(true)
        .help("the mnemonic words, separated by spaces")
}
fn mnemonic_match<'a>(matches: &ArgMatches<'a>) -> String {
    match matches.values_of("MNEMONIC") {
        Some(words) => words.collect::<Vec<_>>().join(" "),
        // the argument is required, clap already rejected the command line
        None => unreachable!(),
    }
}

fn words_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("WORDS")
        .long("words")
        .takes_value(true)
        .value_name("COUNT")
        .possible_values(&["12", "15", "18", "21", "24"])
        .default_value("24")
        .help("the number of words of the mnemonic phrase")
}
fn words_match<'a>(matches: &ArgMatches<'a>) -> clap::Result<Type> {
    value_t!(matches, "WORDS", Type)
}

fn address_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("ADDRESS")
        .required(true)
        .help("the bech32 address (z1...)")
}

fn account_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("ACCOUNT")
        .long("account")
        .takes_value(true)
        .value_name("INDEX")
        .default_value("0")
        .env(ENVIRONMENT_ACCOUNT)
        .help("the account index, derived at m/44'/73404'/<INDEX>'")
}
fn account_match<'a>(matches: &ArgMatches<'a>) -> u32 {
    value_t!(matches, "ACCOUNT", u32).unwrap_or_else(|e| e.exit())
}

fn passphrase_definition<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("PASSPHRASE")
        .long("passphrase")
        .takes_value(true)
        .empty_values(true)
        .hide_env_values(true)
        .env(ENVIRONMENT_PASSPHRASE)
        .help("the BIP39 passphrase protecting the seed, empty by default")
}
fn passphrase_match<'a>(matches: &'a ArgMatches<'a>) -> &'a str {
    matches.value_of("PASSPHRASE").unwrap_or("")
}

fn fail<E: fmt::Display>(context: &str, err: E) -> ! {
    error!("{}: {}", context, err);
    process::exit(1)
}

fn print_keystore(keystore: &KeyStore) {
    match serde_json::to_string_pretty(keystore) {
        Ok(json) => println!("{}", json),
        Err(err) => fail("cannot serialize the key store", err),
    }
}

fn subcommand_generate<'a>(matches: &ArgMatches<'a>) {
    let t = words_match(matches).unwrap_or_else(|e| e.exit());
    let account = account_match(matches);
    let passphrase = passphrase_match(matches);

    info!("generating a {} words mnemonic", t);
    match KeyStore::generate(
        &dictionary::ENGLISH,
        t,
        rand::random,
        passphrase.as_bytes(),
        account,
    ) {
        Ok(keystore) => print_keystore(&keystore),
        Err(err) => fail("cannot generate the key store", err),
    }
}

fn subcommand_recover<'a>(matches: &ArgMatches<'a>) {
    let mnemonic = mnemonic_match(matches);
    let account = account_match(matches);
    let passphrase = passphrase_match(matches);

    match KeyStore::from_mnemonic(
        &dictionary::ENGLISH,
        &mnemonic,
        passphrase.as_bytes(),
        account,
    ) {
        Ok(keystore) => print_keystore(&keystore),
        Err(err) => fail("cannot recover the key store", err),
    }
}

/// the line printed by `validate` for a valid phrase
fn validate(mnemonic: &str) -> Result<&'static str, bip39::Error> {
    let entropy = bip39::mnemonic_to_entropy(&dictionary::ENGLISH, mnemonic)?;
    debug!("valid {} words mnemonic", entropy.get_type());
    Ok("valid")
}

fn subcommand_validate<'a>(matches: &ArgMatches<'a>) {
    let mnemonic = mnemonic_match(matches);
    match validate(&mnemonic) {
        Ok(line) => println!("{}", line),
        Err(err) => fail("invalid mnemonic", err),
    }
}

/// the hex core bytes printed by `address`
fn core_bytes(address: &str) -> Result<String, address::Error> {
    let address = address.parse::<Address>()?;
    Ok(hex::encode(address.as_core_bytes()))
}

fn subcommand_address<'a>(matches: &ArgMatches<'a>) {
    let address = match matches.value_of("ADDRESS") {
        Some(address) => address,
        None => unreachable!(),
    };
    match core_bytes(address) {
        Ok(line) => println!("{}", line),
        Err(err) => fail("invalid address", err),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn words(args: &[&str]) -> clap::Result<Type> {
        let matches = App::new("test")
            .arg(words_definition())
            .get_matches_from_safe(args.iter().cloned())?;
        words_match(&matches)
    }

    #[test]
    fn words_parsing() {
        assert_eq!(words(&["test"]).unwrap(), Type::Type24Words);
        assert_eq!(words(&["test", "--words", "12"]).unwrap(), Type::Type12Words);
        assert_eq!(words(&["test", "--words", "21"]).unwrap(), Type::Type21Words);
        assert!(words(&["test", "--words", "13"]).is_err());
        assert!(words(&["test", "--words", "twelve"]).is_err());
    }

    #[test]
    fn mnemonic_words_are_joined() {
        let mut args = vec!["test"];
        args.extend(MNEMONIC.split(' '));
        let matches = App::new("test")
            .arg(mnemonic_definition())
            .get_matches_from_safe(args)
            .unwrap();
        assert_eq!(mnemonic_match(&matches), MNEMONIC);
    }

    #[test]
    fn validate_output() {
        assert_eq!(validate(MNEMONIC), Ok("valid"));
        assert_eq!(
            validate(&MNEMONIC.replace("about", "abandon")),
            Err(bip39::Error::InvalidChecksum(0b0011, 0))
        );
        assert_eq!(
            validate("abandon about"),
            Err(bip39::Error::WrongNumberOfWords(2))
        );
    }

    #[test]
    fn address_output() {
        assert_eq!(
            core_bytes("z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllm").unwrap(),
            "0059b22b6dd761a0d3bca049f84c61d6b2875109"
        );
        assert_eq!(
            core_bytes("z1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq95cq0t"),
            Err(address::Error::InvalidVariant(zenon::bech32::Variant::Bech32m))
        );
        match core_bytes("z1qpvmy2md6as6p5au5pylsnrp66egw5gfx6dllq") {
            Err(address::Error::Bech32(_)) => {}
            r => panic!("expected a bech32 error, got {:?}", r),
        }
    }
}
