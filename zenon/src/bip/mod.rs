pub mod bip39;
pub mod bip44;
