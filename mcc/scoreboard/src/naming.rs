//! Objective names are limited in length, so longer aliases are replaced by a hash.

use std::hash::Hasher;

use mcc_common::SmolStr;
use rustc_hash::FxHasher;

/// The longest objective name the target accepts
pub const MAX_NAME_LENGTH: usize = 16;

/// The length of a hashed name, two symbols per hash byte
pub const HASHED_NAME_LENGTH: usize = 8;

/// Appended to the main objective of a decimal to get its fraction objective
pub const FRACTION_SUFFIX: &str = ".d";

/// Hashed names only use alphanumerics, so they never contain the fraction suffix
const HASH_ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Creates the short identifier for an alias that is too long
pub fn hash_alias(alias: &str) -> SmolStr {
    let mut hasher = FxHasher::default();
    hasher.write(alias.as_bytes());
    #[allow(clippy::cast_possible_truncation)]
    let hash = hasher.finish() as u32;

    let mut name = String::with_capacity(HASHED_NAME_LENGTH);
    let symbol = |index: u8| char::from(HASH_ALPHABET[usize::from(index) % HASH_ALPHABET.len()]);
    for byte in hash.to_le_bytes() {
        name.push(symbol(byte & 63));
        name.push(symbol(byte >> 2));
    }
    SmolStr::from(name)
}

/// The objective name for `alias`, which is the alias itself if it is short enough
pub fn objective_name(alias: &str, max_length: usize) -> SmolStr {
    if alias.chars().count() > max_length {
        hash_alias(alias)
    } else {
        SmolStr::from(alias)
    }
}
