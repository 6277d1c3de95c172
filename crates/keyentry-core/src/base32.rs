//! Lenient RFC 4648 base32 decoding for hand-typed secrets.
//!
//! Users copy keys from web pages in many shapes: lower case, grouped with
//! spaces or dashes, with or without `=` padding, sometimes with a dangling
//! final symbol. All of those decode here; only symbols outside the alphabet
//! are rejected.

use data_encoding::BASE32_NOPAD;
use thiserror::Error;

const SEPARATOR: char = '-';
const PADDING: char = '=';
/// Symbols per complete 40-bit group.
const GROUP_SYMBOLS: usize = 8;

/// Errors returned while decoding a base32 secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Illegal character: {0}")]
    IllegalCharacter(char),
}

/// Decode `encoded` into raw bytes.
///
/// Leftover bits of an incomplete trailing group are dropped, so the output
/// length is always `floor(symbols * 5 / 8)`.
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let mut symbols = canonicalize(encoded);
    if symbols.is_empty() {
        return Ok(Vec::new());
    }

    // Fill the last group with zero-valued symbols; the extra bytes they
    // produce are cut off below.
    let symbol_count = symbols.len();
    let filler = (GROUP_SYMBOLS - symbol_count % GROUP_SYMBOLS) % GROUP_SYMBOLS;
    symbols.push_str(&"A".repeat(filler));

    let mut bytes = BASE32_NOPAD
        .decode(symbols.as_bytes())
        .map_err(|error| illegal_symbol_at(&symbols, error.position))?;
    bytes.truncate(symbol_count * 5 / 8);
    Ok(bytes)
}

/// Strip whitespace, separators and padding, then upper-case.
fn canonicalize(encoded: &str) -> String {
    let compact: String = encoded
        .trim()
        .chars()
        .filter(|ch| *ch != SEPARATOR && *ch != ' ')
        .collect();

    compact.trim_end_matches(PADDING).to_ascii_uppercase()
}

/// The decoder reports the byte offset of the first rejected symbol. Every
/// non-ASCII character starts with a rejected lead byte, so the offset is
/// always a character boundary.
fn illegal_symbol_at(symbols: &str, position: usize) -> DecodeError {
    let symbol = symbols
        .get(position..)
        .and_then(|rest| rest.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    DecodeError::IllegalCharacter(symbol)
}
