//! Integrity check codes for entered keys.
//!
//! The check code is the RFC 4226 HOTP value of the secret at counter zero.
//! Authenticator apps and issuers that show a check code derive it the same
//! way, so users can compare without revealing the secret.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

use crate::base32::{self, DecodeError};

type HmacSha1 = Hmac<Sha1>;

/// Number of digits in a displayed check code.
pub const CHECK_CODE_DIGITS: u32 = 6;

/// Errors returned while computing a one-time password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckCodeError {
    #[error(transparent)]
    Decoding(#[from] DecodeError),
    #[error("secret cannot be used as an HMAC key")]
    InvalidKey,
    #[error("digits must be between 1 and 9, got {0}")]
    UnsupportedDigits(u32),
}

/// Compute the check code for a base32 secret.
pub fn check_code(secret: &str) -> Result<String, CheckCodeError> {
    let key = base32::decode(secret)?;
    hotp(&key, 0, CHECK_CODE_DIGITS)
}

/// Generate an RFC 4226 HOTP value, zero-padded to `digits`.
pub fn hotp(key: &[u8], counter: u64, digits: u32) -> Result<String, CheckCodeError> {
    if digits == 0 {
        return Err(CheckCodeError::UnsupportedDigits(digits));
    }
    let modulus = 10u32
        .checked_pow(digits)
        .ok_or(CheckCodeError::UnsupportedDigits(digits))?;

    let mut mac =
        <HmacSha1 as Mac>::new_from_slice(key).map_err(|_| CheckCodeError::InvalidKey)?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    let truncated = ((u32::from(digest[offset]) & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);

    Ok(format!(
        "{:0width$}",
        truncated % modulus,
        width = digits as usize
    ))
}
