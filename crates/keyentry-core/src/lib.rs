//! keyentry-core - Core library for keyentry
//!
//! This crate contains key normalization and validation, check code
//! generation, the host-agnostic key-entry screen, and the account database
//! used by keyentry front ends.

pub mod base32;
pub mod check_code;
pub mod db;
pub mod error;
pub mod models;
pub mod screen;
pub mod validator;

pub use error::{Error, Result};
pub use models::{Account, AccountType, SaveRequest};
pub use screen::{EnterKeyScreen, ScreenEvent, ScreenExit, SecretSaver, VersionLookup};
pub use validator::{
    normalize_key, KeyEntryValidator, KeyValidation, StatusMessage, StatusTone, ValidationOutcome,
    MIN_KEY_BYTES,
};
