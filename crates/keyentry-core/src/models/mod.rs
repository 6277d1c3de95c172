//! Data models for keyentry

mod account;

pub use account::{Account, AccountType, SaveRequest};
