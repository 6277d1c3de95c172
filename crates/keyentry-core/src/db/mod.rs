//! Database layer for keyentry

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{AccountRepository, LibSqlAccountRepository};
