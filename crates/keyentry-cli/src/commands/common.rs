use std::env;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use keyentry_core::check_code::check_code;
use keyentry_core::db::Database;
use keyentry_core::{Account, SaveRequest, SecretSaver, StatusMessage, StatusTone, VersionLookup};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct AccountListItem {
    pub name: String,
    pub account_type: String,
    pub issuer: Option<String>,
    pub check_code: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Captures the save request from the key-entry screen so it can be written
/// to the database once the screen has closed.
#[derive(Debug, Default)]
pub struct PendingSave {
    request: Option<SaveRequest>,
}

impl PendingSave {
    pub fn take(&mut self) -> Option<SaveRequest> {
        self.request.take()
    }
}

impl SecretSaver for PendingSave {
    fn save_secret(&mut self, request: &SaveRequest) -> keyentry_core::Result<()> {
        if request.account_name.trim().is_empty() {
            return Err(keyentry_core::Error::InvalidInput(
                CliError::EmptyAccountName.to_string(),
            ));
        }
        self.request = Some(request.clone());
        Ok(())
    }
}

/// Version of this binary as recorded by Cargo at build time.
pub struct PackageVersion;

impl VersionLookup for PackageVersion {
    fn version_name(&self) -> keyentry_core::Result<String> {
        option_env!("CARGO_PKG_VERSION")
            .map(str::to_string)
            .ok_or_else(|| keyentry_core::Error::NotFound("package version".to_string()))
    }
}

pub fn normalize_account_name(name: &str) -> Result<String, CliError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyAccountName);
    }
    Ok(trimmed.to_string())
}

pub fn format_status_line(status: &StatusMessage) -> String {
    if status.text.is_empty() {
        return String::new();
    }

    match status.tone {
        StatusTone::Success => format!("[ok] {}", status.text),
        StatusTone::Error => format!("[error] {}", status.text),
        StatusTone::Neutral => status.text.clone(),
    }
}

pub fn format_account_lines(accounts: &[Account]) -> Vec<String> {
    accounts
        .iter()
        .map(|account| {
            let check = check_code(&account.secret).unwrap_or_else(|_| "------".to_string());
            let added = format_date(account.created_at);
            format!(
                "{:<32}  {:<13}  check {check}  added {added}",
                account.name,
                account.account_type.label()
            )
        })
        .collect()
}

pub fn account_to_list_item(account: &Account) -> AccountListItem {
    AccountListItem {
        name: account.name.clone(),
        account_type: account.account_type.label().to_string(),
        issuer: account.issuer.clone(),
        check_code: check_code(&account.secret).ok(),
        created_at: account.created_at,
        updated_at: account.updated_at,
    }
}

pub fn format_date(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map_or_else(|| "unknown".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("KEYENTRY_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyentry")
        .join("accounts.db")
}

pub async fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Database::open(path).await?)
}
