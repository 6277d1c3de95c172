use std::path::Path;

use keyentry_core::db::{AccountRepository, LibSqlAccountRepository};

use crate::commands::common::{normalize_account_name, open_database};
use crate::error::CliError;

pub async fn run_delete(name: &str, db_path: &Path) -> Result<(), CliError> {
    let name = normalize_account_name(name)?;
    let db = open_database(db_path).await?;
    let repo = LibSqlAccountRepository::new(db.connection());

    match repo.delete(&name).await {
        Ok(()) => {
            println!("{name}");
            Ok(())
        }
        Err(keyentry_core::Error::NotFound(_)) => Err(CliError::AccountNotFound(name)),
        Err(error) => Err(error.into()),
    }
}
