use std::path::Path;

use keyentry_core::db::{AccountRepository, LibSqlAccountRepository};

use crate::commands::common::{
    account_to_list_item, format_account_lines, open_database, AccountListItem,
};
use crate::error::CliError;

pub async fn run_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let accounts = LibSqlAccountRepository::new(db.connection()).list().await?;

    if as_json {
        let json_items = accounts
            .iter()
            .map(account_to_list_item)
            .collect::<Vec<AccountListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if accounts.is_empty() {
        println!("No accounts saved");
    } else {
        for line in format_account_lines(&accounts) {
            println!("{line}");
        }
    }

    Ok(())
}
