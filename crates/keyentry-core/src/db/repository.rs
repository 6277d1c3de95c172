//! Account repository implementation

use chrono::Utc;
use libsql::{params, Connection, Row};

use crate::error::{Error, Result};
use crate::models::{Account, AccountType, SaveRequest};

const ACCOUNT_COLUMNS: &str = "id, name, secret, issuer, account_type, created_at, updated_at";

/// Trait for account storage operations (async)
#[allow(async_fn_in_trait)]
pub trait AccountRepository {
    /// Insert an account, replacing any existing account with the same name
    async fn save(&self, request: &SaveRequest) -> Result<Account>;

    /// Get an account by name
    async fn get_by_name(&self, name: &str) -> Result<Option<Account>>;

    /// List all accounts ordered by name
    async fn list(&self) -> Result<Vec<Account>>;

    /// Delete an account by name
    async fn delete(&self, name: &str) -> Result<()>;
}

/// libSQL implementation of `AccountRepository`
pub struct LibSqlAccountRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlAccountRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_account(row: &Row) -> Result<Account> {
        let type_index: i64 = row.get(4)?;
        let account_type = usize::try_from(type_index)
            .ok()
            .and_then(AccountType::from_index)
            .ok_or_else(|| Error::Database(format!("Unknown account type index {type_index}")))?;

        Ok(Account {
            id: row.get(0)?,
            name: row.get(1)?,
            secret: row.get(2)?,
            issuer: row.get::<Option<String>>(3)?,
            account_type,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl AccountRepository for LibSqlAccountRepository<'_> {
    async fn save(&self, request: &SaveRequest) -> Result<Account> {
        let now = Utc::now().timestamp_millis();
        let type_index = i64::try_from(request.type_index()).map_err(|_| {
            Error::Database(format!(
                "Account type index {} does not fit a column",
                request.type_index()
            ))
        })?;

        self.conn
            .execute(
                "INSERT INTO accounts (name, secret, issuer, account_type, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT(name) DO UPDATE SET
                     secret = excluded.secret,
                     issuer = excluded.issuer,
                     account_type = excluded.account_type,
                     updated_at = excluded.updated_at",
                params![
                    request.account_name.as_str(),
                    request.secret.as_str(),
                    request.issuer.clone(),
                    type_index,
                    now
                ],
            )
            .await?;

        self.get_by_name(&request.account_name)
            .await?
            .ok_or_else(|| Error::Database("Saved account could not be read back".into()))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Account>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE name = ?"),
                [name],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Account>> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY name COLLATE NOCASE"),
                (),
            )
            .await?;

        let mut accounts = Vec::new();
        while let Some(row) = rows.next().await? {
            accounts.push(Self::parse_account(&row)?);
        }
        Ok(accounts)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM accounts WHERE name = ?", [name])
            .await?;

        if affected == 0 {
            return Err(Error::NotFound(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_and_get() {
        let db = setup().await;
        let repo = LibSqlAccountRepository::new(db.connection());

        let request = SaveRequest::manual("alice@example.com", "JBSWY3DPEHPK3PXP", AccountType::Totp);
        let saved = repo.save(&request).await.unwrap();
        assert_eq!(saved.name, "alice@example.com");
        assert_eq!(saved.secret, "JBSWY3DPEHPK3PXP");
        assert_eq!(saved.issuer, None);
        assert_eq!(saved.account_type, AccountType::Totp);

        let fetched = repo.get_by_name("alice@example.com").await.unwrap().unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_replaces_existing_name() {
        let db = setup().await;
        let repo = LibSqlAccountRepository::new(db.connection());

        let first = repo
            .save(&SaveRequest::manual("bob", "JBSWY3DPEHPK3PXP", AccountType::Totp))
            .await
            .unwrap();
        let second = repo
            .save(&SaveRequest::manual(
                "bob",
                "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ",
                AccountType::Hotp,
            ))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.secret, "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
        assert_eq!(second.account_type, AccountType::Hotp);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_orders_by_name() {
        let db = setup().await;
        let repo = LibSqlAccountRepository::new(db.connection());

        for name in ["carol", "Alice", "bob"] {
            repo.save(&SaveRequest::manual(name, "JBSWY3DPEHPK3PXP", AccountType::Totp))
                .await
                .unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|account| account.name)
            .collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete() {
        let db = setup().await;
        let repo = LibSqlAccountRepository::new(db.connection());

        repo.save(&SaveRequest::manual("dave", "JBSWY3DPEHPK3PXP", AccountType::Totp))
            .await
            .unwrap();
        repo.delete("dave").await.unwrap();

        assert!(repo.get_by_name("dave").await.unwrap().is_none());
        assert!(matches!(
            repo.delete("dave").await,
            Err(Error::NotFound(name)) if name == "dave"
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_type_is_stored_as_selection_index() {
        let db = setup().await;
        let repo = LibSqlAccountRepository::new(db.connection());

        for (name, account_type) in [("time", AccountType::Totp), ("count", AccountType::Hotp)] {
            repo.save(&SaveRequest::manual(name, "JBSWY3DPEHPK3PXP", account_type))
                .await
                .unwrap();

            let mut rows = db
                .connection()
                .query("SELECT account_type FROM accounts WHERE name = ?", [name])
                .await
                .unwrap();
            let row = rows.next().await.unwrap().unwrap();
            let stored: i64 = row.get(0).unwrap();
            assert_eq!(usize::try_from(stored).unwrap(), account_type.index());
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_type_index_is_rejected() {
        let db = setup().await;
        db.connection()
            .execute(
                "INSERT INTO accounts (name, secret, account_type, created_at, updated_at)
                 VALUES ('eve', 'JBSWY3DPEHPK3PXP', 9, 1, 1)",
                (),
            )
            .await
            .unwrap();

        let repo = LibSqlAccountRepository::new(db.connection());
        assert!(matches!(
            repo.get_by_name("eve").await,
            Err(Error::Database(_))
        ));
    }
}
