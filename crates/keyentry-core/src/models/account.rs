//! Account model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of one-time password an account produces.
///
/// The order matches the selection list on the key-entry screen; the index is
/// what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Time-based (TOTP)
    #[default]
    Totp,
    /// Counter-based (HOTP)
    Hotp,
}

impl AccountType {
    /// Selection list, in display order.
    pub const ALL: [Self; 2] = [Self::Totp, Self::Hotp];

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Totp => 0,
            Self::Hotp => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label shown in the selection list.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Totp => "Time based",
            Self::Hotp => "Counter based",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "totp" | "time" | "time based" => Ok(Self::Totp),
            "hotp" | "counter" | "counter based" => Ok(Self::Hotp),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

/// Request handed to the save collaborator when the user submits a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Label typed by the user
    pub account_name: String,
    /// Normalized base32 secret
    pub secret: String,
    /// Issuer; manual entry never sets one
    pub issuer: Option<String>,
    pub account_type: AccountType,
}

impl SaveRequest {
    /// Build a request for a manually entered key (no issuer).
    pub fn manual(
        account_name: impl Into<String>,
        secret: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            secret: secret.into(),
            issuer: None,
            account_type,
        }
    }

    /// Selection index of the account type.
    pub const fn type_index(&self) -> usize {
        self.account_type.index()
    }
}

/// A saved account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Row identifier
    pub id: i64,
    /// Unique account label
    pub name: String,
    /// Normalized base32 secret
    #[serde(skip_serializing)]
    pub secret: String,
    pub issuer: Option<String>,
    pub account_type: AccountType,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_index_round_trips() {
        for account_type in AccountType::ALL {
            assert_eq!(
                AccountType::from_index(account_type.index()),
                Some(account_type)
            );
        }
        assert_eq!(AccountType::from_index(2), None);
    }

    #[test]
    fn account_type_parses_short_and_long_names() {
        assert_eq!("time".parse::<AccountType>(), Ok(AccountType::Totp));
        assert_eq!("Counter Based".parse::<AccountType>(), Ok(AccountType::Hotp));
        assert!("sms".parse::<AccountType>().is_err());
    }

    #[test]
    fn manual_request_has_no_issuer() {
        let request = SaveRequest::manual("alice@example.com", "JBSWY3DP", AccountType::Hotp);
        assert_eq!(request.issuer, None);
        assert_eq!(request.type_index(), 1);
    }

    #[test]
    fn account_json_omits_secret() {
        let account = Account {
            id: 1,
            name: "alice".to_string(),
            secret: "JBSWY3DPEHPK3PXP".to_string(),
            issuer: None,
            account_type: AccountType::Totp,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("JBSWY3DPEHPK3PXP"));
        assert!(json.contains("\"account_type\":\"totp\""));
    }
}
