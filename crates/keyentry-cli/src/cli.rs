use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use keyentry_core::AccountType;

#[derive(Parser)]
#[command(name = "keyentry")]
#[command(about = "Enter one-time-password keys by hand and verify them with a check code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local account database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a key and show its integrity check value
    Check {
        /// Base32 key as typed
        key: String,
        /// Validate as if the key were being submitted
        #[arg(long)]
        submit: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Enter a key for a new account
    #[command(alias = "new")]
    Add {
        /// Account label
        #[arg(short, long, value_name = "NAME", default_value = "")]
        account: String,
        /// Account type
        #[arg(short = 't', long = "type", value_enum, default_value_t = TypeChoice::Time)]
        account_type: TypeChoice,
        /// Base32 key; read interactively from stdin when omitted
        key: Option<String>,
    },
    /// List saved accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved account
    Delete {
        /// Account label
        name: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum TypeChoice {
    /// Time-based codes
    Time,
    /// Counter-based codes
    Counter,
}

impl From<TypeChoice> for AccountType {
    fn from(choice: TypeChoice) -> Self {
        match choice {
            TypeChoice::Time => Self::Totp,
            TypeChoice::Counter => Self::Hotp,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
