use std::io::{self, BufRead, Write};
use std::path::Path;

use keyentry_core::db::{AccountRepository, LibSqlAccountRepository};
use keyentry_core::{AccountType, EnterKeyScreen, ScreenEvent, ScreenExit, SecretSaver};

use crate::commands::common::{
    format_status_line, normalize_account_name, open_database, PackageVersion, PendingSave,
};
use crate::error::CliError;

const INTERACTIVE_HELP: &str =
    "Type the key and press enter to check it. An empty line saves; /account NAME, /type time|counter, /clear and /cancel are also available.";

pub async fn run_add(
    account: &str,
    account_type: AccountType,
    key: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let mut pending = PendingSave::default();

    let exit = {
        let mut screen = EnterKeyScreen::new(&mut pending, &PackageVersion);
        screen.handle(ScreenEvent::AccountNameChanged(account.trim().to_string()))?;
        screen.handle(ScreenEvent::TypeSelected(account_type))?;

        if let Some(key) = key {
            normalize_account_name(account)?;
            screen.handle(ScreenEvent::KeyChanged(key.to_string()))?;
            screen.handle(ScreenEvent::Submit)?;
            if !screen.is_closed() {
                return Err(CliError::KeyRejected(screen.status().text.clone()));
            }
        } else {
            let stdin = io::stdin();
            drive_screen(&mut screen, stdin.lock(), io::stdout().lock())?;
        }

        screen.exit()
    };

    match exit {
        Some(ScreenExit::Saved) => {
            let request = pending.take().ok_or(CliError::Unfinished)?;
            let db = open_database(db_path).await?;
            let repo = LibSqlAccountRepository::new(db.connection());
            let account = repo.save(&request).await?;
            println!("Saved {} ({})", account.name, account.account_type);
            Ok(())
        }
        Some(ScreenExit::Cancelled) => {
            println!("Cancelled");
            Ok(())
        }
        None => Err(CliError::Unfinished),
    }
}

/// Feed input lines to the screen until it closes or input ends.
pub fn drive_screen<S: SecretSaver>(
    screen: &mut EnterKeyScreen<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), CliError> {
    writeln!(output, "keyentry {}", screen.version_text())?;
    writeln!(output, "{INTERACTIVE_HELP}")?;

    for line in input.lines() {
        let line = line?;
        let event = match parse_input_line(&line) {
            Ok(event) => event,
            Err(message) => {
                writeln!(output, "[error] {message}")?;
                continue;
            }
        };

        if let Err(error) = screen.handle(event) {
            tracing::debug!("save rejected: {error}");
        }
        if screen.is_closed() {
            break;
        }

        let status = format_status_line(screen.status());
        if !status.is_empty() {
            writeln!(output, "{status}")?;
        }
    }

    Ok(())
}

/// Map one line of interactive input to a screen event.
pub fn parse_input_line(line: &str) -> Result<ScreenEvent, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ScreenEvent::Submit);
    }

    let Some(command) = line.strip_prefix('/') else {
        return Ok(ScreenEvent::KeyChanged(line.to_string()));
    };

    let (name, argument) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));

    match name {
        "clear" => Ok(ScreenEvent::Clear),
        "cancel" => Ok(ScreenEvent::Cancel),
        "account" => Ok(ScreenEvent::AccountNameChanged(argument.to_string())),
        "type" => argument.parse().map(ScreenEvent::TypeSelected),
        other => Err(format!("unknown command: /{other}")),
    }
}
