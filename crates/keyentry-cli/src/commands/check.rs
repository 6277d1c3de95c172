use keyentry_core::{KeyEntryValidator, KeyValidation, StatusMessage, ValidationOutcome};
use serde::Serialize;

use crate::commands::common::format_status_line;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    normalized_key: &'a str,
    acceptable: bool,
    outcome: &'a ValidationOutcome,
    status: &'a StatusMessage,
}

pub fn run_check(key: &str, submitting: bool, as_json: bool) -> Result<(), CliError> {
    let validation = KeyEntryValidator::new().validate(key, submitting);
    let rejected = submitting && !validation.acceptable;

    if let Some(output) = check_output(&validation, as_json, rejected)? {
        println!("{output}");
    }

    if rejected {
        return Err(CliError::KeyRejected(validation.status.text));
    }
    Ok(())
}

/// What `check` writes to stdout.
///
/// A rejected key's message reaches the user once, through the returned
/// error, so the text form prints nothing for it. The JSON report is always
/// printed.
pub fn check_output(
    validation: &KeyValidation,
    as_json: bool,
    rejected: bool,
) -> Result<Option<String>, CliError> {
    if as_json {
        let report = CheckReport {
            normalized_key: &validation.normalized_key,
            acceptable: validation.acceptable,
            outcome: &validation.outcome,
            status: &validation.status,
        };
        return Ok(Some(serde_json::to_string_pretty(&report)?));
    }

    if rejected {
        return Ok(None);
    }

    let line = format_status_line(&validation.status);
    Ok((!line.is_empty()).then_some(line))
}
