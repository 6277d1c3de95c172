//! Validation of manually entered secrets.
//!
//! Runs on every edit of the key field (`submitting = false`) and once more
//! when the user submits. The only difference between the two is whether a
//! too-short key produces a visible message.

use serde::{Deserialize, Serialize};

use crate::base32;
use crate::check_code::check_code;

/// Minimum decoded secret length accepted for an account.
pub const MIN_KEY_BYTES: usize = 10;

const TOO_SHORT_MESSAGE: &str = "Key value is too short";
const UNEXPECTED_MESSAGE: &str = "Unexpected problem";

/// Replace the visually ambiguous digits `1` and `0` with `I` and `O`.
///
/// Neither digit is part of the base32 alphabet, so this never changes a
/// correctly typed key.
pub fn normalize_key(entered: &str) -> String {
    entered
        .chars()
        .map(|ch| match ch {
            '1' => 'I',
            '0' => 'O',
            other => other,
        })
        .collect()
}

/// Result of validating the current key text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Key decodes to a long enough secret.
    Valid { check_code: String },
    /// Key decodes but is shorter than [`MIN_KEY_BYTES`].
    TooShort,
    /// Key is not valid base32; carries the decoder's message.
    DecodingError { message: String },
    /// Check code computation failed.
    UnexpectedError,
}

impl ValidationOutcome {
    /// Whether a key with this outcome may be saved.
    pub const fn is_acceptable(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Status line shown for this outcome.
    pub fn status(&self, submitting: bool) -> StatusMessage {
        match self {
            Self::Valid { check_code } => {
                StatusMessage::success(format!("Integrity check value: {check_code}"))
            }
            Self::TooShort if submitting => StatusMessage::error(TOO_SHORT_MESSAGE),
            Self::TooShort => StatusMessage::error(""),
            Self::DecodingError { message } => StatusMessage::error(message.clone()),
            Self::UnexpectedError => StatusMessage::error(UNEXPECTED_MESSAGE),
        }
    }
}

/// Colour of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    /// Nothing validated yet
    #[default]
    Neutral,
    /// Red
    Error,
    /// Green
    Success,
}

/// Text and colour of the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Error,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Success,
        }
    }

    /// Empty neutral status.
    pub fn cleared() -> Self {
        Self::default()
    }
}

/// Everything the key-entry screen needs from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValidation {
    /// Entered text after [`normalize_key`]; this is what gets saved.
    pub normalized_key: String,
    pub outcome: ValidationOutcome,
    pub status: StatusMessage,
    pub acceptable: bool,
}

/// Decides whether typed key text is an acceptable secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntryValidator {
    min_key_bytes: usize,
}

impl Default for KeyEntryValidator {
    fn default() -> Self {
        Self {
            min_key_bytes: MIN_KEY_BYTES,
        }
    }
}

impl KeyEntryValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw entered text.
    pub fn validate(&self, entered: &str, submitting: bool) -> KeyValidation {
        let normalized_key = normalize_key(entered);
        let outcome = self.outcome_for(&normalized_key);
        let status = outcome.status(submitting);
        let acceptable = outcome.is_acceptable();

        tracing::trace!(
            submitting,
            acceptable,
            key_len = normalized_key.len(),
            "validated entered key"
        );

        KeyValidation {
            normalized_key,
            outcome,
            status,
            acceptable,
        }
    }

    fn outcome_for(&self, normalized_key: &str) -> ValidationOutcome {
        let decoded = match base32::decode(normalized_key) {
            Ok(bytes) => bytes,
            Err(error) => {
                return ValidationOutcome::DecodingError {
                    message: error.to_string(),
                }
            }
        };

        if decoded.len() < self.min_key_bytes {
            return ValidationOutcome::TooShort;
        }

        match check_code(normalized_key) {
            Ok(check_code) => ValidationOutcome::Valid { check_code },
            Err(error) => {
                tracing::warn!("check code computation failed: {error}");
                ValidationOutcome::UnexpectedError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID_KEY: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    fn validate(entered: &str, submitting: bool) -> KeyValidation {
        KeyEntryValidator::new().validate(entered, submitting)
    }

    #[test]
    fn normalize_key_replaces_ambiguous_digits() {
        assert_eq!(normalize_key("10O1"), "IOOI");
        assert_eq!(normalize_key("abc"), "abc");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn valid_key_reports_check_code() {
        let result = validate(VALID_KEY, false);
        assert_eq!(
            result.outcome,
            ValidationOutcome::Valid {
                check_code: "755224".to_string()
            }
        );
        assert!(result.acceptable);
        assert_eq!(
            result.status,
            StatusMessage::success("Integrity check value: 755224")
        );
    }

    #[test]
    fn valid_key_is_idempotent() {
        let first = validate("JBSWY3DPEHPK3PXP", true);
        let second = validate("JBSWY3DPEHPK3PXP", true);
        assert_eq!(first, second);
        assert!(first.acceptable);
    }

    #[test]
    fn short_key_is_silent_while_typing() {
        let result = validate("JBSWY3DP", false);
        assert_eq!(result.outcome, ValidationOutcome::TooShort);
        assert!(!result.acceptable);
        assert_eq!(result.status, StatusMessage::error(""));
    }

    #[test]
    fn short_key_is_reported_on_submit() {
        let result = validate("JBSWY3DP", true);
        assert_eq!(result.outcome, ValidationOutcome::TooShort);
        assert!(!result.acceptable);
        assert_eq!(result.status.text, "Key value is too short");
        assert_eq!(result.status.tone, StatusTone::Error);
    }

    #[test]
    fn every_short_length_is_too_short() {
        // 16 symbols decode to exactly 10 bytes.
        for len in 0..16 {
            let key = "A".repeat(len);
            assert_eq!(
                validate(&key, true).outcome,
                ValidationOutcome::TooShort,
                "len {len}"
            );
            assert!(validate(&key, false).status.text.is_empty());
        }
        assert!(validate(&"A".repeat(16), true).acceptable);
    }

    #[test]
    fn empty_key_is_too_short() {
        assert_eq!(validate("", false).outcome, ValidationOutcome::TooShort);
    }

    #[test]
    fn illegal_character_is_a_decoding_error() {
        let result = validate("JBSWY3DP!HPK3PXP", false);
        assert_eq!(
            result.outcome,
            ValidationOutcome::DecodingError {
                message: "Illegal character: !".to_string()
            }
        );
        assert!(!result.acceptable);
        assert_eq!(result.status.tone, StatusTone::Error);
        assert!(!result.status.text.is_empty());
    }

    #[test]
    fn ambiguous_digits_are_corrected_before_decoding() {
        // "O" and "I" are valid symbols; their digit look-alikes are not.
        let typed = "GEZDGNBVGY3TQ0JQGEZDGNBVGY3TQ0JQ";
        let result = validate(typed, true);
        assert_eq!(result.normalized_key, VALID_KEY);
        assert!(result.acceptable);
    }

    #[test]
    fn other_digits_remain_illegal() {
        let result = validate("JBSWY3DPEHPK3PX8", true);
        assert!(matches!(
            result.outcome,
            ValidationOutcome::DecodingError { .. }
        ));
    }

    #[test]
    fn unexpected_error_has_fixed_message() {
        let status = ValidationOutcome::UnexpectedError.status(true);
        assert_eq!(status, StatusMessage::error("Unexpected problem"));
        assert!(!ValidationOutcome::UnexpectedError.is_acceptable());
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ValidationOutcome::Valid {
            check_code: "123456".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"valid","check_code":"123456"}"#);
    }
}
