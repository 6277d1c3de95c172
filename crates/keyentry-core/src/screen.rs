//! Manual key-entry screen.
//!
//! Host-agnostic state for the "enter key" screen. A host (terminal, mobile
//! shell) forwards user input as [`ScreenEvent`]s and renders the getters;
//! persistence and version lookup are injected at construction.

use crate::error::Result;
use crate::models::{AccountType, SaveRequest};
use crate::validator::{KeyEntryValidator, StatusMessage};

/// Shown when the version lookup fails.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Persists an accepted key.
pub trait SecretSaver {
    fn save_secret(&mut self, request: &SaveRequest) -> Result<()>;
}

impl<S: SecretSaver + ?Sized> SecretSaver for &mut S {
    fn save_secret(&mut self, request: &SaveRequest) -> Result<()> {
        (**self).save_secret(request)
    }
}

/// Resolves the version string shown on the screen.
pub trait VersionLookup {
    fn version_name(&self) -> Result<String>;
}

/// User input forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Key field text changed
    KeyChanged(String),
    /// Account label text changed
    AccountNameChanged(String),
    /// Account type picked from the selection list
    TypeSelected(AccountType),
    Submit,
    Clear,
    Cancel,
}

/// How the screen closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenExit {
    Saved,
    Cancelled,
}

/// State of the key-entry screen.
pub struct EnterKeyScreen<S> {
    saver: S,
    validator: KeyEntryValidator,
    key_text: String,
    account_name: String,
    account_type: AccountType,
    status: StatusMessage,
    acceptable: bool,
    version_text: String,
    exit: Option<ScreenExit>,
}

impl<S: SecretSaver> EnterKeyScreen<S> {
    pub fn new(saver: S, version: &impl VersionLookup) -> Self {
        let version_text = version.version_name().unwrap_or_else(|error| {
            tracing::debug!("version lookup failed: {error}");
            UNKNOWN_VERSION.to_string()
        });

        Self {
            saver,
            validator: KeyEntryValidator::new(),
            key_text: String::new(),
            account_name: String::new(),
            account_type: AccountType::default(),
            status: StatusMessage::cleared(),
            acceptable: false,
            version_text,
            exit: None,
        }
    }

    /// Route an event to its handler. Events after the screen closed are ignored.
    pub fn handle(&mut self, event: ScreenEvent) -> Result<()> {
        if let Some(exit) = self.exit {
            tracing::debug!(?exit, ?event, "ignoring event on closed screen");
            return Ok(());
        }

        match event {
            ScreenEvent::KeyChanged(text) => self.on_key_changed(text),
            ScreenEvent::AccountNameChanged(text) => self.account_name = text,
            ScreenEvent::TypeSelected(account_type) => self.account_type = account_type,
            ScreenEvent::Submit => return self.on_submit(),
            ScreenEvent::Clear => self.on_clear(),
            ScreenEvent::Cancel => self.on_cancel(),
        }
        Ok(())
    }

    fn on_key_changed(&mut self, text: String) {
        self.key_text = text;
        self.refresh_status(false);
    }

    fn on_submit(&mut self) -> Result<()> {
        if !self.refresh_status(true) {
            return Ok(());
        }

        let request = SaveRequest::manual(
            self.account_name.clone(),
            self.normalized_key(),
            self.account_type,
        );
        if let Err(error) = self.saver.save_secret(&request) {
            self.status = StatusMessage::error(format!("Unable to save account: {error}"));
            self.acceptable = false;
            return Err(error);
        }

        tracing::info!(
            account = %request.account_name,
            account_type = %request.account_type,
            "saved manually entered key"
        );
        self.exit = Some(ScreenExit::Saved);
        Ok(())
    }

    fn on_clear(&mut self) {
        self.status = StatusMessage::cleared();
        self.account_name.clear();
        self.key_text.clear();
        self.acceptable = false;
    }

    fn on_cancel(&mut self) {
        self.exit = Some(ScreenExit::Cancelled);
    }

    /// Re-run validation on the current key and update the status line.
    fn refresh_status(&mut self, submitting: bool) -> bool {
        let validation = self.validator.validate(&self.key_text, submitting);
        self.status = validation.status;
        self.acceptable = validation.acceptable;
        self.acceptable
    }

    pub fn key_text(&self) -> &str {
        &self.key_text
    }

    /// Key text with ambiguous digits corrected.
    pub fn normalized_key(&self) -> String {
        crate::validator::normalize_key(&self.key_text)
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub const fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub const fn status(&self) -> &StatusMessage {
        &self.status
    }

    pub const fn is_acceptable(&self) -> bool {
        self.acceptable
    }

    pub fn version_text(&self) -> &str {
        &self.version_text
    }

    pub const fn exit(&self) -> Option<ScreenExit> {
        self.exit
    }

    pub const fn is_closed(&self) -> bool {
        self.exit.is_some()
    }

    /// Give back the saver, e.g. to read what it recorded.
    pub fn into_saver(self) -> S {
        self.saver
    }
}
