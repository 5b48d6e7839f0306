//! Tokens gating the destructive schedule operations.
//!
//! Day paste and clear-all are irreversible within a session, so the store
//! methods refuse to run without a token that can only come from an explicit
//! confirmation step at the call site. The prompt/UI flow itself lives
//! outside the core.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    #[error("wrong passphrase for clear operation")]
    WrongPassphrase,
}

/// Proof that the user answered an explicit "are you sure?" prompt.
#[derive(Debug)]
pub struct Confirmed(());

impl Confirmed {
    /// Call only after showing the destructive-action prompt and receiving a
    /// positive answer.
    pub fn acknowledge() -> Self {
        Self(())
    }
}

/// Secondary gate for clear-all: a shared passphrase on top of the prompt.
#[derive(Debug, Clone)]
pub struct ClearGuard {
    passphrase: String,
}

impl ClearGuard {
    pub fn new<S: Into<String>>(passphrase: S) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn unlock(&self, input: &str) -> Result<ClearToken, GuardError> {
        if input == self.passphrase {
            Ok(ClearToken(()))
        } else {
            Err(GuardError::WrongPassphrase)
        }
    }
}

/// Proof that the clear passphrase was entered correctly.
#[derive(Debug)]
pub struct ClearToken(());
