use thiserror::Error;

/// Errors surfaced by form lifecycle hooks and the save pipeline.
///
/// `Validation` is the blocking kind: the host displays it modally and the
/// pending save is aborted. Everything non-blocking (transport hiccups the
/// handler chooses to tolerate) goes through the [`crate::Notifier`] port
/// instead of this type.
#[derive(Debug, Error)]
pub enum FormError {
    /// Business-rule rejection; aborts the save/validate pipeline.
    #[error("{message}")]
    Validation { message: String },

    /// The record store refused or failed the write.
    #[error("record store error: {message}")]
    Store { message: String },

    /// Infrastructure failure inside a hook that the handler did not
    /// translate into a validation outcome.
    #[error(transparent)]
    Hook(#[from] anyhow::Error),
}

impl FormError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Whether this error blocks the pending operation from the user's
    /// point of view (all variants do; the distinction matters for tests
    /// asserting on the rejection kind).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
