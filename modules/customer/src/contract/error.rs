use thiserror::Error;

/// Failures of the remote role operations. All of these are infrastructure
/// level: none of them means "the user is ineligible", and none of them is
/// allowed to block a save.
#[derive(Debug, Clone, Error)]
pub enum RolesError {
    #[error("transport failure: {message}")]
    Transport { message: String },

    #[error("roles service returned HTTP {code}")]
    Status { code: u16 },

    #[error("invalid roles response: {message}")]
    Decode { message: String },
}

impl RolesError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Self::Status { code }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
