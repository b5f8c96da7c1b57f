use thiserror::Error;

/// Domain-level errors of the customer rules.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The linked account does not hold the Customer role. The message is
    /// the user-facing text shown by the blocking error.
    #[error("Only Users with Customer roles can be associated with the Customer document")]
    IneligibleUser,

    #[error("permission grant failed: {message}")]
    PermissionGrant { message: String },
}

impl DomainError {
    pub fn permission_grant(message: impl Into<String>) -> Self {
        Self::PermissionGrant {
            message: message.into(),
        }
    }
}

impl From<DomainError> for formkit::FormError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::IneligibleUser => formkit::FormError::validation(e.to_string()),
            other @ DomainError::PermissionGrant { .. } => {
                formkit::FormError::Hook(anyhow::Error::new(other))
            }
        }
    }
}
