use thiserror::Error;

/// Domain errors for the power consumption module.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A reading is dated after the current moment. The message is shown
    /// verbatim to the person filling in the form.
    #[error("Power consumption can not be recorded for future dates")]
    FutureDate,
}

impl From<DomainError> for formkit::FormError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::FutureDate => formkit::FormError::validation(e.to_string()),
        }
    }
}
