use thiserror::Error;

/// Errors a host can raise while handing data to a [`crate::FixedBuffer`].
#[derive(Debug, Error)]
pub enum WordError {
    /// The source could not be viewed as a contiguous byte sequence.
    #[error("expected a bytes-like object, found {found}")]
    InvalidInputKind { found: String },
}

impl WordError {
    pub fn invalid_input(found: impl Into<String>) -> Self {
        WordError::InvalidInputKind {
            found: found.into(),
        }
    }
}
