use thiserror::Error;

/// Repository error, tagged by kind so handlers can match on the class of
/// failure instead of inspecting concrete backend error types.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{entity} '{key}' not in database")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },

    #[error("{0}")]
    Validation(String),

    #[error("{context}: {message}")]
    Backend {
        context: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn conflict(entity: &'static str, key: impl Into<String>) -> Self {
        Error::Conflict {
            entity,
            key: key.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Wraps a transport/serialization failure, keeping only the display text
    /// of the underlying error.
    pub fn backend(context: &'static str, source: impl std::fmt::Display) -> Self {
        Error::Backend {
            context,
            message: source.to_string(),
        }
    }
}
