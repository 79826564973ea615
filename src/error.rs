use std::fmt::{Display, Formatter};

use thiserror::Error;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Failure of a single call against the remote collection.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// Connection refused, DNS failure, reset, etc.
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The body did not have the shape of a user record.
    #[error("unexpected response body: {message}")]
    Decode { message: String },

    #[error("invalid collection URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode { .. } | Self::InvalidUrl(_) => None,
        }
    }
}

/// Errors surfaced by directory actions.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Model operation on an id absent from the local directory.
    #[error("User {id} not found")]
    NotFound { id: u64 },
}

pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}
