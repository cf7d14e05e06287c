use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdmincolsError {
    /// A column key was empty or not usable as a string identifier.
    #[error("Invalid column key: {0:?}")]
    InvalidKey(String),

    /// A handler was requested with a missing object type, subtype, or
    /// an empty column set.
    #[error("Invalid registration: {0}")]
    InvalidConfiguration(String),

    /// A handler kind name did not match any known variant.
    #[error("Unknown handler kind: {0:?}")]
    UnknownHandlerKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdmincolsError>;
