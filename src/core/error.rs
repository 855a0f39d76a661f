use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Entity '{0}' already exists in store '{1}'")]
    DuplicateId(String, String),

    #[error("Entity '{0}' not found in store '{1}'")]
    NotFound(String, String),

    #[error("Editing is locked: cannot {0}")]
    EditLocked(String),

    #[error("{0} must be used within a {1}")]
    MissingProvider(String, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StateError>;

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for StateError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}
