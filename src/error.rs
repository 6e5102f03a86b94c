use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectedError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid range: {message}")]
    InvalidRange { message: String },
    #[error("Store error: {0}")]
    Store(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, ProjectedError>;

// Helper conversions
impl From<rusqlite::Error> for ProjectedError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store(e.to_string())
    }
}

impl From<config::ConfigError> for ProjectedError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
