use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeacockError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library error: {0}")]
    Library(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

pub type Result<T> = std::result::Result<T, PeacockError>;
