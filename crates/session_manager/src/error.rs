//! Session manager error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
