//! Render error type.
//!
//! The only failure a refresh cycle can hit is the output write; the
//! underlying `io::Error` is passed through untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn io_kind(&self) -> std::io::ErrorKind {
        match self {
            RenderError::Io(e) => e.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
