// ⚠️ Error taxonomy for DL generation
// Unimplemented states are NOT errors - they get the placeholder string.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DlError {
    /// Soundex (and every rule built on it) needs at least one character
    #[error("Invalid input: last name must not be empty")]
    EmptyName,

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Invalid gender: {0} (expected M or F)")]
    InvalidGender(String),

    #[error("Invalid birthdate: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DlError>;
