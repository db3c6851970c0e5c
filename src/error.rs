//! Error types shared by policy construction, generation and hashing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to generate a policy-compliant password after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, PasswordError>;
