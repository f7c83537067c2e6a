//! Error types for the BIP solver.

use thiserror::Error;

/// Errors that can occur while building or solving a binary program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BipError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// A variable used by the model was not declared binary
    #[error("Variable '{name}' is not binary; all variables of a binary integer program must be binary")]
    NonBinaryVariable {
        /// Declared name of the offending variable.
        name: String,
    },

    /// An expression refers to a variable the model never declared
    #[error("Unknown variable index {index}")]
    UnknownVariable {
        /// Index carried by the foreign variable handle.
        index: usize,
    },

    /// LP relaxation oracle failed
    #[error("Oracle failed: {0}")]
    OracleError(String),

    /// Settings were rejected
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl BipError {
    /// Returns true for errors raised while validating a model.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            BipError::InvalidProblem(_)
                | BipError::NonBinaryVariable { .. }
                | BipError::UnknownVariable { .. }
        )
    }
}

/// Result type for BIP operations.
pub type BipResult<T> = Result<T, BipError>;
