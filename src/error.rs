//! Error types for quickcalc
//!
//! Every fallible operation returns [`CalcResult`]; each call site decides
//! whether to log, degrade, or propagate.

use thiserror::Error;

/// Errors that can occur in quickcalc
#[derive(Debug, Error)]
pub enum CalcError {
    /// Blank input, never shown to the user
    #[error("Empty expression")]
    Empty,

    /// Tokenizer or grammar errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Identifier not present in the function/constant table
    #[error("Unknown name: {0}")]
    UnknownName(String),

    /// Function called with the wrong number of arguments
    #[error("{name}() takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: &'static str,
        got: usize,
    },

    /// Math domain errors (sqrt(-1), log(0), overflow to infinity)
    #[error("Math domain error: {0}")]
    Domain(String),

    #[error("Division by zero")]
    DivisionByZero,

    /// History file could not be written
    #[error("History error: {0}")]
    History(#[from] std::io::Error),

    /// Clipboard operation errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Desktop notification errors
    #[error("Notification error: {0}")]
    Notify(String),

    /// The chooser ran but failed
    #[error("Chooser error: {0}")]
    Chooser(String),

    /// The chooser program is not installed
    #[error("Chooser not found: {0}")]
    ChooserMissing(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    /// Whether this error came from evaluating user input, as opposed to a
    /// collaborator or the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Empty
                | CalcError::Parse(_)
                | CalcError::UnknownName(_)
                | CalcError::Arity { .. }
                | CalcError::Domain(_)
                | CalcError::DivisionByZero
        )
    }
}

/// Result type alias for quickcalc operations
pub type CalcResult<T> = Result<T, CalcError>;

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::Config(err.to_string())
    }
}
