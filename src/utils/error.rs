//! Error types for quietdoc
//!
//! This module defines the error type used by the ambient layers of the
//! application (configuration, window creation). The interaction core never
//! surfaces these to the user: every failure there is local and recovered.
//! We use thiserror for the error type and anyhow at the binary boundary.

use thiserror::Error;

/// Main error type for quietdoc
#[derive(Error, Debug)]
pub enum QuietDocError {
    /// Window-related errors
    #[error("Window error: {0}")]
    Window(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<toml::de::Error> for QuietDocError {
    fn from(err: toml::de::Error) -> Self {
        QuietDocError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for QuietDocError {
    fn from(err: toml::ser::Error) -> Self {
        QuietDocError::Config(format!("TOML serialize error: {}", err))
    }
}

impl QuietDocError {
    /// Create an invalid-input error from string
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        QuietDocError::InvalidInput(msg.into())
    }
}

/// Convenience type alias for Results in quietdoc
pub type Result<T> = std::result::Result<T, QuietDocError>;

/// Extension trait for converting other errors to QuietDocError
pub trait IntoQuietDocError<T> {
    /// Convert this error into a QuietDocError with the given context
    fn window_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoQuietDocError<T> for std::result::Result<T, E> {
    fn window_err(self, context: &str) -> Result<T> {
        self.map_err(|e| QuietDocError::Window(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| QuietDocError::Config(format!("{}: {}", context, e)))
    }
}

/// Helper macro for creating internal errors with file and line information
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::utils::error::QuietDocError::Internal(
            format!("{} at {}:{}", $msg, file!(), line!())
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::error::QuietDocError::Internal(
            format!("{} at {}:{}", format!($fmt, $($arg)*), file!(), line!())
        )
    };
}
