//! Error types for nativegen.
//!
//! This module provides the error hierarchy shared by the type-definition
//! assembler and the loader generator.
//!
//! # Examples
//!
//! ```
//! use nativegen_core::{Error, Result};
//!
//! fn check_header(header: &str) -> Result<()> {
//!     if header.contains('\0') {
//!         return Err(Error::ConfigError {
//!             message: "header cannot contain null bytes".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_header("\0").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading records, validating inputs, or rendering
/// output.
#[derive(Error, Debug)]
pub enum Error {
    /// A line of the intermediate type-definition file is not a valid
    /// record. One bad line fails the whole document.
    #[error("Malformed type definition on line {line}: {message}")]
    ParseError {
        /// 1-based line number in the intermediate file
        line: usize,
        /// Description of the parse failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Reading an input or writing a generated file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path of the file being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// `nativegen.toml` is malformed or its values contradict each other.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Unknown target, platform triple or output format.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A package name, binary name, page count or identifier is not
    /// acceptable.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// Offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Template registration or rendering failed.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Name of the template
        template: String,
        /// Description of the failure
        message: String,
    },
}

impl Error {
    /// Returns `true` if this is a parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_core::Error;
    ///
    /// let err = Error::ParseError {
    ///     line: 3,
    ///     message: "expected value".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "initial memory exceeds maximum".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns the offending line number for parse errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_core::Error;
    ///
    /// let err = Error::ParseError {
    ///     line: 7,
    ///     message: "trailing characters".to_string(),
    ///     source: None,
    /// };
    /// assert_eq!(err.line(), Some(7));
    /// assert_eq!(Error::InvalidArgument("x".into()).line(), None);
    /// ```
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::ParseError { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for nativegen operations.
///
/// # Examples
///
/// ```
/// use nativegen_core::{Result, Error};
///
/// fn validate_pages(value: u32) -> Result<u32> {
///     if value == 0 {
///         return Err(Error::ConfigError {
///             message: "page count must be positive".to_string(),
///         });
///     }
///     Ok(value)
/// }
///
/// assert!(validate_pages(5).is_ok());
/// assert!(validate_pages(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
