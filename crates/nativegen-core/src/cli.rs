//! Value types shared by the `nativegen` binary and its command handlers.
//!
//! # Examples
//!
//! ```
//! use nativegen_core::Error;
//! use nativegen_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! let err = Error::InvalidArgument("unknown target".into());
//! assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// How command summaries are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Indented JSON
    Json,
    /// `key=value` lines for scripts
    Text,
    /// Colored listing for terminals
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Every format, in help-text order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Text, Self::Pretty];

    /// Returns the flag value naming this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid output format: '{s}' (expected: json, text, or pretty)"
                ))
            })
    }
}

/// Process exit status.
///
/// Scripts can tell a malformed intermediate file apart from bad
/// command-line input and from other failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Everything was generated.
    pub const SUCCESS: Self = Self(0);

    /// I/O, template or other unexpected failure.
    pub const ERROR: Self = Self(1);

    /// Invalid flags, names, triples or configuration values.
    pub const INVALID_INPUT: Self = Self(2);

    /// The intermediate type-definition file could not be parsed.
    pub const PARSE_ERROR: Self = Self(3);

    /// Returns the numeric status.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns `true` for [`ExitCode::SUCCESS`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Picks the status reported for a library error.
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        match error {
            Error::ParseError { .. } => Self::PARSE_ERROR,
            Error::InvalidArgument(_) | Error::ValidationError { .. } | Error::ConfigError { .. } => {
                Self::INVALID_INPUT
            }
            Error::Io { .. } | Error::TemplateError { .. } => Self::ERROR,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_output_format_round_trips_through_str() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!("PRETTY".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }

    #[test]
    fn test_output_format_rejects_unknown() {
        for bad in ["", "yaml", "jsonl"] {
            let err = bad.parse::<OutputFormat>().unwrap_err();
            assert!(err.to_string().contains("invalid output format"));
        }
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(i32::from(ExitCode::ERROR), 1);
        assert_eq!(ExitCode::INVALID_INPUT.to_string(), "2");
        assert!(ExitCode::default().is_success());
        assert!(!ExitCode::PARSE_ERROR.is_success());
    }

    #[test]
    fn test_exit_code_for_error() {
        let parse = Error::ParseError {
            line: 4,
            message: "expected value".into(),
            source: None,
        };
        assert_eq!(ExitCode::for_error(&parse), ExitCode::PARSE_ERROR);

        let validation = Error::ValidationError {
            field: "exports".into(),
            reason: "not an identifier".into(),
        };
        assert_eq!(ExitCode::for_error(&validation), ExitCode::INVALID_INPUT);

        let io = Error::Io {
            path: PathBuf::from("index.d.ts"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(ExitCode::for_error(&io), ExitCode::ERROR);
    }
}
