//! Strong domain types for nativegen.
//!
//! Newtypes over primitives for the values the loader generator splices
//! into generated scripts. Validation happens at construction so templates
//! never see an empty package name or an out-of-range page count.
//!
//! # Examples
//!
//! ```
//! use nativegen_core::{BinaryName, MemoryPages, PackageName};
//!
//! let package = PackageName::new("@scope/addon").unwrap();
//! let binary = BinaryName::new("addon").unwrap();
//! let pages = MemoryPages::new(4000).unwrap();
//! assert_eq!(package.as_str(), "@scope/addon");
//! assert_eq!(binary.as_str(), "addon");
//! assert_eq!(pages.get(), 4000);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checks that a name is non-empty and safe to splice into a quoted
/// JavaScript string literal.
fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::ValidationError {
            field: field.to_string(),
            reason: "cannot be empty".to_string(),
        });
    }

    if let Some(bad) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '\'' | '"' | '`' | '\\'))
    {
        return Err(Error::ValidationError {
            field: field.to_string(),
            reason: format!("contains invalid character {bad:?}"),
        });
    }

    Ok(())
}

/// npm package name of the published native module (newtype over String).
///
/// Platform packages are derived from it as `<package>-<triple>`.
///
/// # Examples
///
/// ```
/// use nativegen_core::PackageName;
///
/// let name = PackageName::new("@napi-rs/canvas").unwrap();
/// assert_eq!(name.to_string(), "@napi-rs/canvas");
/// assert!(PackageName::new("").is_err());
/// assert!(PackageName::new("bad name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    /// Creates a validated package name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is empty or contains
    /// whitespace, quotes, or backslashes.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("package_name", &name)?;
        Ok(Self(name))
    }

    /// Returns the package name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PackageName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.0
    }
}

/// File-name stem of the compiled binary (newtype over String).
///
/// Local binaries are named `<binary>.<triple>.node` and the wasm build
/// `<binary>.wasm32-wasi.wasm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryName(String);

impl BinaryName {
    /// Creates a validated binary name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the name is empty, contains a
    /// path separator, or contains characters unsafe in a string literal.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name("binary_name", &name)?;
        if name.contains('/') {
            return Err(Error::ValidationError {
                field: "binary_name".to_string(),
                reason: "must be a file stem, not a path".to_string(),
            });
        }
        Ok(Self(name))
    }

    /// Returns the binary name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BinaryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BinaryName> for String {
    fn from(name: BinaryName) -> Self {
        name.0
    }
}

/// Count of 64 KiB WebAssembly linear-memory pages.
///
/// # Examples
///
/// ```
/// use nativegen_core::MemoryPages;
///
/// assert_eq!(MemoryPages::MAX.get(), 65536);
/// assert!(MemoryPages::new(0).is_err());
/// assert!(MemoryPages::new(65537).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MemoryPages(u32);

impl MemoryPages {
    /// Largest page count addressable by a 32-bit memory (4 GiB).
    pub const MAX: Self = Self(65_536);

    /// Default initial memory for wasm targets (about 250 MiB).
    pub const DEFAULT_INITIAL: Self = Self(4000);

    /// Creates a page count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for zero or for counts above
    /// [`MemoryPages::MAX`].
    pub fn new(pages: u32) -> Result<Self> {
        if pages == 0 || pages > Self::MAX.0 {
            return Err(Error::ValidationError {
                field: "memory_pages".to_string(),
                reason: format!("{pages} is outside 1..={}", Self::MAX.0),
            });
        }
        Ok(Self(pages))
    }

    /// Returns the page count.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MemoryPages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for MemoryPages {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MemoryPages> for u32 {
    fn from(pages: MemoryPages) -> Self {
        pages.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_scoped() {
        let name = PackageName::new("@scope/addon").unwrap();
        assert_eq!(name.as_str(), "@scope/addon");
    }

    #[test]
    fn test_package_name_rejects_quotes() {
        assert!(PackageName::new("addon'").is_err());
        assert!(PackageName::new("add\"on").is_err());
        assert!(PackageName::new("add\\on").is_err());
    }

    #[test]
    fn test_binary_name_rejects_path() {
        assert!(BinaryName::new("dist/addon").is_err());
        assert!(BinaryName::new("addon").is_ok());
    }

    #[test]
    fn test_memory_pages_bounds() {
        assert!(MemoryPages::new(1).is_ok());
        assert!(MemoryPages::new(65_536).is_ok());
        let err = MemoryPages::new(70_000).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn test_memory_pages_deserialize_validates() {
        let ok: MemoryPages = serde_json::from_str("4000").unwrap();
        assert_eq!(ok.get(), 4000);
        assert!(serde_json::from_str::<MemoryPages>("0").is_err());
    }

    #[test]
    fn test_package_name_serde_round_trip_validates() {
        let name: PackageName = serde_json::from_str("\"addon\"").unwrap();
        assert_eq!(name.as_str(), "addon");
        assert!(serde_json::from_str::<PackageName>("\"\"").is_err());
    }
}
