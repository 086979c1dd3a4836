//! Generated output containers.
//!
//! Both pipelines hand their results back as a [`GeneratedCode`] so callers
//! write declaration documents and loader scripts the same way.
//!
//! # Examples
//!
//! ```
//! use nativegen_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new("index.d.ts", "export {}\n"));
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use nativegen_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files in emission order
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Looks up a file by its relative path.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new();
    /// code.add_file(GeneratedFile::new("index.js", "module.exports = {}"));
    ///
    /// assert!(code.get("index.js").is_some());
    /// assert!(code.get("missing.js").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Writes every file below `dir`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        for file in &self.files {
            let target = dir.join(&file.path);

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            std::fs::write(&target, &file.content).map_err(|source| Error::Io {
                path: target.clone(),
                source,
            })?;

            tracing::debug!("Wrote {} ({} bytes)", target.display(), file.content.len());
        }

        Ok(())
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Creates a file entry.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_default() {
        let code = GeneratedCode::default();
        assert_eq!(code.file_count(), 0);
        assert_eq!(code, GeneratedCode::new());
    }

    #[test]
    fn test_add_file_preserves_order() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new("b.js", ""));
        code.add_file(GeneratedFile::new("a.js", ""));
        let paths: Vec<&str> = code.files().map(GeneratedFile::path).collect();
        assert_eq!(paths, ["b.js", "a.js"]);
    }

    #[test]
    fn test_write_to_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new("index.d.ts", "export {}\n"));
        code.add_file(GeneratedFile::new("wasi/worker.mjs", "// worker\n"));

        code.write_to(dir.path()).unwrap();

        let dts = std::fs::read_to_string(dir.path().join("index.d.ts")).unwrap();
        assert_eq!(dts, "export {}\n");
        assert!(dir.path().join("wasi/worker.mjs").exists());
    }

    #[test]
    fn test_write_to_reports_io_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile::new("nested/out.js", ""));

        // the parent "directory" is a regular file
        let err = code.write_to(file.path()).unwrap_err();
        assert!(err.is_io_error());
    }
}
