//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Classify a failed read of the outline as [`ApplicationError::FileNotFound`].
    ///
    /// # Example
    /// ```ignore
    /// let content = fs.read_to_string(&input).or_input_missing(&input)?;
    /// ```
    fn or_input_missing(self, path: &Path) -> ApplicationResult<T>;

    /// Classify a failed output operation as [`ApplicationError::Write`].
    fn or_write_error(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn or_input_missing(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })
    }

    fn or_write_error(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
