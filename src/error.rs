//! # Error Types
//!
//! Rendering never fails: every string has a defined rendering. Errors only
//! come from reading a song document's metadata header or loading render
//! options from YAML.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{Song, SheetError};
//!
//! match Song::parse("Title: Alabaré\nColour: red\n\nDo  Sol") {
//!     Ok(song) => println!("{}", song.metadata.title),
//!     Err(SheetError::MetadataError { line, message }) => {
//!         eprintln!("Bad header at line {}: {}", line, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SheetError {
    /// Malformed `Label: value` header in a song document.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::MetadataError {
    ///     line: 2,
    ///     message: "Unknown label 'Colour'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid metadata at line 2: Unknown label 'Colour'");
    /// ```
    #[error("Invalid metadata at line {line}: {message}")]
    MetadataError { line: usize, message: String },

    /// Render options that failed to deserialize or validate.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::ConfigError("density-threshold must be between 0 and 1".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: density-threshold must be between 0 and 1"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
