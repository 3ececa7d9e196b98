//! Error types with source location tracking.
//!
//! All errors raised while reading an expert-system program carry a
//! [`Span`] indicating the line the error occurred on. This enables precise,
//! contextual error messages without threading a source string through every
//! layer of the pipeline.
//!
//! # Example
//!
//! ```
//! use expert_base::{SpannedError, Span, Result};
//!
//! fn check_letter(c: char, span: Span) -> Result<()> {
//!     if c.is_ascii_uppercase() {
//!         Ok(())
//!     } else {
//!         Err(SpannedError::new(format!("invalid character: '{}'", c), span))
//!     }
//! }
//!
//! let err = check_letter('9', Span::new(2)).unwrap_err();
//! assert!(err.to_string().contains("invalid character"));
//! ```

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location.
///
/// Implements [`std::error::Error`] and [`fmt::Display`]. The display format
/// is: `{message} ({span})`.
#[derive(Debug, Clone)]
pub struct SpannedError {
    /// Human-readable error description.
    pub message: String,
    /// Line in the source where the error occurred.
    pub span: Span,
}

impl SpannedError {
    /// Creates an error with the given message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_error_display() {
        let err = SpannedError::new("test error", Span::new(4));
        let display = format!("{}", err);
        assert!(display.contains("test error"));
        assert!(display.contains("line 5"));
    }
}
