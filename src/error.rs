// src/error.rs

//! Error taxonomy for metadata extraction
//!
//! Every variant is an expected outcome of parsing untrusted recipe
//! text and travels inside the normal result value; nothing here is
//! ever raised as a panic.

use thiserror::Error;

/// Extraction failure reported back to the submission workflow.
///
/// Display strings keep parity with the messages the upload path shows
/// to submitters, so callers can surface them verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// No line matched the `build()` marker pattern.
    #[error("Missing build function in PKGBUILD.")]
    MissingBuildFunction,

    /// First mandatory variable missing in the fixed scan order.
    /// Only one missing field is ever reported per extraction.
    #[error("Missing {0} variable in PKGBUILD.")]
    MissingRequiredField(String),

    /// A value kept producing new expansion work past the iteration
    /// budget. The recipe is untrusted input, so this is returned
    /// instead of looping forever.
    #[error("Variable expansion did not terminate for {0} in PKGBUILD.")]
    ExpansionOverflow(String),
}
