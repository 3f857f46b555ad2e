//! Error types for the pairing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can abort a pairing run.

use thiserror::Error;

/// The main error type for the pairing engine.
///
/// Normalization, preference loading, pairing and export all return this
/// error type; the presentation layer decides how to render it.
///
/// # Example
///
/// ```
/// use stonebridge_pairing::error::PairingError;
///
/// let error = PairingError::MissingRequiredColumns {
///     fields: vec!["site".to_string(), "provider".to_string()],
/// };
/// assert_eq!(error.to_string(), "Roster missing required columns: site, provider");
/// ```
#[derive(Debug, Error)]
pub enum PairingError {
    /// No column in the roster could populate one or more required fields.
    #[error("Roster missing required columns: {}", .fields.join(", "))]
    MissingRequiredColumns {
        /// The canonical fields that no row could populate.
        fields: Vec<String>,
    },

    /// A single row still lacks a required field after normalization.
    #[error(
        "Row {row} could not be normalized: missing {}. Check headers like Location/Employee/Start Date, or share the first 5 header names: {}",
        .fields.join(", "),
        .headers.join(", ")
    )]
    UnresolvableRow {
        /// The 1-based row number in the uploaded roster.
        row: usize,
        /// The canonical fields left empty.
        fields: Vec<String>,
        /// Up to the first five headers seen in the roster.
        headers: Vec<String>,
    },

    /// One or more rows could not be normalized under the fail-fast policy.
    #[error(
        "Roster could not be normalized ({} unresolved row(s), first at row {}). Check headers like Location/Employee/Start Date, or share the first 5 header names: {}",
        .rows.len(),
        .rows.first().copied().unwrap_or_default(),
        .headers.join(", ")
    )]
    UnresolvableRoster {
        /// The 1-based row numbers that failed normalization.
        rows: Vec<usize>,
        /// Up to the first five headers seen in the roster.
        headers: Vec<String>,
    },

    /// Normalization produced no usable rows.
    #[error("Roster produced no usable shifts after normalization")]
    EmptyResult,

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input table could not be read.
    #[error("Failed to read '{path}': {message}")]
    InputRead {
        /// The source that failed to read.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// Calendar export failed.
    #[error("Calendar export failed: {message}")]
    Export {
        /// A description of the export error.
        message: String,
    },
}

/// A type alias for Results that return PairingError.
pub type PairingResult<T> = Result<T, PairingError>;
