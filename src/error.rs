//! Error types for record parsing and diagnostic setup.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a line that could not be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The amount field is not a decimal number.
    NumberFormat,
    /// The date field does not match `dd-mm-yyyy`.
    DateParse,
    /// Missing fields, empty label or undecodable content.
    Generic,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::NumberFormat => "number format",
            ParseErrorKind::DateParse => "date parse",
            ParseErrorKind::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Reasons an amount field is rejected.
#[derive(Error, Debug)]
pub enum AmountError {
    /// Not of the form `[+-]digits[.digits]`
    #[error("'{0}' is not a dot-decimal number")]
    Syntax(String),

    /// Well-formed but beyond the supported magnitude or precision
    #[error("value out of range: {0}")]
    OutOfRange(#[from] rust_decimal::Error),
}

/// Reasons a single input line fails to parse.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Fewer fields than the record layout consumes
    #[error("missing field {index}: line has only {found} field(s)")]
    MissingField { index: usize, found: usize },

    /// The label field is empty
    #[error("label is empty")]
    EmptyLabel,

    /// The amount field is not a decimal number
    #[error("cannot parse amount from '{value}': {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: AmountError,
    },

    /// The date field does not match `dd-mm-yyyy`
    #[error("cannot parse date from '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The line could not be decoded at all
    #[error("malformed line: {message}")]
    Malformed { message: String },
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::InvalidAmount { .. } => ParseErrorKind::NumberFormat,
            ParseError::InvalidDate { .. } => ParseErrorKind::DateParse,
            ParseError::MissingField { .. }
            | ParseError::EmptyLabel
            | ParseError::Malformed { .. } => ParseErrorKind::Generic,
        }
    }
}

/// Failure while installing the diagnostic backend.
#[derive(Error, Debug)]
pub enum LogInitError {
    /// The log file could not be created
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A global logger was already installed
    #[error("logger already initialised: {0}")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}
