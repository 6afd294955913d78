//! Error types shared by all calendar conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from date conversion, variant lookup, or packaged-data parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalendarError {
    /// A field value is outside its supported bounds. Never silently clamped.
    Range {
        /// Name of the out-of-range field ("year", "month", "day", ...).
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },
    /// Fields are individually in range but do not name a real date.
    InvalidDate(String),
    /// Variant registry lookup or registration failed for the named key.
    VariantNotFound(String),
    /// An internal invariant failed. Not recoverable by retrying.
    Internal(&'static str),
    /// I/O error while loading packaged data.
    Io(String),
    /// Packaged-data file parsing failed.
    Parse(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "{field} {value} out of range {min}..={max}")
            }
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::VariantNotFound(msg) => write!(f, "variant registry: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for CalendarError {}

impl From<std::io::Error> for CalendarError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl CalendarError {
    /// Shorthand constructor for [`CalendarError::Range`].
    pub fn range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::Range {
            field,
            value,
            min,
            max,
        }
    }
}
