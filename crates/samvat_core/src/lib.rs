//! Shared substrate for the calendar workspace.
//!
//! This crate provides:
//! - [`EpochDay`] / [`Moment`] day-axis newtypes and [`Weekday`]
//! - Proleptic Gregorian field arithmetic (the anchor for every calendar)
//! - The common [`CalendarError`] type
//! - [`Leniency`] policy for field validation and era resolution

pub mod epoch;
pub mod error;
pub mod gregorian;
pub mod math;

pub use epoch::{ALL_WEEKDAYS, EpochDay, Moment, Weekday};
pub use error::CalendarError;

/// How strictly a calendar interprets input fields.
///
/// `Strict` rejects anything that is not the canonical spelling of a date.
/// `Smart` accepts unambiguous carry-overs, such as a year that continued
/// past an era transition. `Lax` only enforces structural bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Leniency {
    /// Canonical fields only.
    Strict,
    /// Resolve unambiguous non-canonical fields to the canonical date.
    #[default]
    Smart,
    /// Structural checks only.
    Lax,
}
