//! Calendar engines and the variant registry.
//!
//! This crate provides:
//! - [`CalendarEngine`] implementations for the Gregorian, Julian,
//!   historic-cutover, Coptic, Ethiopian, Hebrew, Hijri (arithmetic and
//!   Umm-al-Qura), Persian, Indian, Thai, Minguo, Juche, East Asian
//!   lunisolar, and Japanese-era calendars
//! - [`VariantRegistry`]: named variants, day-adjustment suffixes, and
//!   [`CalendarDate`] construction and conversion
//! - Packaged Umm-al-Qura and Nengo tables, reloadable from caller files
//!
//! # Quick start
//!
//! ```rust
//! use samvat_cal::{DateFields, Leniency, VariantRegistry};
//!
//! let registry = VariantRegistry::with_defaults().unwrap();
//! let date = registry
//!     .date_from_fields("gregorian", DateFields::ymd(2025, 8, 25), Leniency::Smart)
//!     .unwrap();
//! let julian = registry.convert(&date, "julian").unwrap();
//! assert_eq!(julian.fields(), &DateFields::ymd(2025, 8, 12));
//! ```

pub mod coptic;
pub mod date;
pub mod era;
pub mod ethiopian;
pub mod gregorian;
pub mod hebrew;
pub mod hijri;
pub mod historic;
pub mod indian;
pub mod julian;
pub mod lunisolar;
pub mod offset;
pub mod persian;
pub mod registry;
pub mod sexagenary;
pub mod umalqura;

pub use date::{CalendarDate, CalendarEngine, DateFields, YearFields};
pub use registry::{MAX_ADJUSTMENT, VariantRegistry};

// Engine types the registry cannot cover: table overrides and cycle naming.
pub use era::{EraGregorian, EraTransitionTable};
pub use lunisolar::{Lunisolar, LunisolarMonthTable};
pub use sexagenary::cycle_year_name;
pub use umalqura::{Umalqura, UmalquraTable};

// Re-export the shared substrate so callers don't need samvat_core directly.
pub use samvat_core::{CalendarError, EpochDay, Leniency, Moment, Weekday};
