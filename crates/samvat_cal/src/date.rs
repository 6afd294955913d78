//! Calendar date fields and the engine interface.
//!
//! - [`DateFields`]: the field shapes a calendar can present (plain
//!   year/month/day, era-tagged, or cycle-tagged lunisolar)
//! - [`YearFields`]: the year part alone, for length and leap queries
//! - [`CalendarEngine`]: conversion between fields and epoch days
//! - [`CalendarDate`]: a validated date bound to a named variant

use samvat_core::{CalendarError, EpochDay, Leniency, Weekday};

/// Date fields as presented by a calendar variant.
///
/// Each variant of the enum is one field shape. An engine documents which
/// shape(s) it accepts and which shape it produces; handing an engine a
/// shape it does not understand yields [`CalendarError::InvalidDate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateFields {
    /// Plain year/month/day, used by solar and arithmetic lunar calendars.
    Ymd { year: i32, month: u8, day: u8 },
    /// Year/month/day tagged with an era name, used by era-mapped variants.
    EraYmd {
        era: String,
        year: i32,
        month: u8,
        day: u8,
    },
    /// Cycle/year-of-cycle/month/day for sexagesimal lunisolar calendars.
    ///
    /// `month` is the month number (1..=12); `leap_month` distinguishes a
    /// leap month from the regular month with the same number.
    CycleYmd {
        cycle: i32,
        year: u8,
        month: u8,
        leap_month: bool,
        day: u8,
    },
}

impl DateFields {
    /// Convenience constructor for the plain shape.
    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self::Ymd { year, month, day }
    }

    /// Convenience constructor for the era-tagged shape.
    pub fn era_ymd(era: &str, year: i32, month: u8, day: u8) -> Self {
        Self::EraYmd {
            era: era.to_string(),
            year,
            month,
            day,
        }
    }

    /// The year part of the fields, for length and leap queries.
    pub fn year_fields(&self) -> YearFields {
        match self {
            Self::Ymd { year, .. } => YearFields::Standard(*year),
            Self::EraYmd { era, year, .. } => YearFields::Era {
                era: era.clone(),
                year: *year,
            },
            Self::CycleYmd { cycle, year, .. } => YearFields::Cycle {
                cycle: *cycle,
                year: *year,
            },
        }
    }

    /// Month number, regardless of shape.
    pub fn month(&self) -> u8 {
        match self {
            Self::Ymd { month, .. }
            | Self::EraYmd { month, .. }
            | Self::CycleYmd { month, .. } => *month,
        }
    }

    /// Day of month, regardless of shape.
    pub fn day(&self) -> u8 {
        match self {
            Self::Ymd { day, .. } | Self::EraYmd { day, .. } | Self::CycleYmd { day, .. } => *day,
        }
    }

    /// Whether the fields name a leap month. Always `false` for shapes
    /// without a leap flag.
    pub fn is_leap_month(&self) -> bool {
        match self {
            Self::CycleYmd { leap_month, .. } => *leap_month,
            _ => false,
        }
    }
}

/// The year part of [`DateFields`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YearFields {
    /// A plain calendar year.
    Standard(i32),
    /// A year within a named era.
    Era { era: String, year: i32 },
    /// A year within a numbered sexagesimal cycle.
    Cycle { cycle: i32, year: u8 },
}

impl YearFields {
    /// Year of an expected `Standard` shape, or an invalid-date error
    /// naming the engine that rejected it.
    pub(crate) fn standard(&self, engine: &str) -> Result<i32, CalendarError> {
        match self {
            Self::Standard(y) => Ok(*y),
            _ => Err(CalendarError::InvalidDate(format!(
                "{engine} calendar takes a plain year, got {self:?}"
            ))),
        }
    }

    /// Cycle and year-of-cycle of an expected `Cycle` shape.
    pub(crate) fn cyclic(&self, engine: &str) -> Result<(i32, u8), CalendarError> {
        match self {
            Self::Cycle { cycle, year } => Ok((*cycle, *year)),
            _ => Err(CalendarError::InvalidDate(format!(
                "{engine} calendar takes a cycle/year pair, got {self:?}"
            ))),
        }
    }
}

/// A calendar system bound to one concrete variant configuration.
///
/// Implementations are pure conversions: the same inputs always produce
/// the same outputs, and no engine mutates shared state (caches behind
/// locks excepted). All epoch-day results are bounded by
/// [`min_epoch_day`](Self::min_epoch_day) and
/// [`max_epoch_day`](Self::max_epoch_day); inputs resolving outside the
/// bound yield [`CalendarError::Range`].
pub trait CalendarEngine: Send + Sync {
    /// Resolve date fields to an epoch day.
    ///
    /// `leniency` governs how much normalization is applied; engines
    /// without any lenient interpretation treat all three modes alike.
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError>;

    /// Compute the date fields for an epoch day.
    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError>;

    /// Whether the year is a leap year in this calendar's sense
    /// (an intercalary day for solar calendars, a leap month for
    /// lunisolar ones).
    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError>;

    /// Number of days in a month of the given year.
    ///
    /// `leap_month` selects the leap month with that number where the
    /// calendar has leap months; it must be `false` elsewhere.
    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError>;

    /// Number of days in the given year.
    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError>;

    /// Smallest epoch day this engine covers.
    fn min_epoch_day(&self) -> EpochDay;

    /// Largest epoch day this engine covers.
    fn max_epoch_day(&self) -> EpochDay;
}

/// Destructure the plain year/month/day shape, or report which engine
/// rejected a mismatched shape.
pub(crate) fn plain_ymd(
    fields: &DateFields,
    engine: &str,
) -> Result<(i32, u8, u8), CalendarError> {
    match fields {
        DateFields::Ymd { year, month, day } => Ok((*year, *month, *day)),
        _ => Err(CalendarError::InvalidDate(format!(
            "{engine} calendar takes plain year/month/day fields, got {fields:?}"
        ))),
    }
}

/// Shared bound check for engine epoch-day results.
pub(crate) fn check_bounds(
    engine: &dyn CalendarEngine,
    day: EpochDay,
) -> Result<EpochDay, CalendarError> {
    let (min, max) = (engine.min_epoch_day(), engine.max_epoch_day());
    if day < min || day > max {
        return Err(CalendarError::range(
            "epoch day",
            day.get(),
            min.get(),
            max.get(),
        ));
    }
    Ok(day)
}

/// A date resolved against a named calendar variant.
///
/// The fields are the canonical fields the variant's engine produced or
/// validated; construction goes through
/// [`VariantRegistry`](crate::registry::VariantRegistry), so a value of
/// this type is always internally consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDate {
    variant: String,
    fields: DateFields,
    epoch_day: EpochDay,
}

impl CalendarDate {
    pub(crate) fn new(variant: String, fields: DateFields, epoch_day: EpochDay) -> Self {
        Self {
            variant,
            fields,
            epoch_day,
        }
    }

    /// Name of the variant this date belongs to, including any
    /// adjustment suffix it was resolved with.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// The date fields in the variant's canonical shape.
    pub fn fields(&self) -> &DateFields {
        &self.fields
    }

    /// The epoch day this date corresponds to.
    pub fn epoch_day(&self) -> EpochDay {
        self.epoch_day
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.epoch_day.weekday()
    }
}
