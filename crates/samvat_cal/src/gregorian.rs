//! Proleptic Gregorian calendar engine and the Gregorian Easter computus.

use samvat_core::{CalendarError, EpochDay, Leniency, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Supported year span. Wide enough for every historical use while keeping
/// the epoch-day math far from `i64` overflow.
pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

const MIN_DAY: EpochDay = gregorian::epoch_day_from_ymd(MIN_YEAR, 1, 1);
const MAX_DAY: EpochDay = gregorian::epoch_day_from_ymd(MAX_YEAR, 12, 31);

/// Proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

pub(crate) fn check_year(year: i32, leniency: Leniency) -> Result<(), CalendarError> {
    if leniency != Leniency::Lax && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::range(
            "year",
            year as i64,
            MIN_YEAR as i64,
            MAX_YEAR as i64,
        ));
    }
    Ok(())
}

pub(crate) fn check_month_day(year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
    if month < 1 || month > 12 {
        return Err(CalendarError::InvalidDate(format!(
            "month {month} not in 1..=12"
        )));
    }
    let len = gregorian::days_in_month(year, month);
    if day < 1 || day > len {
        return Err(CalendarError::InvalidDate(format!(
            "day {day} not in 1..={len} for {year}-{month:02}"
        )));
    }
    Ok(())
}

impl CalendarEngine for Gregorian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "gregorian")?;
        check_month_day(year, month, day)?;
        check_year(year, leniency)?;
        Ok(gregorian::epoch_day_from_ymd(year, month, day))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = gregorian::ymd_from_epoch_day(day);
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("gregorian")?;
        Ok(gregorian::is_leap_year(y))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "gregorian calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("gregorian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(gregorian::days_in_month(y, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("gregorian")?;
        Ok(gregorian::days_in_year(y))
    }

    fn min_epoch_day(&self) -> EpochDay {
        MIN_DAY
    }

    fn max_epoch_day(&self) -> EpochDay {
        MAX_DAY
    }
}

/// First day on or after `day` falling on weekday `k` (0 = Sunday),
/// excluding `day` itself.
pub(crate) fn k_day_after(k: i64, day: EpochDay) -> EpochDay {
    let start = day + 1;
    start + (k - start.get()).rem_euclid(7)
}

/// Gregorian Easter Sunday of the given year.
///
/// Epact form of the computus: the paschal moon is April 19 pulled back by
/// the (adjusted) shifted epact, and Easter is the following Sunday.
pub fn easter(year: i32) -> EpochDay {
    let y = year as i64;
    let century = y.div_euclid(100) + 1;
    let shifted = (14 + 11 * y.rem_euclid(19) - (3 * century).div_euclid(4)
        + (5 + 8 * century).div_euclid(25))
    .rem_euclid(30);
    let epact = if shifted == 0 || (shifted == 1 && 10 < y.rem_euclid(19)) {
        shifted + 1
    } else {
        shifted
    };
    let paschal_moon = gregorian::epoch_day_from_ymd(year, 4, 19) - epact;
    k_day_after(0, paschal_moon)
}
