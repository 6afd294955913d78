//! Proleptic Julian calendar engine and the Orthodox Easter computus.
//!
//! Years are numbered arithmetically (year 0 precedes year 1), which keeps
//! conversions bijective over the whole supported span; the leap rule is a
//! plain division by four.

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};
use crate::gregorian::k_day_after;

/// Day before Gregorian 0001-01-01 in the Julian reckoning.
pub(crate) const JULIAN_EPOCH: i64 = -1;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

const MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const MIN_DAY: EpochDay = EpochDay::new(fixed_from_julian(MIN_YEAR as i64, 1, 1));
const MAX_DAY: EpochDay = EpochDay::new(fixed_from_julian(MAX_YEAR as i64, 12, 31));

pub(crate) const fn is_leap(year: i64) -> bool {
    year.rem_euclid(4) == 0
}

pub(crate) const fn fixed_from_julian(year: i64, month: u8, day: u8) -> i64 {
    let mut fixed = JULIAN_EPOCH - 1
        + 365 * (year - 1)
        + (year - 1).div_euclid(4)
        + MONTH_OFFSETS[(month - 1) as usize];
    if month > 2 && is_leap(year) {
        fixed += 1;
    }
    fixed + day as i64
}

pub(crate) fn julian_from_fixed(date: i64) -> (i64, u8, u8) {
    let approx = (4 * date + 1464).div_euclid(1461);
    let mut prior_days = date - fixed_from_julian(approx, 1, 1);
    if is_leap(approx) && date > fixed_from_julian(approx, 2, 28) {
        prior_days -= 1;
    }
    let year = if prior_days >= 365 { approx + 1 } else { approx };
    let prior_days = prior_days.rem_euclid(365);
    let mut month = 12u8;
    let mut i = 0;
    while i < 12 {
        let next = if i == 11 { 365 } else { MONTH_OFFSETS[i + 1] };
        if prior_days < next {
            month = (i + 1) as u8;
            break;
        }
        i += 1;
    }
    let day = (date - fixed_from_julian(year, month, 1) + 1) as u8;
    (year, month, day)
}

pub(crate) fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Proleptic Julian calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Julian;

impl CalendarEngine for Julian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "julian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        let len = days_in_month(year as i64, month);
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for julian {year}-{month:02}"
            )));
        }
        if leniency != Leniency::Lax && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::range(
                "year",
                year as i64,
                MIN_YEAR as i64,
                MAX_YEAR as i64,
            ));
        }
        Ok(EpochDay::new(fixed_from_julian(year as i64, month, day)))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = julian_from_fixed(day.get());
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("julian")?;
        Ok(is_leap(y as i64))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "julian calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("julian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(days_in_month(y as i64, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("julian")?;
        Ok(if is_leap(y as i64) { 366 } else { 365 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        MIN_DAY
    }

    fn max_epoch_day(&self) -> EpochDay {
        MAX_DAY
    }
}

/// Orthodox Easter Sunday of the given Julian/Gregorian year, as an epoch
/// day (convert to Gregorian fields for the familiar civil date).
pub fn orthodox_easter(year: i32) -> EpochDay {
    let shifted_epact = (14 + 11 * (year as i64).rem_euclid(19)).rem_euclid(30);
    let paschal_moon = EpochDay::new(fixed_from_julian(year as i64, 4, 19) - shifted_epact);
    k_day_after(0, paschal_moon)
}
