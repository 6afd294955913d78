//! Hebrew calendar engine: Metonic 19-year cycle, molad arithmetic, and
//! the four new-year postponements, months numbered civilly (Tishri = 1).
//!
//! The postponements are folded into the elapsed-days form: the parts
//! threshold plus the `lo adu rosh` weekday shift live in
//! [`elapsed_days`], and the two deferred cases surface as the year
//! length correction (356-day and 382-day impossibilities).

use samvat_core::{CalendarError, EpochDay, Leniency, Moment, math};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Tishri 1 of year 1, Julian -3761-10-07 (the epoch of the era of the
/// world, one year before the BaHaRaD molad's year).
pub(crate) const HEBREW_EPOCH: i64 = -1_373_427;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 1_000_000;

/// Days from the epoch to the (postponement-shifted) Tishri 1 of `year`,
/// before the year-length correction.
fn elapsed_days(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12_084 + 13_753 * months;
    let days = 29 * months + parts.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

/// Extra postponement keeping year lengths out of the impossible 356 and
/// 382 day shapes.
fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

/// Epoch day of Tishri 1.
pub(crate) fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_length_correction(year)
}

pub(crate) fn is_leap(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

fn months_in_year(year: i64) -> u8 {
    if is_leap(year) { 13 } else { 12 }
}

fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

/// Days in a civil month. Heshvan (2) is long only in complete years,
/// Kislev (3) short only in deficient ones; in leap years Adar I is the
/// 30-day month 6 and Adar II the 29-day month 7.
fn month_length(year: i64, civil_month: u8) -> u8 {
    let ylen = days_in_year(year);
    match civil_month {
        1 | 5 => 30,
        2 => {
            if ylen == 355 || ylen == 385 {
                30
            } else {
                29
            }
        }
        3 => {
            if ylen == 353 || ylen == 383 {
                29
            } else {
                30
            }
        }
        4 => 29,
        m => {
            if is_leap(year) {
                // 6: Adar I, 7: Adar II, then Nisan onward alternating.
                if m == 6 { 30 } else if m % 2 == 0 { 30 } else { 29 }
            } else if m % 2 == 1 {
                30
            } else {
                29
            }
        }
    }
}

/// Biblical month number (Nisan = 1, Tishri = 7) for a civil one.
fn biblical_from_civil(year: i64, civil_month: u8) -> u8 {
    if is_leap(year) {
        match civil_month {
            1..=6 => civil_month + 6,
            7 => 13,
            m => m - 7,
        }
    } else if civil_month <= 6 {
        civil_month + 6
    } else {
        civil_month - 6
    }
}

/// Moment of the mean conjunction (molad) opening the given civil month.
///
/// The origin is the BaHaRaD molad: year 1, day 2, 5 hours 204 parts.
pub fn molad(year: i32, civil_month: u8) -> Result<Moment, CalendarError> {
    let y = year as i64;
    if year < MIN_YEAR || year > MAX_YEAR {
        return Err(CalendarError::range(
            "year",
            y,
            MIN_YEAR as i64,
            MAX_YEAR as i64,
        ));
    }
    if civil_month < 1 || civil_month > months_in_year(y) {
        return Err(CalendarError::InvalidDate(format!(
            "month {civil_month} not in 1..={} for hebrew year {year}",
            months_in_year(y)
        )));
    }
    let biblical = biblical_from_civil(y, civil_month) as i64;
    let molad_year = if biblical < 7 { y + 1 } else { y };
    let elapsed = (biblical - 7) + (235 * molad_year - 234).div_euclid(19);
    Ok(Moment::new(
        HEBREW_EPOCH as f64 - 876.0 / 25_920.0
            + elapsed as f64 * (29.5 + 793.0 / 25_920.0),
    ))
}

/// Hebrew calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hebrew;

impl Hebrew {
    fn checked_year(&self, year: i32, leniency: Leniency) -> Result<i64, CalendarError> {
        if leniency != Leniency::Lax && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::range(
                "year",
                year as i64,
                MIN_YEAR as i64,
                MAX_YEAR as i64,
            ));
        }
        Ok(year as i64)
    }
}

impl CalendarEngine for Hebrew {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "hebrew")?;
        let y = self.checked_year(year, leniency)?;
        if month < 1 || month > months_in_year(y) {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..={} for hebrew year {year}",
                months_in_year(y)
            )));
        }
        let len = month_length(y, month);
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for hebrew {year}-{month:02}"
            )));
        }
        let mut fixed = new_year(y) + day as i64 - 1;
        for m in 1..month {
            fixed += month_length(y, m) as i64;
        }
        Ok(EpochDay::new(fixed))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let date = day.get();
        let approx = 1 + (98_496 * (date - HEBREW_EPOCH)).div_euclid(35_975_351);
        let year = math::final_value(approx - 1, |y| new_year(y) <= date);
        let mut remaining = date - new_year(year);
        let mut month = 1u8;
        while remaining >= month_length(year, month) as i64 {
            remaining -= month_length(year, month) as i64;
            month += 1;
        }
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: (remaining + 1) as u8,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("hebrew")?;
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
                "hebrew leap months carry their own civil numbers".to_string(),
            ));
        }
        let y = year.standard("hebrew")?;
        let y64 = y as i64;
        if month < 1 || month > months_in_year(y64) {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..={} for hebrew year {y}",
                months_in_year(y64)
            )));
        }
        Ok(month_length(y64, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("hebrew")?;
        Ok(days_in_year(y as i64) as u16)
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(new_year(MIN_YEAR as i64))
    }

    fn max_epoch_day(&self) -> EpochDay {
        EpochDay::new(new_year(MAX_YEAR as i64 + 1) - 1)
    }
}
