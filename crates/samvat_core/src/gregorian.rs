//! Proleptic Gregorian day arithmetic.
//!
//! Closed-form conversions between (year, month, day) triples and
//! [`EpochDay`] numbers. Every other calendar in the workspace is anchored
//! through these functions, so they are kept allocation-free and `const`
//! where possible.

use crate::epoch::EpochDay;

/// Days in 4 Gregorian years (one short leap cycle).
const DAYS_IN_4_YEARS: i64 = 365 * 4 + 1;
/// Days in 100 Gregorian years.
const DAYS_IN_100_YEARS: i64 = 25 * DAYS_IN_4_YEARS - 1;
/// Days in the full 400-year Gregorian cycle.
const DAYS_IN_400_YEARS: i64 = 4 * DAYS_IN_100_YEARS + 1;

/// True if `year` is a Gregorian leap year.
///
/// Checks divisibility by 25 first so the common case needs a single
/// modulus: years not divisible by 25 are leap iff divisible by 4, and
/// the remaining multiples of 25 are leap iff divisible by 16.
pub const fn is_leap_year(year: i32) -> bool {
    if year % 25 != 0 {
        year % 4 == 0
    } else {
        year % 16 == 0
    }
}

/// Number of days in the given month (1-12) of the given year.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// 365 or 366.
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The day before 1 January of `year`, as a raw day number.
pub const fn day_before_year(year: i32) -> i64 {
    let prev = year as i64 - 1;
    365 * prev + prev.div_euclid(4) - prev.div_euclid(100) + prev.div_euclid(400)
}

/// Days in `year` strictly before the first of `month`.
///
/// For March onward the count follows the shifted-month closed form
/// `(979 * m - 2919) >> 5`, which reproduces the 30.6-day month rhythm
/// without a lookup table.
pub const fn days_before_month(year: i32, month: u8) -> u16 {
    if month < 3 {
        if month == 1 { 0 } else { 31 }
    } else {
        let leap = is_leap_year(year) as u16;
        31 + 28 + leap + ((979 * month as u16 - 2919) >> 5)
    }
}

/// Epoch day of a (year, month, day) triple. Fields are not validated.
pub const fn epoch_day_from_ymd(year: i32, month: u8, day: u8) -> EpochDay {
    EpochDay::new(day_before_year(year) + days_before_month(year, month) as i64 + day as i64)
}

/// Gregorian year containing the given epoch day.
pub const fn year_from_epoch_day(date: EpochDay) -> i64 {
    let date = date.get() - 1;
    let n_400 = date.div_euclid(DAYS_IN_400_YEARS);
    let date = date.rem_euclid(DAYS_IN_400_YEARS);
    let n_100 = date / DAYS_IN_100_YEARS;
    let date = date % DAYS_IN_100_YEARS;
    let n_4 = date / DAYS_IN_4_YEARS;
    let date = date % DAYS_IN_4_YEARS;
    let n_1 = date / 365;
    // The cycle ends (n_100 == 4 or n_1 == 4) belong to the final year of
    // the cycle, not the first year of the next one.
    400 * n_400 + 100 * n_100 + 4 * n_4 + n_1 + (n_100 != 4 && n_1 != 4) as i64
}

/// Split a 1-based day of year into (month, day).
pub const fn month_day_from_year_day(year: i32, day_of_year: u16) -> (u8, u8) {
    let feb_end = 31 + 28 + is_leap_year(year) as u16;
    let correction: i32 = if day_of_year < feb_end {
        -1
    } else {
        !is_leap_year(year) as i32
    };
    let month = ((12 * (day_of_year as i32 + correction) + 373) / 367) as u8;
    let day = (day_of_year - days_before_month(year, month)) as u8;
    (month, day)
}

/// Break an epoch day into its Gregorian (year, month, day).
///
/// Returns the year as i64; callers needing i32 years bound-check first.
pub const fn ymd_from_epoch_day(date: EpochDay) -> (i64, u8, u8) {
    let year = year_from_epoch_day(date);
    // day_before_year on i64 year: reuse the i32 form through widening is
    // not possible in const, so inline the same expression.
    let prev = year - 1;
    let before = 365 * prev + prev.div_euclid(4) - prev.div_euclid(100) + prev.div_euclid(400);
    let day_of_year = (date.get() - before) as u16;
    // month_day_from_year_day only consults the leap flag, which is
    // periodic in 400 years, so the i64->i32 fold below is exact.
    let folded = year.rem_euclid(400) as i32;
    let (month, day) = month_day_from_year_day(folded, day_of_year);
    (year, month, day)
}
