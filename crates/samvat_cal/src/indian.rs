//! Indian national (Saka) calendar engine.
//!
//! Chaitra 1 falls on Gregorian March 22, or March 21 in the leap years
//! it tracks; Chaitra has 31 days in those years. The year runs 78 behind
//! the Gregorian year containing most of it.

use samvat_core::{CalendarError, EpochDay, Leniency, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Days of the Gregorian year that precede Chaitra 1.
const DAY_OFFSET: i64 = 80;
/// Saka year + 78 = Gregorian year of that Saka new year.
const YEAR_OFFSET: i32 = 78;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

fn tracks_leap(saka_year: i32) -> bool {
    gregorian::is_leap_year(saka_year + YEAR_OFFSET)
}

fn month_days(saka_year: i32, month: u8) -> u8 {
    if month == 1 {
        if tracks_leap(saka_year) { 31 } else { 30 }
    } else if month <= 6 {
        31
    } else {
        30
    }
}

fn days_before_month(saka_year: i32, month: u8) -> i64 {
    let mut total = 0i64;
    for m in 1..month {
        total += month_days(saka_year, m) as i64;
    }
    total
}

fn year_days(saka_year: i32) -> i64 {
    if tracks_leap(saka_year) { 366 } else { 365 }
}

fn fixed_from_indian(year: i32, month: u8, day: u8) -> i64 {
    let iso_year = year + YEAR_OFFSET;
    let doy_iso = days_before_month(year, month) + day as i64 + DAY_OFFSET;
    let iso_len = gregorian::days_in_year(iso_year) as i64;
    if doy_iso > iso_len {
        gregorian::day_before_year(iso_year + 1) + (doy_iso - iso_len)
    } else {
        gregorian::day_before_year(iso_year) + doy_iso
    }
}

fn indian_from_fixed(date: i64) -> (i32, u8, u8) {
    let iso_year = gregorian::year_from_epoch_day(EpochDay::new(date)) as i32;
    let doy_iso = date - gregorian::day_before_year(iso_year);
    let (saka_year, mut doy_saka) = if doy_iso <= DAY_OFFSET {
        let saka_year = iso_year - YEAR_OFFSET - 1;
        (saka_year, doy_iso + year_days(saka_year) - DAY_OFFSET)
    } else {
        (iso_year - YEAR_OFFSET, doy_iso - DAY_OFFSET)
    };
    let mut month = 1u8;
    while doy_saka > month_days(saka_year, month) as i64 {
        doy_saka -= month_days(saka_year, month) as i64;
        month += 1;
    }
    (saka_year, month, doy_saka as u8)
}

/// Indian national calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Indian;

impl CalendarEngine for Indian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "indian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        let len = month_days(year, month);
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for saka {year}-{month:02}"
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
        Ok(EpochDay::new(fixed_from_indian(year, month, day)))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = indian_from_fixed(day.get());
        Ok(DateFields::Ymd {
            year,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("indian")?;
        Ok(tracks_leap(y))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "indian calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("indian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(month_days(y, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("indian")?;
        Ok(year_days(y) as u16)
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(fixed_from_indian(MIN_YEAR, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        EpochDay::new(fixed_from_indian(MAX_YEAR, 12, 30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_anchor() {
        assert_eq!(fixed_from_indian(1, 1, 1), 28_570);
    }

    #[test]
    fn new_year_boundaries() {
        // (gregorian, saka) pairs around Chaitra 1 and the year ends.
        let cases = [
            ((79, 3, 22), (1, 1, 1)),
            ((79, 3, 23), (1, 1, 2)),
            ((79, 3, 21), (0, 12, 30)),
            ((79, 3, 20), (0, 12, 29)),
            ((78, 3, 21), (-1, 12, 30)),
            ((1, 3, 22), (-77, 1, 1)),
            ((1, 3, 21), (-78, 12, 30)),
            ((1, 1, 1), (-78, 10, 11)),
            ((0, 3, 21), (-78, 1, 1)),
            ((0, 1, 1), (-79, 10, 11)),
            ((-1, 3, 21), (-80, 12, 30)),
        ];
        for ((gy, gm, gd), (sy, sm, sd)) in cases {
            let rd = gregorian::epoch_day_from_ymd(gy, gm, gd).get();
            assert_eq!(indian_from_fixed(rd), (sy, sm, sd), "from {gy}-{gm}-{gd}");
            assert_eq!(fixed_from_indian(sy, sm, sd), rd, "to {sy}-{sm}-{sd}");
        }
    }

    #[test]
    fn modern_roundtrips() {
        let engine = Indian;
        let cases = [
            ((1944, 6, 7), (2022, 8, 29)),
            ((1943, 6, 7), (2021, 8, 29)),
            ((1944, 11, 7), (2023, 1, 27)),
            ((1941, 11, 7), (2020, 1, 27)),
        ];
        for ((sy, sm, sd), (gy, gm, gd)) in cases {
            let rd = engine
                .to_epoch_day(&DateFields::ymd(sy, sm, sd), Leniency::Strict)
                .unwrap();
            assert_eq!(gregorian::ymd_from_epoch_day(rd), (gy as i64, gm, gd));
            assert_eq!(
                engine.from_epoch_day(rd).unwrap(),
                DateFields::ymd(sy, sm, sd)
            );
        }
    }

    #[test]
    fn chaitra_follows_the_tracked_leap() {
        let engine = Indian;
        // Saka 1944 + 78 = 2022, not a leap year.
        assert!(!engine.is_leap_year(&YearFields::Standard(1944)).unwrap());
        assert_eq!(
            engine
                .length_of_month(&YearFields::Standard(1944), 1, false)
                .unwrap(),
            30
        );
        // Saka 1942 + 78 = 2020, leap: Chaitra has 31 days.
        assert!(engine.is_leap_year(&YearFields::Standard(1942)).unwrap());
        assert_eq!(
            engine
                .length_of_month(&YearFields::Standard(1942), 1, false)
                .unwrap(),
            31
        );
        assert_eq!(
            engine.length_of_year(&YearFields::Standard(1942)).unwrap(),
            366
        );
    }
}
