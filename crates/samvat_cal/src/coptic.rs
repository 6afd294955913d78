//! Coptic calendar engine: twelve 30-day months plus a 5- or 6-day
//! epagomenal thirteenth month, leap every fourth year (year mod 4 == 3).

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Coptic 0001-01-01, Julian 284-08-29 (era of Diocletian).
pub(crate) const COPTIC_EPOCH: i64 = 103_605;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

pub(crate) const fn is_leap(year: i64) -> bool {
    year.rem_euclid(4) == 3
}

/// Fixed day for a date counted from `epoch` with the Coptic month scheme.
/// Shared with the Ethiopian engine, which uses a shifted epoch.
pub(crate) const fn fixed_from_epoch(epoch: i64, year: i64, month: u8, day: u8) -> i64 {
    epoch - 1 + 365 * (year - 1) + year.div_euclid(4) + 30 * (month as i64 - 1) + day as i64
}

pub(crate) fn ymd_from_epoch(epoch: i64, date: i64) -> (i64, u8, u8) {
    let year = (4 * (date - epoch) + 1463).div_euclid(1461);
    let month = ((date - fixed_from_epoch(epoch, year, 1, 1)).div_euclid(30) + 1) as u8;
    let day = (date - fixed_from_epoch(epoch, year, month, 1) + 1) as u8;
    (year, month, day)
}

pub(crate) fn days_in_month(year: i64, month: u8) -> u8 {
    if month < 13 {
        30
    } else if is_leap(year) {
        6
    } else {
        5
    }
}

pub(crate) fn check_month_day(year: i64, month: u8, day: u8) -> Result<(), CalendarError> {
    if month < 1 || month > 13 {
        return Err(CalendarError::InvalidDate(format!(
            "month {month} not in 1..=13"
        )));
    }
    let len = days_in_month(year, month);
    if day < 1 || day > len {
        return Err(CalendarError::InvalidDate(format!(
            "day {day} not in 1..={len} for month {month} of year {year}"
        )));
    }
    Ok(())
}

/// Coptic calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coptic;

impl CalendarEngine for Coptic {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "coptic")?;
        check_month_day(year as i64, month, day)?;
        if leniency != Leniency::Lax && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::range(
                "year",
                year as i64,
                MIN_YEAR as i64,
                MAX_YEAR as i64,
            ));
        }
        Ok(EpochDay::new(fixed_from_epoch(
            COPTIC_EPOCH,
            year as i64,
            month,
            day,
        )))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = ymd_from_epoch(COPTIC_EPOCH, day.get());
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("coptic")?;
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
                "coptic calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("coptic")?;
        if month < 1 || month > 13 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=13"
            )));
        }
        Ok(days_in_month(y as i64, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("coptic")?;
        Ok(if is_leap(y as i64) { 366 } else { 365 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(fixed_from_epoch(COPTIC_EPOCH, MIN_YEAR as i64, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        EpochDay::new(fixed_from_epoch(
            COPTIC_EPOCH,
            MAX_YEAR as i64,
            13,
            days_in_month(MAX_YEAR as i64, 13),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_anchor() {
        assert_eq!(fixed_from_epoch(COPTIC_EPOCH, 1, 1, 1), 103_605);
        assert_eq!(ymd_from_epoch(COPTIC_EPOCH, 103_605), (1, 1, 1));
    }

    #[test]
    fn epagomenal_month_rolls_into_the_new_year() {
        let engine = Coptic;
        let last = DateFields::ymd(1723, 13, 6);
        let rd = engine.to_epoch_day(&last, Leniency::Strict).unwrap();
        assert_eq!(rd.get(), 732_930);
        assert_eq!(
            engine.from_epoch_day(rd + 1).unwrap(),
            DateFields::ymd(1724, 1, 1)
        );
        // 1723 mod 4 == 3, so the sixth epagomenal day exists; 1724 has five.
        assert!(engine
            .to_epoch_day(&DateFields::ymd(1724, 13, 6), Leniency::Strict)
            .is_err());
    }

    #[test]
    fn new_year_against_gregorian() {
        use samvat_core::gregorian;
        let engine = Coptic;
        let rd = engine
            .to_epoch_day(&DateFields::ymd(1740, 1, 1), Leniency::Strict)
            .unwrap();
        assert_eq!(gregorian::ymd_from_epoch_day(rd), (2023, 9, 12));
        let rd = engine
            .to_epoch_day(&DateFields::ymd(1741, 1, 1), Leniency::Strict)
            .unwrap();
        assert_eq!(gregorian::ymd_from_epoch_day(rd), (2024, 9, 11));
    }

    #[test]
    fn lengths() {
        let engine = Coptic;
        let leap = YearFields::Standard(3);
        let plain = YearFields::Standard(4);
        assert!(engine.is_leap_year(&leap).unwrap());
        assert!(!engine.is_leap_year(&plain).unwrap());
        assert_eq!(engine.length_of_month(&leap, 13, false).unwrap(), 6);
        assert_eq!(engine.length_of_month(&plain, 13, false).unwrap(), 5);
        assert_eq!(engine.length_of_month(&plain, 7, false).unwrap(), 30);
        assert_eq!(engine.length_of_year(&leap).unwrap(), 366);
        assert!(engine.length_of_month(&plain, 14, false).is_err());
    }
}
