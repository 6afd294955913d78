//! Arithmetic (tabular) Hijri calendar engines.
//!
//! Thirty-year leap cycle with eleven leap years; the four classical leap
//! patterns are selected by the intercalation constant `c` in
//! `(11 * year + c) mod 30 < 11`, and each pattern can sit on either the
//! civil (Friday) or astronomical (Thursday) epoch. Conversion is closed
//! form in both directions.

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Friday epoch: Julian 622-07-16.
pub(crate) const EPOCH_FRIDAY: i64 = 227_015;
/// Thursday epoch: Julian 622-07-15.
pub(crate) const EPOCH_THURSDAY: i64 = 227_014;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

/// Leap-year pattern over the 30-year cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeapFamily {
    /// Type II, the CLDR "civil" pattern (c = 14).
    West,
    /// Type I (c = 15): year 15 leaps instead of 16.
    East,
    /// Type III, Fatimid/Misri (c = 11).
    Fatimid,
    /// Type IV, Habash al-Hasib (c = 9).
    Habash,
}

impl LeapFamily {
    pub(crate) const fn intercalation(self) -> i64 {
        match self {
            Self::West => 14,
            Self::East => 15,
            Self::Fatimid => 11,
            Self::Habash => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::West => "west",
            Self::East => "east",
            Self::Fatimid => "fatimid",
            Self::Habash => "habash",
        }
    }
}

/// Epoch convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HijriEpoch {
    /// Friday, Julian 622-07-16.
    Civil,
    /// Thursday, Julian 622-07-15 (astronomical, "tbla").
    Astronomical,
}

impl HijriEpoch {
    const fn fixed(self) -> i64 {
        match self {
            Self::Civil => EPOCH_FRIDAY,
            Self::Astronomical => EPOCH_THURSDAY,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Civil => "civil",
            Self::Astronomical => "astro",
        }
    }
}

/// One arithmetic Hijri scheme: a leap family on an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticHijri {
    family: LeapFamily,
    epoch: HijriEpoch,
}

impl ArithmeticHijri {
    /// The CLDR `islamic-civil` scheme.
    pub const CIVIL: Self = Self::new(LeapFamily::West, HijriEpoch::Civil);
    /// The CLDR `islamic-tbla` scheme.
    pub const TBLA: Self = Self::new(LeapFamily::West, HijriEpoch::Astronomical);

    pub const fn new(family: LeapFamily, epoch: HijriEpoch) -> Self {
        Self { family, epoch }
    }

    pub fn family(&self) -> LeapFamily {
        self.family
    }

    fn c(&self) -> i64 {
        self.family.intercalation()
    }

    fn leap(&self, year: i64) -> bool {
        (11 * year + self.c()).rem_euclid(30) < 11
    }

    fn fixed_from_ymd(&self, year: i64, month: u8, day: u8) -> i64 {
        let r = self.c() - 11;
        let m = month as i64;
        (self.epoch.fixed() - 1)
            + 354 * (year - 1)
            + (r + 11 * year).div_euclid(30)
            + 29 * (m - 1)
            + m.div_euclid(2)
            + day as i64
    }

    fn ymd_from_fixed(&self, date: i64) -> (i64, u8, u8) {
        let r = self.c() - 11;
        let year = (30 * (date - self.epoch.fixed()) + 10_649 - r).div_euclid(10_631);
        let prior_days = date - self.fixed_from_ymd(year, 1, 1);
        let month = ((11 * prior_days + 330).div_euclid(325)) as u8;
        let day = (date - self.fixed_from_ymd(year, month, 1) + 1) as u8;
        (year, month, day)
    }

    fn month_len(&self, year: i64, month: u8) -> u8 {
        if month % 2 == 1 || (month == 12 && self.leap(year)) {
            30
        } else {
            29
        }
    }
}

impl CalendarEngine for ArithmeticHijri {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "hijri")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        let len = self.month_len(year as i64, month);
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for hijri {year}-{month:02}"
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
        Ok(EpochDay::new(self.fixed_from_ymd(year as i64, month, day)))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = self.ymd_from_fixed(day.get());
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("hijri")?;
        Ok(self.leap(y as i64))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "hijri calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("hijri")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(self.month_len(y as i64, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("hijri")?;
        Ok(if self.leap(y as i64) { 355 } else { 354 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(self.fixed_from_ymd(MIN_YEAR as i64, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        EpochDay::new(self.fixed_from_ymd(MAX_YEAR as i64, 12, 30))
    }
}
