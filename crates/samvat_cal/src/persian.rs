//! Persian (Solar Hijri) calendar engine with three interchangeable
//! algorithms:
//!
//! - fast arithmetic: 33-year cycle corrected by a fixed table of
//!   exception years, the scheme civil software ships today
//! - Birashk: the 2820-year cycle, kept for comparison; its new year
//!   drifts from the other two starting in 1404 AP
//! - astronomical: the spring equinox relative to Tehran midday, the
//!   defining rule the arithmetic schemes approximate
//!
//! All three agree over 1304..=1500 AP, the span the fast table was
//! fitted to.

use samvat_core::{CalendarError, EpochDay, Leniency, Moment, math};
use samvat_astro::{
    MEAN_TROPICAL_YEAR, SPRING, estimate_prior_solar_longitude, julian_centuries, solar_longitude,
};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Nowruz of 1 AP, Julian 622-03-19.
pub(crate) const PERSIAN_EPOCH: i64 = 226_896;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 3000;

/// Years whose leap status the plain 33-year cycle gets wrong.
const NON_LEAP_CORRECTION: [i32; 78] = [
    1502, 1601, 1634, 1667, 1700, 1733, 1766, 1799, 1832, 1865, 1898, 1931, 1964, 1997, 2030,
    2059, 2063, 2096, 2129, 2158, 2162, 2191, 2195, 2224, 2228, 2257, 2261, 2290, 2294, 2323,
    2327, 2356, 2360, 2389, 2393, 2422, 2426, 2455, 2459, 2488, 2492, 2521, 2525, 2554, 2558,
    2587, 2591, 2620, 2624, 2653, 2657, 2686, 2690, 2719, 2723, 2748, 2752, 2756, 2781, 2785,
    2789, 2818, 2822, 2847, 2851, 2855, 2880, 2884, 2888, 2913, 2917, 2921, 2946, 2950, 2954,
    2979, 2983, 2987,
];

fn in_correction_table(year: i64) -> bool {
    i32::try_from(year)
        .map(|y| NON_LEAP_CORRECTION.binary_search(&y).is_ok())
        .unwrap_or(false)
}

/// Days before month `m`: six 31-day months, five 30-day months, Esfand.
fn month_offset(month: u8) -> i64 {
    let m = month as i64;
    if month <= 7 { 31 * (m - 1) } else { 30 * (m - 1) + 6 }
}

fn month_from_day_of_year(doy: i64) -> u8 {
    if doy <= 186 {
        (doy + 30).div_euclid(31) as u8
    } else {
        (doy + 23).div_euclid(30) as u8
    }
}

// ---------------------------------------------------------------------------
// Fast arithmetic scheme
// ---------------------------------------------------------------------------

fn fast_new_year(year: i64) -> i64 {
    let mut ny = PERSIAN_EPOCH - 1 + 365 * (year - 1) + (8 * year + 21).div_euclid(33);
    if in_correction_table(year - 1) {
        ny -= 1;
    }
    ny
}

fn fast_fixed(year: i64, month: u8, day: u8) -> i64 {
    fast_new_year(year) - 1 + month_offset(month) + day as i64
}

fn fast_is_leap(year: i64) -> bool {
    if in_correction_table(year) {
        false
    } else if in_correction_table(year - 1) {
        true
    } else {
        (25 * year + 11).rem_euclid(33) < 8
    }
}

fn fast_from_fixed(date: i64) -> (i64, u8, u8) {
    let mut year = 1 + (33 * (date - PERSIAN_EPOCH + 1) + 3).div_euclid(12_053);
    let mut doy = date - fast_fixed(year, 1, 1) + 1;
    if doy == 366 && in_correction_table(year) {
        year += 1;
        doy = 1;
    }
    let month = month_from_day_of_year(doy);
    let day = (date - fast_fixed(year, month, 1) + 1) as u8;
    (year, month, day)
}

// ---------------------------------------------------------------------------
// Birashk 2820-year cycle
// ---------------------------------------------------------------------------

fn birashk_offset_year(year: i64) -> i64 {
    if year > 0 { year - 474 } else { year - 473 }
}

fn birashk_fixed(year: i64, month: u8, day: u8) -> i64 {
    let y = birashk_offset_year(year);
    let yr = y.rem_euclid(2820) + 474;
    PERSIAN_EPOCH - 1
        + 1_029_983 * y.div_euclid(2820)
        + 365 * (yr - 1)
        + (31 * yr - 5).div_euclid(128)
        + month_offset(month)
        + day as i64
}

fn birashk_is_leap(year: i64) -> bool {
    let yr = birashk_offset_year(year).rem_euclid(2820) + 474;
    ((yr + 38) * 31).rem_euclid(128) < 31
}

fn birashk_from_fixed(date: i64) -> (i64, u8, u8) {
    let d0 = date - birashk_fixed(475, 1, 1);
    let n2820 = d0.div_euclid(1_029_983);
    let d1 = d0.rem_euclid(1_029_983);
    let y2820 = if d1 == 1_029_982 {
        2820
    } else {
        (128 * d1 + 46_878).div_euclid(46_751)
    };
    let mut year = 474 + 2820 * n2820 + y2820;
    if year <= 0 {
        year -= 1;
    }
    let doy = date - birashk_fixed(year, 1, 1) + 1;
    let month = month_from_day_of_year(doy);
    let day = (date - birashk_fixed(year, month, 1) + 1) as u8;
    (year, month, day)
}

// ---------------------------------------------------------------------------
// Astronomical scheme
// ---------------------------------------------------------------------------

/// Universal moment of clock noon in Tehran (UTC+3:30) on the given day.
fn tehran_noon(day: i64) -> Moment {
    Moment::new(day as f64 + 0.5 - 3.5 / 24.0)
}

/// Epoch day of the last Nowruz on or before `day`: the day whose Tehran
/// midday falls on or just after the spring equinox.
fn astro_new_year_on_or_before(day: i64) -> i64 {
    let approx = estimate_prior_solar_longitude(SPRING, tehran_noon(day));
    math::next_value(approx.get().floor() as i64 - 1, |d| {
        solar_longitude(julian_centuries(tehran_noon(d))) <= SPRING + 2.0
    })
}

fn astro_fixed(year: i64, month: u8, day: u8) -> i64 {
    let offset_years = if year > 0 { year - 1 } else { year };
    let midyear = PERSIAN_EPOCH as f64 + 180.0 + (MEAN_TROPICAL_YEAR * offset_years as f64).floor();
    let new_year = astro_new_year_on_or_before(midyear as i64);
    new_year - 1 + month_offset(month) + day as i64
}

fn astro_from_fixed(date: i64) -> (i64, u8, u8) {
    let new_year = astro_new_year_on_or_before(date);
    let y = ((new_year - PERSIAN_EPOCH) as f64 / MEAN_TROPICAL_YEAR).round() as i64 + 1;
    let year = if y > 0 { y } else { y - 1 };
    let doy = date - astro_fixed(year, 1, 1) + 1;
    let month = month_from_day_of_year(doy);
    let day = (date - astro_fixed(year, month, 1) + 1) as u8;
    (year, month, day)
}

fn astro_is_leap(year: i64) -> bool {
    astro_fixed(year + 1, 1, 1) - astro_fixed(year, 1, 1) == 366
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Which rule decides the new year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersianAlgorithm {
    Fast,
    Birashk,
    Astronomical,
}

/// Persian calendar under one of the three algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persian {
    algorithm: PersianAlgorithm,
}

impl Persian {
    pub const FAST: Self = Self::new(PersianAlgorithm::Fast);
    pub const BIRASHK: Self = Self::new(PersianAlgorithm::Birashk);
    pub const ASTRONOMICAL: Self = Self::new(PersianAlgorithm::Astronomical);

    pub const fn new(algorithm: PersianAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> PersianAlgorithm {
        self.algorithm
    }

    fn fixed(&self, year: i64, month: u8, day: u8) -> i64 {
        match self.algorithm {
            PersianAlgorithm::Fast => fast_fixed(year, month, day),
            PersianAlgorithm::Birashk => birashk_fixed(year, month, day),
            PersianAlgorithm::Astronomical => astro_fixed(year, month, day),
        }
    }

    fn unfixed(&self, date: i64) -> (i64, u8, u8) {
        match self.algorithm {
            PersianAlgorithm::Fast => fast_from_fixed(date),
            PersianAlgorithm::Birashk => birashk_from_fixed(date),
            PersianAlgorithm::Astronomical => astro_from_fixed(date),
        }
    }

    fn leap(&self, year: i64) -> bool {
        match self.algorithm {
            PersianAlgorithm::Fast => fast_is_leap(year),
            PersianAlgorithm::Birashk => birashk_is_leap(year),
            PersianAlgorithm::Astronomical => astro_is_leap(year),
        }
    }

    fn month_len(&self, year: i64, month: u8) -> u8 {
        match month {
            1..=6 => 31,
            7..=11 => 30,
            _ => {
                if self.leap(year) {
                    30
                } else {
                    29
                }
            }
        }
    }
}

impl CalendarEngine for Persian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "persian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        let len = self.month_len(year as i64, month);
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for persian {year}-{month:02}"
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
        Ok(EpochDay::new(self.fixed(year as i64, month, day)))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = self.unfixed(day.get());
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("persian")?;
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
                "persian calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("persian")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(self.month_len(y as i64, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("persian")?;
        Ok(if self.leap(y as i64) { 366 } else { 365 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(self.fixed(MIN_YEAR as i64, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        let top = MAX_YEAR as i64;
        EpochDay::new(self.fixed(top, 12, self.month_len(top, 12)))
    }
}
