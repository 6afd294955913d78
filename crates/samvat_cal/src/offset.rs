//! Year-renumbered solar calendars: Thai Buddhist, Minguo, and Juche.
//!
//! All three share the Gregorian month grid and relabel the year. Minguo
//! and Juche are plain offsets. The Thai year is Gregorian + 543, but
//! before the 1941 reform it began on April 1, so BE 2483 ran April
//! through December of 1940 and January..March dates belong to the
//! previous Buddhist year.

use samvat_core::{CalendarError, EpochDay, Leniency, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

/// First Buddhist year to begin on January 1.
const THAI_REFORM_YEAR: i32 = 2484;
/// Buddhist era offset after the reform.
const THAI_OFFSET: i32 = 543;

fn check_year(year: i32, leniency: Leniency) -> Result<(), CalendarError> {
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

fn check_month(month: u8) -> Result<(), CalendarError> {
    if month < 1 || month > 12 {
        return Err(CalendarError::InvalidDate(format!(
            "month {month} not in 1..=12"
        )));
    }
    Ok(())
}

fn check_day(ce_year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
    let len = gregorian::days_in_month(ce_year, month);
    if day < 1 || day > len {
        return Err(CalendarError::InvalidDate(format!(
            "day {day} not in 1..={len}"
        )));
    }
    Ok(())
}

/// Thai solar calendar with the 1941 new-year reform.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThaiSolar;

impl ThaiSolar {
    /// Common-era year containing the given Thai month.
    fn ce_year(year: i32, month: u8) -> Result<i32, CalendarError> {
        if year >= THAI_REFORM_YEAR {
            Ok(year - THAI_OFFSET)
        } else if year == THAI_REFORM_YEAR - 1 {
            if month < 4 {
                Err(CalendarError::InvalidDate(format!(
                    "thai year 2483 ran April through December; month {month} does not exist"
                )))
            } else {
                Ok(1940)
            }
        } else if month >= 4 {
            Ok(year - THAI_OFFSET)
        } else {
            Ok(year - THAI_OFFSET + 1)
        }
    }

    fn from_fixed(day: EpochDay) -> (i32, u8, u8) {
        let (gy, gm, gd) = gregorian::ymd_from_epoch_day(day);
        let gy = gy as i32;
        let year = if gy > 1940 || gm >= 4 {
            gy + THAI_OFFSET
        } else {
            gy + THAI_OFFSET - 1
        };
        (year, gm, gd)
    }
}

impl CalendarEngine for ThaiSolar {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "thai")?;
        check_month(month)?;
        let ce = Self::ce_year(year, month)?;
        check_day(ce, month, day)?;
        check_year(year, leniency)?;
        Ok(gregorian::epoch_day_from_ymd(ce, month, day))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = Self::from_fixed(day);
        Ok(DateFields::Ymd {
            year,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("thai")?;
        if y == THAI_REFORM_YEAR - 1 {
            // The nine-month year skipped February entirely.
            return Ok(false);
        }
        let ce = if y >= THAI_REFORM_YEAR {
            y - THAI_OFFSET
        } else {
            y - THAI_OFFSET + 1
        };
        Ok(gregorian::is_leap_year(ce))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "thai calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("thai")?;
        check_month(month)?;
        let ce = Self::ce_year(y, month)?;
        Ok(gregorian::days_in_month(ce, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("thai")?;
        if y == THAI_REFORM_YEAR - 1 {
            // April 1 through December 31, 1940.
            return Ok(275);
        }
        Ok(if self.is_leap_year(year)? { 366 } else { 365 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        // Pre-reform years open on April 1.
        gregorian::epoch_day_from_ymd(MIN_YEAR - THAI_OFFSET, 4, 1)
    }

    fn max_epoch_day(&self) -> EpochDay {
        gregorian::epoch_day_from_ymd(MAX_YEAR - THAI_OFFSET, 12, 31)
    }
}

/// Gregorian calendar with a fixed year offset.
#[derive(Debug, Clone, Copy)]
pub struct GregorianOffset {
    name: &'static str,
    year_offset: i32,
}

impl GregorianOffset {
    /// Republic of China era, year 1 = 1912.
    pub const MINGUO: Self = Self {
        name: "minguo",
        year_offset: 1911,
    };
    /// North Korean Juche era, year 1 = 1912.
    pub const JUCHE: Self = Self {
        name: "juche",
        year_offset: 1911,
    };

    fn ce_year(&self, year: i32) -> i32 {
        year + self.year_offset
    }
}

impl CalendarEngine for GregorianOffset {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, self.name)?;
        check_month(month)?;
        check_day(self.ce_year(year), month, day)?;
        check_year(year, leniency)?;
        Ok(gregorian::epoch_day_from_ymd(self.ce_year(year), month, day))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (gy, month, dom) = gregorian::ymd_from_epoch_day(day);
        Ok(DateFields::Ymd {
            year: gy as i32 - self.year_offset,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard(self.name)?;
        Ok(gregorian::is_leap_year(self.ce_year(y)))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(format!(
                "{} calendar has no leap months",
                self.name
            )));
        }
        let y = year.standard(self.name)?;
        check_month(month)?;
        Ok(gregorian::days_in_month(self.ce_year(y), month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard(self.name)?;
        Ok(gregorian::days_in_year(self.ce_year(y)))
    }

    fn min_epoch_day(&self) -> EpochDay {
        gregorian::epoch_day_from_ymd(self.ce_year(MIN_YEAR), 1, 1)
    }

    fn max_epoch_day(&self) -> EpochDay {
        gregorian::epoch_day_from_ymd(self.ce_year(MAX_YEAR), 12, 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greg(y: i32, m: u8, d: u8) -> EpochDay {
        gregorian::epoch_day_from_ymd(y, m, d)
    }

    #[test]
    fn thai_reform_boundaries() {
        let engine = ThaiSolar;
        let cases = [
            ((1941, 1, 1), (2484, 1, 1)),
            ((1940, 12, 31), (2483, 12, 31)),
            ((1940, 4, 1), (2483, 4, 1)),
            ((1940, 3, 31), (2482, 3, 31)),
            ((1940, 2, 29), (2482, 2, 29)),
            ((2025, 8, 25), (2568, 8, 25)),
        ];
        for ((gy, gm, gd), (ty, tm, td)) in cases {
            let rd = greg(gy, gm, gd);
            assert_eq!(
                engine.from_epoch_day(rd).unwrap(),
                DateFields::ymd(ty, tm, td),
                "from {gy}-{gm}-{gd}"
            );
            assert_eq!(
                engine
                    .to_epoch_day(&DateFields::ymd(ty, tm, td), Leniency::Strict)
                    .unwrap(),
                rd,
                "to {ty}-{tm}-{td}"
            );
        }
    }

    #[test]
    fn thai_short_year() {
        let engine = ThaiSolar;
        // BE 2483 has no January..March and only 275 days.
        for month in 1..4u8 {
            assert!(matches!(
                engine.to_epoch_day(&DateFields::ymd(2483, month, 1), Leniency::Strict),
                Err(CalendarError::InvalidDate(_))
            ));
        }
        assert_eq!(
            engine.length_of_year(&YearFields::Standard(2483)).unwrap(),
            275
        );
        assert!(!engine.is_leap_year(&YearFields::Standard(2483)).unwrap());
        // BE 2482 contained the 29-day February of 1940.
        assert!(engine.is_leap_year(&YearFields::Standard(2482)).unwrap());
        assert_eq!(
            engine
                .length_of_month(&YearFields::Standard(2482), 2, false)
                .unwrap(),
            29
        );
    }

    #[test]
    fn thai_roundtrip_across_reform() {
        let engine = ThaiSolar;
        let start = greg(1938, 1, 1).get();
        let end = greg(1943, 12, 31).get();
        for rd in start..=end {
            let fields = engine.from_epoch_day(EpochDay::new(rd)).unwrap();
            let back = engine.to_epoch_day(&fields, Leniency::Strict).unwrap();
            assert_eq!(back.get(), rd, "thai roundtrip at {rd}");
        }
    }

    #[test]
    fn minguo_anchors() {
        let engine = GregorianOffset::MINGUO;
        assert_eq!(
            engine
                .to_epoch_day(&DateFields::ymd(1, 1, 1), Leniency::Strict)
                .unwrap(),
            greg(1912, 1, 1)
        );
        assert_eq!(
            engine.from_epoch_day(greg(2025, 8, 25)).unwrap(),
            DateFields::ymd(114, 8, 25)
        );
        // Year 0 is 1911, negative years run proleptically.
        assert_eq!(
            engine.from_epoch_day(greg(1911, 5, 3)).unwrap(),
            DateFields::ymd(0, 5, 3)
        );
        assert_eq!(
            engine.from_epoch_day(greg(1900, 1, 1)).unwrap(),
            DateFields::ymd(-11, 1, 1)
        );
        assert!(engine.is_leap_year(&YearFields::Standard(113)).unwrap());
    }

    #[test]
    fn juche_matches_minguo_numbering() {
        let juche = GregorianOffset::JUCHE;
        let minguo = GregorianOffset::MINGUO;
        let rd = greg(2026, 2, 14);
        assert_eq!(
            juche.from_epoch_day(rd).unwrap(),
            minguo.from_epoch_day(rd).unwrap()
        );
        assert_eq!(
            juche.from_epoch_day(rd).unwrap(),
            DateFields::ymd(115, 2, 14)
        );
    }

    #[test]
    fn range_only_under_strict_and_smart() {
        let engine = GregorianOffset::MINGUO;
        let fields = DateFields::ymd(MAX_YEAR + 1, 1, 1);
        assert!(matches!(
            engine.to_epoch_day(&fields, Leniency::Smart),
            Err(CalendarError::Range { .. })
        ));
        assert!(engine.to_epoch_day(&fields, Leniency::Lax).is_ok());
    }
}
