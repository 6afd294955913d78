//! Gregorian calendar with a historic Julian-to-Gregorian cutover.
//!
//! Before the cutover day the timeline carries Julian dates, from the
//! cutover day on it carries Gregorian dates; the dates dropped by the
//! reform never existed. The epoch-day line itself has no gap: only the
//! field labels jump (Rome: 1582-10-04 is followed by 1582-10-15).

use samvat_core::{CalendarError, EpochDay, Leniency, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};
use crate::julian;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

/// Gregorian with a configurable first Gregorian day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Historic {
    cutover: EpochDay,
}

impl Historic {
    /// Papal reform: first Gregorian day 1582-10-15.
    pub const ROME: Self = Self {
        cutover: gregorian::epoch_day_from_ymd(1582, 10, 15),
    };

    /// British Empire: first Gregorian day 1752-09-14.
    pub const BRITAIN: Self = Self {
        cutover: gregorian::epoch_day_from_ymd(1752, 9, 14),
    };

    /// Soviet decree: first Gregorian day 1918-02-14.
    pub const RUSSIA: Self = Self {
        cutover: gregorian::epoch_day_from_ymd(1918, 2, 14),
    };

    /// Custom cutover at the given first Gregorian day.
    pub fn new(first_gregorian_day: EpochDay) -> Self {
        Self {
            cutover: first_gregorian_day,
        }
    }

    /// The first Gregorian day.
    pub fn cutover(&self) -> EpochDay {
        self.cutover
    }

    fn cut(&self) -> i64 {
        self.cutover.get()
    }

    /// Days of the month (year, month) present on the timeline: the Julian
    /// rendering clipped to before the cutover plus the Gregorian rendering
    /// clipped to on-or-after it. The two clips never overlap.
    fn month_days_present(&self, year: i32, month: u8) -> i64 {
        let y = year as i64;
        let j_start = julian::fixed_from_julian(y, month, 1);
        let j_end = julian::fixed_from_julian(y, month, julian::days_in_month(y, month));
        let j_part = (j_end.min(self.cut() - 1) - j_start + 1).max(0);

        let g_start = gregorian::epoch_day_from_ymd(year, month, 1).get();
        let g_end = gregorian::epoch_day_from_ymd(year, month, gregorian::days_in_month(year, month)).get();
        let g_part = (g_end - g_start.max(self.cut()) + 1).max(0);

        j_part + g_part
    }

    fn year_days_present(&self, year: i32) -> i64 {
        let y = year as i64;
        let j_start = julian::fixed_from_julian(y, 1, 1);
        let j_end = julian::fixed_from_julian(y, 12, 31);
        let j_part = (j_end.min(self.cut() - 1) - j_start + 1).max(0);

        let g_start = gregorian::epoch_day_from_ymd(year, 1, 1).get();
        let g_end = gregorian::epoch_day_from_ymd(year, 12, 31).get();
        let g_part = (g_end - g_start.max(self.cut()) + 1).max(0);

        j_part + g_part
    }

    fn resolve(&self, year: i32, month: u8, day: u8) -> Result<i64, CalendarError> {
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        if day >= 1 && day <= gregorian::days_in_month(year, month) {
            let g = gregorian::epoch_day_from_ymd(year, month, day).get();
            if g >= self.cut() {
                return Ok(g);
            }
        }
        if day >= 1 && day <= julian::days_in_month(year as i64, month) {
            let j = julian::fixed_from_julian(year as i64, month, day);
            if j < self.cut() {
                return Ok(j);
            }
        }
        Err(CalendarError::InvalidDate(format!(
            "{year}-{month:02}-{day:02} does not exist across the cutover"
        )))
    }
}

impl CalendarEngine for Historic {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "historic")?;
        let fixed = self.resolve(year, month, day)?;
        if leniency != Leniency::Lax && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::range(
                "year",
                year as i64,
                MIN_YEAR as i64,
                MAX_YEAR as i64,
            ));
        }
        Ok(EpochDay::new(fixed))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (year, month, dom) = if day >= self.cutover {
            gregorian::ymd_from_epoch_day(day)
        } else {
            julian::julian_from_fixed(day.get())
        };
        Ok(DateFields::Ymd {
            year: year as i32,
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("historic")?;
        Ok(self.resolve(y, 2, 29).is_ok())
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "historic calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("historic")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(self.month_days_present(y, month) as u8)
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("historic")?;
        Ok(self.year_days_present(y) as u16)
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(julian::fixed_from_julian(MIN_YEAR as i64, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        gregorian::epoch_day_from_ymd(MAX_YEAR, 12, 31)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(engine: &Historic, rd: i64) -> (i32, u8, u8) {
        match engine.from_epoch_day(EpochDay::new(rd)).unwrap() {
            DateFields::Ymd { year, month, day } => (year, month, day),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn reform_boundaries() {
        let rome = Historic::ROME;
        let cut = rome.cutover().get();
        assert_eq!(fields(&rome, cut - 1), (1582, 10, 4));
        assert_eq!(fields(&rome, cut), (1582, 10, 15));

        let britain = Historic::BRITAIN;
        assert_eq!(fields(&britain, britain.cutover().get() - 1), (1752, 9, 2));

        let russia = Historic::RUSSIA;
        assert_eq!(fields(&russia, russia.cutover().get() - 1), (1918, 1, 31));
    }

    #[test]
    fn dropped_dates_are_invalid() {
        for (engine, year, month, day) in [
            (Historic::ROME, 1582, 10, 10),
            (Historic::BRITAIN, 1752, 9, 5),
            (Historic::RUSSIA, 1918, 2, 1),
        ] {
            let f = DateFields::ymd(year, month, day);
            assert!(
                matches!(
                    engine.to_epoch_day(&f, Leniency::Strict),
                    Err(CalendarError::InvalidDate(_))
                ),
                "{year}-{month}-{day}"
            );
        }
    }

    #[test]
    fn cut_month_and_year_lengths() {
        let cases = [
            (Historic::ROME, 1582, 10, 21, 355),
            (Historic::BRITAIN, 1752, 9, 19, 355),
            (Historic::RUSSIA, 1918, 2, 15, 352),
        ];
        for (engine, year, month, month_len, year_len) in cases {
            let y = YearFields::Standard(year);
            assert_eq!(engine.length_of_month(&y, month, false).unwrap(), month_len);
            assert_eq!(engine.length_of_year(&y).unwrap(), year_len);
        }
        // Months away from the cut keep their plain lengths.
        let y = YearFields::Standard(1582);
        assert_eq!(Historic::ROME.length_of_month(&y, 9, false).unwrap(), 30);
        assert_eq!(Historic::ROME.length_of_month(&y, 11, false).unwrap(), 30);
    }

    #[test]
    fn julian_leap_rule_applies_before_the_cut() {
        let britain = Historic::BRITAIN;
        // Civil 1700 kept the Julian February 29; proleptic Gregorian has none.
        assert!(britain.is_leap_year(&YearFields::Standard(1700)).unwrap());
        let feb29 = DateFields::ymd(1700, 2, 29);
        let rd = britain.to_epoch_day(&feb29, Leniency::Strict).unwrap();
        assert_eq!(britain.from_epoch_day(rd).unwrap(), feb29);
        // After the cut the Gregorian rule governs.
        assert!(!britain.is_leap_year(&YearFields::Standard(1900)).unwrap());
        assert!(britain
            .to_epoch_day(&DateFields::ymd(1900, 2, 29), Leniency::Strict)
            .is_err());
    }

    #[test]
    fn roundtrip_across_the_cut() {
        let engine = Historic::BRITAIN;
        let cut = engine.cutover().get();
        for rd in (cut - 400)..(cut + 400) {
            let day = EpochDay::new(rd);
            let f = engine.from_epoch_day(day).unwrap();
            assert_eq!(engine.to_epoch_day(&f, Leniency::Strict).unwrap(), day);
        }
    }
}
