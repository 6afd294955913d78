//! Ethiopian calendar engine: Coptic month structure over a shifted epoch,
//! with the two year-numbering styles Amete Mihret and Amete Alem.

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::coptic;
use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

/// Ethiopian (Amete Mihret) 0001-01-01, Julian 8-08-29.
pub(crate) const ETHIOPIAN_EPOCH: i64 = coptic::COPTIC_EPOCH - 100_809;

/// Amete Alem year = Amete Mihret year + 5500.
const ALEM_OFFSET: i32 = 5500;

pub const MIN_YEAR: i32 = -1_000_000;
pub const MAX_YEAR: i32 = 1_000_000;

/// Year numbering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthiopianEra {
    /// "Year of mercy", the common civil numbering. Proleptic: years
    /// before 1 are accepted.
    AmeteMihret,
    /// "Year of the world", counted from the creation epoch 5500 years
    /// earlier. Year 1 is the earliest representable date.
    AmeteAlem,
}

/// Ethiopian calendar in one of the two year-numbering styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ethiopian {
    era: EthiopianEra,
}

impl Ethiopian {
    pub const AMETE_MIHRET: Self = Self {
        era: EthiopianEra::AmeteMihret,
    };
    pub const AMETE_ALEM: Self = Self {
        era: EthiopianEra::AmeteAlem,
    };

    pub fn era(&self) -> EthiopianEra {
        self.era
    }

    /// Amete Mihret year for a field year in this style.
    fn mihret_year(&self, year: i32, leniency: Leniency) -> Result<i64, CalendarError> {
        match self.era {
            EthiopianEra::AmeteMihret => {
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
            EthiopianEra::AmeteAlem => {
                if leniency != Leniency::Lax
                    && !(1..=MAX_YEAR + ALEM_OFFSET).contains(&year)
                {
                    return Err(CalendarError::range(
                        "year",
                        year as i64,
                        1,
                        (MAX_YEAR + ALEM_OFFSET) as i64,
                    ));
                }
                Ok(year as i64 - ALEM_OFFSET as i64)
            }
        }
    }

    /// Field year in this style for an Amete Mihret year.
    fn style_year(&self, mihret: i64) -> i32 {
        match self.era {
            EthiopianEra::AmeteMihret => mihret as i32,
            EthiopianEra::AmeteAlem => (mihret + ALEM_OFFSET as i64) as i32,
        }
    }
}

impl CalendarEngine for Ethiopian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "ethiopian")?;
        let mihret = self.mihret_year(year, leniency)?;
        coptic::check_month_day(mihret, month, day)?;
        Ok(EpochDay::new(coptic::fixed_from_epoch(
            ETHIOPIAN_EPOCH,
            mihret,
            month,
            day,
        )))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (mihret, month, dom) = coptic::ymd_from_epoch(ETHIOPIAN_EPOCH, day.get());
        Ok(DateFields::Ymd {
            year: self.style_year(mihret),
            month,
            day: dom,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("ethiopian")?;
        let mihret = self.mihret_year(y, Leniency::Lax)?;
        Ok(coptic::is_leap(mihret))
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "ethiopian calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("ethiopian")?;
        let mihret = self.mihret_year(y, Leniency::Lax)?;
        if month < 1 || month > 13 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=13"
            )));
        }
        Ok(coptic::days_in_month(mihret, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("ethiopian")?;
        let mihret = self.mihret_year(y, Leniency::Lax)?;
        Ok(if coptic::is_leap(mihret) { 366 } else { 365 })
    }

    fn min_epoch_day(&self) -> EpochDay {
        let floor_year = match self.era {
            EthiopianEra::AmeteMihret => MIN_YEAR as i64,
            EthiopianEra::AmeteAlem => 1 - ALEM_OFFSET as i64,
        };
        EpochDay::new(coptic::fixed_from_epoch(ETHIOPIAN_EPOCH, floor_year, 1, 1))
    }

    fn max_epoch_day(&self) -> EpochDay {
        let top = MAX_YEAR as i64;
        EpochDay::new(coptic::fixed_from_epoch(
            ETHIOPIAN_EPOCH,
            top,
            13,
            coptic::days_in_month(top, 13),
        ))
    }
}
