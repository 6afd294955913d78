//! Era transition tables and the era-mapped Gregorian engine.
//!
//! An era table is an ordered list of (name, first day) pairs; the newest
//! era is open-ended. The packaged table carries the five modern Japanese
//! Nengo. Era-relative years are calendar years: year 1 is the Gregorian
//! year the era begins in, year 2 starts the following January 1.
//!
//! The same parser reads the embedded table and caller-supplied files, so
//! alternative era schemes can be registered as their own variants.

use std::path::Path;
use std::sync::OnceLock;

use samvat_core::{CalendarError, EpochDay, Leniency, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds};
use crate::gregorian::{Gregorian, MAX_YEAR, check_month_day};

const PACKAGED_TEXT: &str = include_str!("../data/japanese_eras.txt");

static PACKAGED: OnceLock<Result<EraTransitionTable, CalendarError>> = OnceLock::new();

/// One era: its name and the epoch day it begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraEntry {
    name: String,
    start: EpochDay,
}

impl EraEntry {
    /// Era name as written in the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First epoch day of the era.
    pub fn start(&self) -> EpochDay {
        self.start
    }

    /// Gregorian year the era begins in (its year 1).
    fn start_year(&self) -> i32 {
        gregorian::year_from_epoch_day(self.start) as i32
    }
}

/// Ordered era transitions, strictly increasing by start day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraTransitionTable {
    eras: Vec<EraEntry>,
}

impl EraTransitionTable {
    /// All eras, oldest first.
    pub fn entries(&self) -> &[EraEntry] {
        &self.eras
    }

    /// Era in force on the given day.
    ///
    /// Days before the first transition have no era; `Strict` reports
    /// them as a range error, `Smart` and `Lax` resolve to the first era
    /// (whose era-relative years then run zero and negative).
    pub fn active_era(
        &self,
        day: EpochDay,
        leniency: Leniency,
    ) -> Result<&EraEntry, CalendarError> {
        match self.index_for(day) {
            Some(idx) => Ok(&self.eras[idx]),
            None if leniency == Leniency::Strict => Err(CalendarError::range(
                "epoch day",
                day.get(),
                self.eras[0].start.get(),
                i64::MAX,
            )),
            None => Ok(&self.eras[0]),
        }
    }

    /// Era-relative year of `day` counted in the named era, 1-based from
    /// the era's first calendar year. The day need not fall inside the
    /// era's span.
    pub fn year_of_era(&self, era: &str, day: EpochDay) -> Result<i32, CalendarError> {
        let (_, entry) = self.by_name(era)?;
        let year = gregorian::year_from_epoch_day(day) as i32;
        Ok(year - entry.start_year() + 1)
    }

    /// Index of the era containing `day`, `None` before the first era.
    fn index_for(&self, day: EpochDay) -> Option<usize> {
        let after = self.eras.partition_point(|era| era.start <= day);
        after.checked_sub(1)
    }

    fn by_name(&self, name: &str) -> Result<(usize, &EraEntry), CalendarError> {
        self.eras
            .iter()
            .enumerate()
            .find(|(_, era)| era.name == name)
            .ok_or_else(|| CalendarError::InvalidDate(format!("unknown era '{name}'")))
    }

    /// First day of the era after index `idx`, `None` for the newest era.
    fn end_of(&self, idx: usize) -> Option<EpochDay> {
        self.eras.get(idx + 1).map(|era| era.start)
    }
}

/// Parse an era table from its text form.
///
/// One era per line: name and ISO start date, whitespace separated.
/// Blank lines and `#` comments are skipped. Start days must strictly
/// increase and names must be unique.
pub fn parse_era_table(content: &str) -> Result<EraTransitionTable, CalendarError> {
    let mut eras: Vec<EraEntry> = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(name), Some(date), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(CalendarError::Parse(format!(
                "line {}: expected '<name> <yyyy-mm-dd>', got '{line}'",
                lineno + 1
            )));
        };
        let start = parse_iso_date(date).ok_or_else(|| {
            CalendarError::Parse(format!("line {}: bad date '{date}'", lineno + 1))
        })?;
        if eras.iter().any(|era| era.name == name) {
            return Err(CalendarError::Parse(format!(
                "line {}: duplicate era '{name}'",
                lineno + 1
            )));
        }
        if let Some(last) = eras.last()
            && start <= last.start
        {
            return Err(CalendarError::Parse(format!(
                "line {}: era '{name}' does not start after '{}'",
                lineno + 1,
                last.name
            )));
        }
        eras.push(EraEntry {
            name: name.to_string(),
            start,
        });
    }
    if eras.is_empty() {
        return Err(CalendarError::Parse("no era lines found".to_string()));
    }
    Ok(EraTransitionTable { eras })
}

/// Load and parse an era table file.
pub fn load_era_table(path: &Path) -> Result<EraTransitionTable, CalendarError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CalendarError::Io(format!("{}: {e}", path.display())))?;
    parse_era_table(&content)
}

/// The packaged Japanese Nengo table, parsed once.
pub fn packaged_eras() -> Result<&'static EraTransitionTable, CalendarError> {
    PACKAGED
        .get_or_init(|| parse_era_table(PACKAGED_TEXT))
        .as_ref()
        .map_err(|e| e.clone())
}

fn parse_iso_date(text: &str) -> Option<EpochDay> {
    let mut parts = text.split('-');
    let (Some(y), Some(m), Some(d), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let year: i32 = y.parse().ok()?;
    let month: u8 = m.parse().ok()?;
    let day: u8 = d.parse().ok()?;
    if month < 1 || month > 12 || day < 1 || day > gregorian::days_in_month(year, month) {
        return None;
    }
    Some(gregorian::epoch_day_from_ymd(year, month, day))
}

/// Gregorian calendar presented through era-relative years.
///
/// Days inside the table's span convert to [`DateFields::EraYmd`]; days
/// before the first era fall back to plain [`DateFields::Ymd`], and both
/// shapes are accepted on the way in.
#[derive(Debug, Clone)]
pub struct EraGregorian {
    name: &'static str,
    table: EraTransitionTable,
}

impl EraGregorian {
    /// Era-mapped Gregorian over the packaged Japanese Nengo table.
    pub fn japanese() -> Result<Self, CalendarError> {
        Ok(Self {
            name: "japanese",
            table: packaged_eras()?.clone(),
        })
    }

    /// Era-mapped Gregorian over a caller-supplied table.
    pub fn from_table(name: &'static str, table: EraTransitionTable) -> Self {
        Self { name, table }
    }

    /// Era-mapped Gregorian over a table file.
    pub fn from_path(name: &'static str, path: &Path) -> Result<Self, CalendarError> {
        Ok(Self {
            name,
            table: load_era_table(path)?,
        })
    }

    /// The transition table behind this engine.
    pub fn table(&self) -> &EraTransitionTable {
        &self.table
    }

    fn era_to_epoch_day(
        &self,
        era: &str,
        year: i32,
        month: u8,
        day: u8,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (idx, entry) = self.table.by_name(era)?;
        let ce_year = entry.start_year() + year - 1;
        check_month_day(ce_year, month, day)?;
        if leniency == Leniency::Lax {
            return Ok(gregorian::epoch_day_from_ymd(ce_year, month, day));
        }
        let max_year = MAX_YEAR - entry.start_year() + 1;
        if year < 1 || year > max_year {
            return Err(CalendarError::range(
                "era year",
                year as i64,
                1,
                max_year as i64,
            ));
        }
        let candidate = gregorian::epoch_day_from_ymd(ce_year, month, day);
        if leniency == Leniency::Strict {
            if candidate < entry.start() {
                return Err(CalendarError::InvalidDate(format!(
                    "{era} began after {era} {year}-{month:02}-{day:02}"
                )));
            }
            if let Some(end) = self.table.end_of(idx)
                && candidate >= end
            {
                return Err(CalendarError::InvalidDate(format!(
                    "{era} ended before {era} {year}-{month:02}-{day:02}"
                )));
            }
        }
        Ok(candidate)
    }

    /// Gregorian year named by either year shape.
    fn ce_year(&self, year: &YearFields) -> Result<i32, CalendarError> {
        match year {
            YearFields::Standard(y) => Ok(*y),
            YearFields::Era { era, year } => {
                let (_, entry) = self.table.by_name(era)?;
                Ok(entry.start_year() + year - 1)
            }
            YearFields::Cycle { .. } => Err(CalendarError::InvalidDate(format!(
                "{} calendar takes a plain or era year, got {year:?}",
                self.name
            ))),
        }
    }
}

impl CalendarEngine for EraGregorian {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        match fields {
            DateFields::EraYmd {
                era,
                year,
                month,
                day,
            } => self.era_to_epoch_day(era, *year, *month, *day, leniency),
            DateFields::Ymd { .. } => Gregorian.to_epoch_day(fields, leniency),
            _ => Err(CalendarError::InvalidDate(format!(
                "{} calendar takes era or plain year/month/day fields, got {fields:?}",
                self.name
            ))),
        }
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (ce_year, month, dom) = gregorian::ymd_from_epoch_day(day);
        match self.table.index_for(day) {
            Some(idx) => {
                let entry = &self.table.eras[idx];
                Ok(DateFields::EraYmd {
                    era: entry.name().to_string(),
                    year: ce_year as i32 - entry.start_year() + 1,
                    month,
                    day: dom,
                })
            }
            None => Ok(DateFields::Ymd {
                year: ce_year as i32,
                month,
                day: dom,
            }),
        }
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        Ok(gregorian::is_leap_year(self.ce_year(year)?))
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
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(gregorian::days_in_month(self.ce_year(year)?, month))
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        Ok(gregorian::days_in_year(self.ce_year(year)?))
    }

    fn min_epoch_day(&self) -> EpochDay {
        Gregorian.min_epoch_day()
    }

    fn max_epoch_day(&self) -> EpochDay {
        Gregorian.max_epoch_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u8, d: u8) -> EpochDay {
        gregorian::epoch_day_from_ymd(y, m, d)
    }

    #[test]
    fn packaged_table_spans_the_five_nengo() {
        let table = packaged_eras().unwrap();
        let names: Vec<&str> = table.entries().iter().map(EraEntry::name).collect();
        assert_eq!(names, ["meiji", "taisho", "showa", "heisei", "reiwa"]);
        assert_eq!(table.entries()[0].start(), EpochDay::new(682_204));
        assert_eq!(table.entries()[4].start(), EpochDay::new(737_180));
    }

    #[test]
    fn active_era_transitions() {
        let table = packaged_eras().unwrap();
        let cases = [
            (day(1868, 10, 23), "meiji"),
            (day(1912, 7, 29), "meiji"),
            (day(1912, 7, 30), "taisho"),
            (day(1989, 1, 7), "showa"),
            (day(1989, 1, 8), "heisei"),
            (day(2019, 4, 30), "heisei"),
            (day(2019, 5, 1), "reiwa"),
            (day(2025, 8, 25), "reiwa"),
        ];
        for (d, want) in cases {
            let era = table.active_era(d, Leniency::Strict).unwrap();
            assert_eq!(era.name(), want, "at {}", d.get());
        }
    }

    #[test]
    fn before_the_first_era() {
        let table = packaged_eras().unwrap();
        let d = day(1850, 1, 1);
        assert!(matches!(
            table.active_era(d, Leniency::Strict),
            Err(CalendarError::Range { .. })
        ));
        assert_eq!(table.active_era(d, Leniency::Smart).unwrap().name(), "meiji");
        // Smart resolution counts backward from the era's year 1.
        assert_eq!(table.year_of_era("meiji", d).unwrap(), -17);
    }

    #[test]
    fn era_years_are_calendar_years() {
        let table = packaged_eras().unwrap();
        assert_eq!(table.year_of_era("meiji", day(1868, 10, 23)).unwrap(), 1);
        assert_eq!(table.year_of_era("meiji", day(1869, 1, 1)).unwrap(), 2);
        assert_eq!(table.year_of_era("showa", day(1989, 1, 7)).unwrap(), 64);
        assert_eq!(table.year_of_era("heisei", day(2019, 4, 30)).unwrap(), 31);
        assert_eq!(table.year_of_era("reiwa", day(2025, 8, 25)).unwrap(), 7);
    }

    #[test]
    fn engine_roundtrips_each_side_of_meiji() {
        let engine = EraGregorian::japanese().unwrap();
        let modern = engine.from_epoch_day(day(2025, 8, 25)).unwrap();
        assert_eq!(modern, DateFields::era_ymd("reiwa", 7, 8, 25));
        assert_eq!(
            engine.to_epoch_day(&modern, Leniency::Strict).unwrap(),
            day(2025, 8, 25)
        );
        // Pre-Meiji days come back as plain Gregorian fields.
        let old = engine.from_epoch_day(day(1850, 3, 4)).unwrap();
        assert_eq!(old, DateFields::ymd(1850, 3, 4));
        assert_eq!(
            engine.to_epoch_day(&old, Leniency::Strict).unwrap(),
            day(1850, 3, 4)
        );
    }

    #[test]
    fn strict_rejects_continuation_years() {
        let engine = EraGregorian::japanese().unwrap();
        // Showa 64 ran through 1989-01-07 only.
        let jan7 = DateFields::era_ymd("showa", 64, 1, 7);
        let jan8 = DateFields::era_ymd("showa", 64, 1, 8);
        assert_eq!(
            engine.to_epoch_day(&jan7, Leniency::Strict).unwrap(),
            day(1989, 1, 7)
        );
        assert!(matches!(
            engine.to_epoch_day(&jan8, Leniency::Strict),
            Err(CalendarError::InvalidDate(_))
        ));
        assert_eq!(
            engine.to_epoch_day(&jan8, Leniency::Smart).unwrap(),
            day(1989, 1, 8)
        );
        // Heisei 31 named 2019 dates past the Reiwa transition.
        assert_eq!(
            engine
                .to_epoch_day(&DateFields::era_ymd("heisei", 31, 6, 1), Leniency::Smart)
                .unwrap(),
            day(2019, 6, 1)
        );
        // Meiji 1 began in October; earlier 1868 dates precede the era.
        assert!(matches!(
            engine.to_epoch_day(&DateFields::era_ymd("meiji", 1, 1, 1), Leniency::Strict),
            Err(CalendarError::InvalidDate(_))
        ));
        assert_eq!(
            engine
                .to_epoch_day(&DateFields::era_ymd("meiji", 1, 1, 1), Leniency::Smart)
                .unwrap(),
            day(1868, 1, 1)
        );
    }

    #[test]
    fn smart_still_requires_positive_years() {
        let engine = EraGregorian::japanese().unwrap();
        let fields = DateFields::era_ymd("reiwa", 0, 1, 1);
        assert!(matches!(
            engine.to_epoch_day(&fields, Leniency::Smart),
            Err(CalendarError::Range { .. })
        ));
        // Lax drops the year checks but keeps the month/day structure.
        assert_eq!(
            engine.to_epoch_day(&fields, Leniency::Lax).unwrap(),
            day(2018, 1, 1)
        );
        assert!(matches!(
            engine.to_epoch_day(&DateFields::era_ymd("reiwa", 7, 2, 30), Leniency::Lax),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    #[test]
    fn unknown_era_rejected() {
        let engine = EraGregorian::japanese().unwrap();
        assert!(matches!(
            engine.to_epoch_day(&DateFields::era_ymd("ansei", 3, 1, 1), Leniency::Smart),
            Err(CalendarError::InvalidDate(_))
        ));
    }

    #[test]
    fn era_year_queries() {
        let engine = EraGregorian::japanese().unwrap();
        // Reiwa 6 is 2024, a leap year.
        let year = YearFields::Era {
            era: "reiwa".to_string(),
            year: 6,
        };
        assert!(engine.is_leap_year(&year).unwrap());
        assert_eq!(engine.length_of_month(&year, 2, false).unwrap(), 29);
        assert_eq!(engine.length_of_year(&year).unwrap(), 366);
        assert!(!engine.is_leap_year(&YearFields::Standard(2023)).unwrap());
    }

    const SAMPLE: &str = "\
# two short eras
alpha 1900-01-01
beta 1950-06-15
";

    #[test]
    fn parse_sample_table() {
        let table = parse_era_table(SAMPLE).unwrap();
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.entries()[1].name(), "beta");
        assert_eq!(table.entries()[1].start(), day(1950, 6, 15));
        assert_eq!(
            table
                .active_era(day(1950, 6, 14), Leniency::Strict)
                .unwrap()
                .name(),
            "alpha"
        );
    }

    #[test]
    fn parse_errors() {
        for (content, what) in [
            ("alpha 1900-01-01 extra", "extra field"),
            ("alpha 1900-13-01", "bad month"),
            ("alpha 1900-02-30", "bad day"),
            ("alpha nineteen-01-01", "bad year"),
            ("alpha 1900-01-01\nalpha 1950-01-01", "duplicate name"),
            ("alpha 1950-01-01\nbeta 1900-01-01", "not increasing"),
            ("# only a comment\n", "empty table"),
        ] {
            assert!(
                matches!(parse_era_table(content), Err(CalendarError::Parse(_))),
                "{what}"
            );
        }
    }

    #[test]
    fn custom_table_engine() {
        let table = parse_era_table(SAMPLE).unwrap();
        let engine = EraGregorian::from_table("sample", table);
        assert_eq!(
            engine.from_epoch_day(day(1951, 2, 3)).unwrap(),
            DateFields::era_ymd("beta", 2, 2, 3)
        );
        // alpha 51 runs through June 14; later dates belong to beta.
        assert_eq!(
            engine
                .to_epoch_day(&DateFields::era_ymd("alpha", 51, 2, 3), Leniency::Strict)
                .unwrap(),
            day(1950, 2, 3)
        );
        assert!(
            engine
                .to_epoch_day(&DateFields::era_ymd("alpha", 51, 7, 1), Leniency::Strict)
                .is_err()
        );
        assert_eq!(
            engine
                .to_epoch_day(&DateFields::era_ymd("alpha", 51, 7, 1), Leniency::Smart)
                .unwrap(),
            day(1950, 7, 1)
        );
    }
}
