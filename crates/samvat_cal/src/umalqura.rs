//! Umm al-Qura month-length table and the table-driven Hijri engine.
//!
//! The packaged table covers AH 1300..=1600 (one line per year: Hijri
//! year, epoch day of 1 Muharram, twelve month lengths). Dates outside
//! the packaged span are a range error; there is no arithmetic fallback.
//!
//! The same parser reads the embedded table and caller-supplied files,
//! so a custom sighting table can be registered as its own variant.

use std::path::Path;
use std::sync::OnceLock;

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds, plain_ymd};

const PACKAGED_TEXT: &str = include_str!("../data/umalqura.txt");

static PACKAGED: OnceLock<Result<UmalquraTable, CalendarError>> = OnceLock::new();

/// One year of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct YearRow {
    /// Epoch day of 1 Muharram.
    start: i64,
    /// Days per month, each 29 or 30.
    lengths: [u8; 12],
}

impl YearRow {
    fn total(&self) -> i64 {
        self.lengths.iter().map(|&n| n as i64).sum()
    }
}

/// Parsed month-length table over a contiguous span of Hijri years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UmalquraTable {
    first_year: i32,
    rows: Vec<YearRow>,
}

impl UmalquraTable {
    /// First Hijri year covered.
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last Hijri year covered.
    pub fn last_year(&self) -> i32 {
        self.first_year + self.rows.len() as i32 - 1
    }

    /// First covered epoch day (1 Muharram of the first year).
    pub fn min_day(&self) -> EpochDay {
        EpochDay::new(self.rows[0].start)
    }

    /// Last covered epoch day (end of Dhu al-Hijja of the last year).
    pub fn max_day(&self) -> EpochDay {
        let last = &self.rows[self.rows.len() - 1];
        EpochDay::new(last.start + last.total() - 1)
    }

    fn row(&self, year: i32) -> Result<&YearRow, CalendarError> {
        if year < self.first_year || year > self.last_year() {
            return Err(CalendarError::range(
                "year",
                year as i64,
                self.first_year as i64,
                self.last_year() as i64,
            ));
        }
        Ok(&self.rows[(year - self.first_year) as usize])
    }

    /// Row index of the year holding the given epoch day. The caller has
    /// already bounds-checked `day` against the covered span.
    fn row_index_for_day(&self, day: i64) -> usize {
        self.rows.partition_point(|r| r.start <= day) - 1
    }
}

/// Parse a month-length table from its text content.
///
/// Lines starting with `#` and blank lines are ignored. Data lines are
/// `<year> <start epoch day> <12 month-length digits>`, years contiguous
/// and ascending, each year's start equal to the previous start plus the
/// previous year's month lengths.
pub fn parse_umalqura(content: &str) -> Result<UmalquraTable, CalendarError> {
    let mut first_year: Option<i32> = None;
    let mut rows: Vec<YearRow> = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (year, start, mask) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(s), Some(m), None) => (y, s, m),
            _ => {
                return Err(CalendarError::Parse(format!(
                    "line {}: expected <year> <start> <lengths>",
                    lineno + 1
                )));
            }
        };
        let year: i32 = year.parse().map_err(|_| {
            CalendarError::Parse(format!("line {}: bad year '{year}'", lineno + 1))
        })?;
        let start: i64 = start.parse().map_err(|_| {
            CalendarError::Parse(format!("line {}: bad start day '{start}'", lineno + 1))
        })?;
        let lengths = parse_lengths(mask, lineno + 1)?;

        match (first_year, rows.last()) {
            (None, _) => first_year = Some(year),
            (Some(fy), Some(prev)) => {
                let expect_year = fy + rows.len() as i32;
                if year != expect_year {
                    return Err(CalendarError::Parse(format!(
                        "line {}: year {year} breaks the run, expected {expect_year}",
                        lineno + 1
                    )));
                }
                let expect_start = prev.start + prev.total();
                if start != expect_start {
                    return Err(CalendarError::Parse(format!(
                        "line {}: year {year} starts at {start}, expected {expect_start}",
                        lineno + 1
                    )));
                }
            }
            (Some(_), None) => {}
        }
        rows.push(YearRow { start, lengths });
    }

    match first_year {
        Some(first_year) if !rows.is_empty() => Ok(UmalquraTable { first_year, rows }),
        _ => Err(CalendarError::Parse("no table rows found".to_string())),
    }
}

/// Load a month-length table from a file.
pub fn load_umalqura(path: &Path) -> Result<UmalquraTable, CalendarError> {
    let content = std::fs::read_to_string(path)?;
    parse_umalqura(&content)
}

/// The packaged AH 1300..=1600 table, parsed once.
pub fn packaged_table() -> Result<&'static UmalquraTable, CalendarError> {
    PACKAGED
        .get_or_init(|| parse_umalqura(PACKAGED_TEXT))
        .as_ref()
        .map_err(|e| e.clone())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_lengths(mask: &str, lineno: usize) -> Result<[u8; 12], CalendarError> {
    if mask.chars().count() != 12 {
        return Err(CalendarError::Parse(format!(
            "line {lineno}: expected 12 month lengths, got '{mask}'"
        )));
    }
    let mut lengths = [0u8; 12];
    for (i, ch) in mask.chars().enumerate() {
        lengths[i] = match ch {
            '2' => 29,
            '3' => 30,
            _ => {
                return Err(CalendarError::Parse(format!(
                    "line {lineno}: bad month length digit '{ch}'"
                )));
            }
        };
    }
    Ok(lengths)
}

/// Hijri engine backed by a month-length table.
#[derive(Debug, Clone)]
pub struct Umalqura {
    table: UmalquraTable,
}

impl Umalqura {
    /// Engine over the packaged AH 1300..=1600 table.
    pub fn packaged() -> Result<Self, CalendarError> {
        Ok(Self {
            table: packaged_table()?.clone(),
        })
    }

    /// Engine over a caller-supplied table.
    pub fn from_table(table: UmalquraTable) -> Self {
        Self { table }
    }

    /// Engine over a table file.
    pub fn from_path(path: &Path) -> Result<Self, CalendarError> {
        Ok(Self {
            table: load_umalqura(path)?,
        })
    }

    /// The backing table.
    pub fn table(&self) -> &UmalquraTable {
        &self.table
    }
}

impl CalendarEngine for Umalqura {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        _leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (year, month, day) = plain_ymd(fields, "umalqura")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        let row = self.table.row(year)?;
        let len = row.lengths[(month - 1) as usize];
        if day < 1 || day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for umalqura {year}-{month:02}"
            )));
        }
        let prior: i64 = row.lengths[..(month - 1) as usize]
            .iter()
            .map(|&n| n as i64)
            .sum();
        Ok(EpochDay::new(row.start + prior + day as i64 - 1))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let index = self.table.row_index_for_day(day.get());
        let row = &self.table.rows[index];
        let mut remaining = day.get() - row.start;
        let mut month = 1u8;
        for &len in &row.lengths {
            if remaining < len as i64 {
                break;
            }
            remaining -= len as i64;
            month += 1;
        }
        Ok(DateFields::Ymd {
            year: self.table.first_year + index as i32,
            month,
            day: (remaining + 1) as u8,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let y = year.standard("umalqura")?;
        Ok(self.table.row(y)?.total() > 354)
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        if leap_month {
            return Err(CalendarError::InvalidDate(
                "umalqura calendar has no leap months".to_string(),
            ));
        }
        let y = year.standard("umalqura")?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        Ok(self.table.row(y)?.lengths[(month - 1) as usize])
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let y = year.standard("umalqura")?;
        Ok(self.table.row(y)?.total() as u16)
    }

    fn min_epoch_day(&self) -> EpochDay {
        self.table.min_day()
    }

    fn max_epoch_day(&self) -> EpochDay {
        self.table.max_day()
    }
}
