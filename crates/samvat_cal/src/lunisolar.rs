//! East Asian lunisolar calendar engines.
//!
//! Chinese, Korean (Dangi), Vietnamese, and pre-Meiji Japanese variants
//! share one algorithm: the year anchors to the winter solstice, months
//! begin at the new moons observed at civil midnight on the zone's
//! historical reference meridian, and a leap month repeats the number of
//! the month it follows. The variants differ only in epoch and in the
//! meridian history.
//!
//! Dates are exchanged as [`DateFields::CycleYmd`]: sexagenary cycle,
//! year of cycle (1..=60), month number (1..=12) with a leap flag, and
//! day of month. Month ordinals (1..=13) appear only inside the
//! [`LunisolarMonthTable`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use samvat_astro::{
    MEAN_SYNODIC_MONTH, MEAN_TROPICAL_YEAR, WINTER, estimate_prior_solar_longitude,
    julian_centuries, major_solar_term_from_longitude, new_moon_at_or_after, new_moon_before,
    solar_longitude,
};
use samvat_core::{CalendarError, EpochDay, Leniency, Moment, gregorian};

use crate::date::{CalendarEngine, DateFields, YearFields, check_bounds};

/// First day of Chinese elapsed year 1, Gregorian -2636-02-15.
const CHINESE_EPOCH: i64 = gregorian::epoch_day_from_ymd(-2636, 2, 15).get();
/// First day of Dangi elapsed year 1, Gregorian -2332-02-15.
const DANGI_EPOCH: i64 = gregorian::epoch_day_from_ymd(-2332, 2, 15).get();

/// Day before the Gregorian 3100 new year; identical in all four zones.
const MAX_EPOCH_DAY: i64 = 1_131_917;

const MIN_ELAPSED: i64 = 1;
/// Elapsed year beginning in Gregorian 3099 for the Chinese epoch.
const CHINESE_MAX_ELAPSED: i64 = 5736;
/// Same bound expressed against the later Dangi epoch.
const DANGI_MAX_ELAPSED: i64 = 5432;

/// Leap-ordinal sentinel for years without a leap month.
const NO_LEAP_ORDINAL: u8 = 14;

const BEIJING_GMT8: i64 = gregorian::epoch_day_from_ymd(1929, 1, 1).get();
const KOREA_1908: i64 = gregorian::epoch_day_from_ymd(1908, 4, 1).get();
const KOREA_1912: i64 = gregorian::epoch_day_from_ymd(1912, 1, 1).get();
const KOREA_1954: i64 = gregorian::epoch_day_from_ymd(1954, 3, 21).get();
const KOREA_1961: i64 = gregorian::epoch_day_from_ymd(1961, 8, 10).get();
const VIETNAM_1968: i64 = gregorian::epoch_day_from_ymd(1968, 1, 1).get();
const TOKYO_1888: i64 = gregorian::epoch_day_from_ymd(1888, 1, 1).get();

/// Beijing local mean time until the 1929 switch to GMT+8.
fn chinese_offset(fixed: i64) -> f64 {
    if fixed < BEIJING_GMT8 {
        1397.0 / 180.0 / 24.0
    } else {
        8.0 / 24.0
    }
}

/// Korean standard time history: Seoul local mean time, then 8.5h, 9h,
/// back to 8.5h during 1954..1961, 9h since.
fn dangi_offset(fixed: i64) -> f64 {
    if fixed < KOREA_1908 {
        3809.0 / 450.0 / 24.0
    } else if fixed < KOREA_1912 {
        8.5 / 24.0
    } else if fixed < KOREA_1954 {
        9.0 / 24.0
    } else if fixed < KOREA_1961 {
        8.5 / 24.0
    } else {
        9.0 / 24.0
    }
}

/// Hanoi kept GMT+8 until 1968, GMT+7 since.
fn vietnamese_offset(fixed: i64) -> f64 {
    if fixed < VIETNAM_1968 {
        8.0 / 24.0
    } else {
        7.0 / 24.0
    }
}

/// Tokyo local mean time until the 1888 adoption of GMT+9.
fn japanese_offset(fixed: i64) -> f64 {
    if fixed < TOKYO_1888 {
        (9.0 + 143.0 / 540.0) / 24.0
    } else {
        9.0 / 24.0
    }
}

/// Epoch, range bound, and UTC-offset history of one lunisolar zone.
#[derive(Clone, Copy)]
struct ZoneRules {
    name: &'static str,
    epoch: i64,
    max_elapsed: i64,
    offset: fn(i64) -> f64,
}

const CHINESE_RULES: ZoneRules = ZoneRules {
    name: "chinese",
    epoch: CHINESE_EPOCH,
    max_elapsed: CHINESE_MAX_ELAPSED,
    offset: chinese_offset,
};

const DANGI_RULES: ZoneRules = ZoneRules {
    name: "dangi",
    epoch: DANGI_EPOCH,
    max_elapsed: DANGI_MAX_ELAPSED,
    offset: dangi_offset,
};

const VIETNAMESE_RULES: ZoneRules = ZoneRules {
    name: "vietnamese",
    epoch: CHINESE_EPOCH,
    max_elapsed: CHINESE_MAX_ELAPSED,
    offset: vietnamese_offset,
};

const JAPANESE_RULES: ZoneRules = ZoneRules {
    name: "japanese-lunisolar",
    epoch: CHINESE_EPOCH,
    max_elapsed: CHINESE_MAX_ELAPSED,
    offset: japanese_offset,
};

/// Month structure of one lunisolar year.
///
/// Months are indexed here by ordinal position 1..=13 within the year;
/// [`leap_month`](Self::leap_month) reports which month number, if any,
/// occurs twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunisolarMonthTable {
    new_year: i64,
    next_new_year: i64,
    lengths: [u8; 13],
    month_count: u8,
    leap_ordinal: u8,
}

impl LunisolarMonthTable {
    /// Epoch day of the year's first day.
    pub fn new_year(&self) -> EpochDay {
        EpochDay::new(self.new_year)
    }

    /// Epoch day of the following year's first day.
    pub fn next_new_year(&self) -> EpochDay {
        EpochDay::new(self.next_new_year)
    }

    /// Number of months in the year, 12 or 13.
    pub fn month_count(&self) -> u8 {
        self.month_count
    }

    /// Month number that repeats as a leap month, if the year has one.
    pub fn leap_month(&self) -> Option<u8> {
        if self.leap_ordinal == NO_LEAP_ORDINAL {
            None
        } else {
            Some(self.leap_ordinal - 1)
        }
    }

    /// Total days in the year.
    pub fn days_in_year(&self) -> u16 {
        (self.next_new_year - self.new_year) as u16
    }

    /// Length in days of the given month, `None` if the year has no
    /// such month.
    pub fn length_of_month(&self, month: u8, leap_month: bool) -> Option<u8> {
        let ordinal = self.ordinal_for(month, leap_month)?;
        Some(self.lengths[(ordinal - 1) as usize])
    }

    /// Epoch day the given month begins on, `None` if the year has no
    /// such month.
    pub fn month_start(&self, month: u8, leap_month: bool) -> Option<EpochDay> {
        let ordinal = self.ordinal_for(month, leap_month)?;
        Some(EpochDay::new(self.new_year + self.days_before_ordinal(ordinal)))
    }

    /// One-based day of year, `None` if the day falls outside the year.
    pub fn day_of_year(&self, day: EpochDay) -> Option<u16> {
        if (self.new_year..self.next_new_year).contains(&day.get()) {
            Some((day.get() - self.new_year + 1) as u16)
        } else {
            None
        }
    }

    /// Ordinal position of a numbered month, `None` when the year lacks it.
    fn ordinal_for(&self, month: u8, leap_month: bool) -> Option<u8> {
        if month < 1 || month > 12 {
            return None;
        }
        if leap_month {
            if self.leap_ordinal != NO_LEAP_ORDINAL && month + 1 == self.leap_ordinal {
                Some(self.leap_ordinal)
            } else {
                None
            }
        } else if self.leap_ordinal != NO_LEAP_ORDINAL && month >= self.leap_ordinal {
            Some(month + 1)
        } else {
            Some(month)
        }
    }

    /// Month number and leap flag of an ordinal position.
    fn number_of(&self, ordinal: u8) -> (u8, bool) {
        if self.leap_ordinal == NO_LEAP_ORDINAL || ordinal < self.leap_ordinal {
            (ordinal, false)
        } else if ordinal == self.leap_ordinal {
            (ordinal - 1, true)
        } else {
            (ordinal - 1, false)
        }
    }

    fn days_before_ordinal(&self, ordinal: u8) -> i64 {
        self.lengths[..(ordinal - 1) as usize]
            .iter()
            .map(|&len| len as i64)
            .sum()
    }
}

/// East Asian lunisolar calendar engine for one zone.
pub struct Lunisolar {
    rules: ZoneRules,
    tables: RwLock<HashMap<i64, Arc<LunisolarMonthTable>>>,
}

impl Lunisolar {
    /// Chinese calendar on Beijing time.
    pub fn chinese() -> Self {
        Self::with_rules(CHINESE_RULES)
    }

    /// Korean Dangi calendar on Seoul time, Dangun-era epoch.
    pub fn dangi() -> Self {
        Self::with_rules(DANGI_RULES)
    }

    /// Vietnamese calendar on Hanoi time.
    pub fn vietnamese() -> Self {
        Self::with_rules(VIETNAMESE_RULES)
    }

    /// Pre-Meiji Japanese month structure on Tokyo time.
    pub fn japanese() -> Self {
        Self::with_rules(JAPANESE_RULES)
    }

    fn with_rules(rules: ZoneRules) -> Self {
        Self {
            rules,
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Zone name this engine was built for.
    pub fn name(&self) -> &'static str {
        self.rules.name
    }

    /// Month table for the year `(cycle, year_of_cycle)`.
    pub fn month_table(
        &self,
        cycle: i32,
        year_of_cycle: u8,
    ) -> Result<Arc<LunisolarMonthTable>, CalendarError> {
        check_year_of_cycle(year_of_cycle)?;
        self.table(elapsed_from_cycle(cycle, year_of_cycle))
    }

    /// Universal moment of local civil midnight opening the given day.
    fn midnight(&self, moment: f64) -> Moment {
        Moment::new(moment - (self.rules.offset)(moment.floor() as i64))
    }

    /// Standard-time day on which a new moon at or after `moment` falls.
    fn local_new_moon_on_or_after(&self, moment: f64) -> Result<i64, CalendarError> {
        let m = new_moon_at_or_after(self.midnight(moment))?.get();
        Ok((m + (self.rules.offset)(m.floor() as i64)).floor() as i64)
    }

    /// Standard-time day of the last new moon strictly before `moment`.
    fn local_new_moon_before(&self, moment: f64) -> Result<i64, CalendarError> {
        let m = new_moon_before(self.midnight(moment))?.get();
        Ok((m + (self.rules.offset)(m.floor() as i64)).floor() as i64)
    }

    /// Major solar term in force at local midnight of the fixed day.
    fn solar_term(&self, fixed: i64) -> u8 {
        let longitude = solar_longitude(julian_centuries(self.midnight(fixed as f64)));
        major_solar_term_from_longitude(longitude)
    }

    /// Fixed day of the winter solstice on or before `fixed`.
    fn winter_solstice_on_or_before(&self, fixed: i64) -> Result<i64, CalendarError> {
        let approx = estimate_prior_solar_longitude(WINTER, self.midnight(fixed as f64 + 1.0));
        let mut day = (approx.get() - 1.0).floor();
        for _ in 0..14 {
            if WINTER < solar_longitude(julian_centuries(self.midnight(day + 1.0))) {
                return Ok(day as i64);
            }
            day += 1.0;
        }
        Err(CalendarError::Internal(
            "winter solstice search did not converge",
        ))
    }

    /// New year of the sui opening at `prior_solstice`, and the solstice
    /// closing that sui.
    ///
    /// The month after the eleventh month is skipped when the sui holds
    /// twelve full lunations and that month or its successor carries no
    /// major solar term.
    fn new_year_in_sui(&self, prior_solstice: i64) -> Result<(i64, i64), CalendarError> {
        let prior = bind_winter_solstice(prior_solstice);
        let following = bind_winter_solstice(self.winter_solstice_on_or_before(prior + 370)?);
        let month_after_eleventh = self.local_new_moon_on_or_after(prior as f64 + 1.0)?;
        let month_after_twelfth =
            self.local_new_moon_on_or_after(month_after_eleventh as f64 + 1.0)?;
        let month_after_thirteenth =
            self.local_new_moon_on_or_after(month_after_twelfth as f64 + 1.0)?;
        let next_eleventh = self.local_new_moon_before(following as f64 + 1.0)?;
        let lunations =
            ((next_eleventh - month_after_eleventh) as f64 / MEAN_SYNODIC_MONTH).round() as i64;
        let term_a = self.solar_term(month_after_eleventh);
        let term_b = self.solar_term(month_after_twelfth);
        let term_c = self.solar_term(month_after_thirteenth);
        if lunations == 12 && (term_a == term_b || term_b == term_c) {
            Ok((month_after_thirteenth, following))
        } else {
            Ok((month_after_twelfth, following))
        }
    }

    /// New year on or before `fixed`, retrying from the previous sui when
    /// `fixed` precedes the first candidate.
    fn new_year_on_or_before(
        &self,
        fixed: i64,
        prior_solstice: i64,
    ) -> Result<(i64, i64), CalendarError> {
        let (new_year, following) = self.new_year_in_sui(prior_solstice)?;
        if fixed >= new_year {
            return Ok((new_year, following));
        }
        let prior = self.winter_solstice_on_or_before(fixed - 180)?;
        self.new_year_in_sui(prior)
    }

    /// Cached month table for an elapsed year.
    fn table(&self, elapsed: i64) -> Result<Arc<LunisolarMonthTable>, CalendarError> {
        if elapsed < MIN_ELAPSED || elapsed > self.rules.max_elapsed {
            return Err(CalendarError::range(
                "elapsed year",
                elapsed,
                MIN_ELAPSED,
                self.rules.max_elapsed,
            ));
        }
        if let Some(table) = self
            .tables
            .read()
            .map_err(|_| CalendarError::Internal("month table cache poisoned"))?
            .get(&elapsed)
        {
            return Ok(Arc::clone(table));
        }
        let built = Arc::new(self.build_table(elapsed)?);
        let mut cache = self
            .tables
            .write()
            .map_err(|_| CalendarError::Internal("month table cache poisoned"))?;
        Ok(Arc::clone(cache.entry(elapsed).or_insert(built)))
    }

    fn build_table(&self, elapsed: i64) -> Result<LunisolarMonthTable, CalendarError> {
        let mid_year =
            self.rules.epoch + (((elapsed - 1) as f64 + 0.5) * MEAN_TROPICAL_YEAR) as i64;
        let prior_solstice = self.winter_solstice_on_or_before(mid_year)?;
        let (new_year, next_solstice) = self.new_year_on_or_before(mid_year, prior_solstice)?;
        let (next_new_year, _) = self.new_year_in_sui(next_solstice)?;

        let mut lengths = [0u8; 13];
        let mut leap: Option<u8> = None;
        let mut current = new_year;
        for (i, slot) in lengths.iter_mut().take(12).enumerate() {
            let next = self.local_new_moon_on_or_after(current as f64 + 28.0)?;
            if leap.is_none() && self.solar_term(current) == self.solar_term(next) {
                leap = Some(i as u8 + 1);
            }
            *slot = (next - current) as u8;
            current = next;
        }
        if current == next_new_year {
            return Ok(LunisolarMonthTable {
                new_year,
                next_new_year,
                lengths,
                month_count: 12,
                leap_ordinal: NO_LEAP_ORDINAL,
            });
        }
        let next = self.local_new_moon_on_or_after(current as f64 + 28.0)?;
        lengths[12] = (next - current) as u8;
        // Thirteen months with no termless month among the first twelve
        // makes the thirteenth the leap month.
        Ok(LunisolarMonthTable {
            new_year,
            next_new_year,
            lengths,
            month_count: 13,
            leap_ordinal: leap.unwrap_or(13),
        })
    }

    /// Elapsed year containing an in-bounds day, with its table.
    fn year_containing(
        &self,
        day: i64,
    ) -> Result<(i64, Arc<LunisolarMonthTable>), CalendarError> {
        let mut elapsed = ((day - self.rules.epoch) as f64 / MEAN_TROPICAL_YEAR).floor() as i64 + 1;
        elapsed = elapsed.clamp(MIN_ELAPSED, self.rules.max_elapsed);
        // The mean-year estimate is off by at most one.
        for _ in 0..4 {
            let table = self.table(elapsed)?;
            if day < table.new_year {
                elapsed -= 1;
            } else if day >= table.next_new_year {
                elapsed += 1;
            } else {
                return Ok((elapsed, table));
            }
        }
        Err(CalendarError::Internal(
            "lunisolar year search did not converge",
        ))
    }
}

fn check_year_of_cycle(year: u8) -> Result<(), CalendarError> {
    if year < 1 || year > 60 {
        return Err(CalendarError::InvalidDate(format!(
            "year of cycle {year} not in 1..=60"
        )));
    }
    Ok(())
}

fn elapsed_from_cycle(cycle: i32, year_of_cycle: u8) -> i64 {
    (cycle as i64 - 1) * 60 + year_of_cycle as i64
}

/// The solstice always falls on December 20..23; pin the search result
/// into that window of its Gregorian year.
fn bind_winter_solstice(solstice: i64) -> i64 {
    let year = gregorian::year_from_epoch_day(EpochDay::new(solstice)) as i32;
    let lo = gregorian::epoch_day_from_ymd(year, 12, 20).get();
    let hi = gregorian::epoch_day_from_ymd(year, 12, 23).get();
    solstice.clamp(lo, hi)
}

impl CalendarEngine for Lunisolar {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        _leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        let (cycle, year, month, leap_month, day) = match fields {
            DateFields::CycleYmd {
                cycle,
                year,
                month,
                leap_month,
                day,
            } => (*cycle, *year, *month, *leap_month, *day),
            _ => {
                return Err(CalendarError::InvalidDate(format!(
                    "{} calendar takes cycle/year/month/leap/day fields, got {fields:?}",
                    self.rules.name
                )));
            }
        };
        check_year_of_cycle(year)?;
        if month < 1 || month > 12 {
            return Err(CalendarError::InvalidDate(format!(
                "month {month} not in 1..=12"
            )));
        }
        if day < 1 || day > 30 {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..=30"
            )));
        }
        let table = self.table(elapsed_from_cycle(cycle, year))?;
        let Some(ordinal) = table.ordinal_for(month, leap_month) else {
            return Err(CalendarError::InvalidDate(format!(
                "cycle {cycle} year {year} has no {}month {month}",
                if leap_month { "leap " } else { "" }
            )));
        };
        let len = table.lengths[(ordinal - 1) as usize];
        if day > len {
            return Err(CalendarError::InvalidDate(format!(
                "day {day} not in 1..={len} for {}month {month}",
                if leap_month { "leap " } else { "" }
            )));
        }
        Ok(EpochDay::new(
            table.new_year + table.days_before_ordinal(ordinal) + day as i64 - 1,
        ))
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        check_bounds(self, day)?;
        let (elapsed, table) = self.year_containing(day.get())?;
        let mut remaining = day.get() - table.new_year;
        let mut ordinal = 1u8;
        while remaining >= table.lengths[(ordinal - 1) as usize] as i64 {
            remaining -= table.lengths[(ordinal - 1) as usize] as i64;
            ordinal += 1;
        }
        let (month, leap_month) = table.number_of(ordinal);
        Ok(DateFields::CycleYmd {
            cycle: ((elapsed - 1).div_euclid(60) + 1) as i32,
            year: ((elapsed - 1).rem_euclid(60) + 1) as u8,
            month,
            leap_month,
            day: (remaining + 1) as u8,
        })
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        let (cycle, y) = year.cyclic(self.rules.name)?;
        check_year_of_cycle(y)?;
        let table = self.table(elapsed_from_cycle(cycle, y))?;
        Ok(table.month_count == 13)
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        let (cycle, y) = year.cyclic(self.rules.name)?;
        check_year_of_cycle(y)?;
        let table = self.table(elapsed_from_cycle(cycle, y))?;
        table.length_of_month(month, leap_month).ok_or_else(|| {
            CalendarError::InvalidDate(format!(
                "cycle {cycle} year {y} has no {}month {month}",
                if leap_month { "leap " } else { "" }
            ))
        })
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        let (cycle, y) = year.cyclic(self.rules.name)?;
        check_year_of_cycle(y)?;
        Ok(self.table(elapsed_from_cycle(cycle, y))?.days_in_year())
    }

    fn min_epoch_day(&self) -> EpochDay {
        EpochDay::new(self.rules.epoch)
    }

    fn max_epoch_day(&self) -> EpochDay {
        EpochDay::new(MAX_EPOCH_DAY)
    }
}
