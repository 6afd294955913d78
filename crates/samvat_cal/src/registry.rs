//! Named calendar variants and their engines.
//!
//! The registry owns one engine per variant name. [`with_defaults`]
//! registers the full built-in set; callers add their own engines during
//! setup and then treat the registry as read-only. [`resolve`] also
//! understands the `:+N` / `:-N` suffix, wrapping the base engine in a
//! decorator that shifts its epoch-day mapping by up to three days.
//!
//! [`with_defaults`]: VariantRegistry::with_defaults
//! [`resolve`]: VariantRegistry::resolve

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use samvat_core::{CalendarError, EpochDay, Leniency};

use crate::coptic::Coptic;
use crate::date::{CalendarDate, CalendarEngine, DateFields, YearFields};
use crate::era::EraGregorian;
use crate::ethiopian::Ethiopian;
use crate::gregorian::Gregorian;
use crate::hebrew::Hebrew;
use crate::hijri::{ArithmeticHijri, HijriEpoch, LeapFamily};
use crate::historic::Historic;
use crate::indian::Indian;
use crate::julian::Julian;
use crate::lunisolar::Lunisolar;
use crate::offset::{GregorianOffset, ThaiSolar};
use crate::persian::Persian;
use crate::umalqura::Umalqura;

/// Largest day-adjustment magnitude a variant suffix may carry.
pub const MAX_ADJUSTMENT: i64 = 3;

/// Named calendar engines.
#[derive(Default)]
pub struct VariantRegistry {
    engines: HashMap<String, Arc<dyn CalendarEngine>>,
}

impl VariantRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    /// A registry with every built-in variant registered.
    ///
    /// Fails only if a packaged data table does not parse.
    pub fn with_defaults() -> Result<Self, CalendarError> {
        Self::with_overrides(None, None)
    }

    /// Like [`with_defaults`](Self::with_defaults), with the packaged
    /// Umm al-Qura and Nengo tables swapped for caller-supplied files.
    pub fn with_overrides(
        umalqura: Option<&Path>,
        eras: Option<&Path>,
    ) -> Result<Self, CalendarError> {
        let mut reg = Self::new();
        reg.register("gregorian", Arc::new(Gregorian))?;
        reg.register("julian", Arc::new(Julian))?;
        reg.register("historic-rome", Arc::new(Historic::ROME))?;
        reg.register("historic-britain", Arc::new(Historic::BRITAIN))?;
        reg.register("historic-russia", Arc::new(Historic::RUSSIA))?;
        reg.register("coptic", Arc::new(Coptic))?;
        reg.register("ethiopian", Arc::new(Ethiopian::AMETE_MIHRET))?;
        reg.register("ethiopian-amete-alem", Arc::new(Ethiopian::AMETE_ALEM))?;
        reg.register("hebrew", Arc::new(Hebrew))?;
        reg.register("islamic-civil", Arc::new(ArithmeticHijri::CIVIL))?;
        reg.register("islamic-tbla", Arc::new(ArithmeticHijri::TBLA))?;
        for family in [
            LeapFamily::West,
            LeapFamily::East,
            LeapFamily::Fatimid,
            LeapFamily::Habash,
        ] {
            for epoch in [HijriEpoch::Civil, HijriEpoch::Astronomical] {
                let name = format!("islamic-{}-{}", family.name(), epoch.name());
                reg.register(&name, Arc::new(ArithmeticHijri::new(family, epoch)))?;
            }
        }
        let uaq = match umalqura {
            Some(path) => Umalqura::from_path(path)?,
            None => Umalqura::packaged()?,
        };
        reg.register("islamic-umalqura", Arc::new(uaq))?;
        reg.register("persian", Arc::new(Persian::FAST))?;
        reg.register("persian-birashk", Arc::new(Persian::BIRASHK))?;
        reg.register("persian-astronomical", Arc::new(Persian::ASTRONOMICAL))?;
        reg.register("indian", Arc::new(Indian))?;
        reg.register("thai", Arc::new(ThaiSolar))?;
        reg.register("minguo", Arc::new(GregorianOffset::MINGUO))?;
        reg.register("juche", Arc::new(GregorianOffset::JUCHE))?;
        reg.register("chinese", Arc::new(Lunisolar::chinese()))?;
        reg.register("dangi", Arc::new(Lunisolar::dangi()))?;
        reg.register("vietnamese", Arc::new(Lunisolar::vietnamese()))?;
        reg.register("japanese-lunisolar", Arc::new(Lunisolar::japanese()))?;
        let nengo = match eras {
            Some(path) => EraGregorian::from_path("japanese", path)?,
            None => EraGregorian::japanese()?,
        };
        reg.register("japanese", Arc::new(nengo))?;
        Ok(reg)
    }

    /// Register an engine under a new name.
    ///
    /// Names must be non-empty and contain no `:`, which is reserved for
    /// the adjustment suffix. Registering a taken name is an error, never
    /// a replacement.
    pub fn register(
        &mut self,
        name: &str,
        engine: Arc<dyn CalendarEngine>,
    ) -> Result<(), CalendarError> {
        if name.is_empty() || name.contains(':') {
            return Err(CalendarError::VariantNotFound(format!(
                "'{name}' is not a registrable name"
            )));
        }
        if self.engines.contains_key(name) {
            return Err(CalendarError::VariantNotFound(format!(
                "'{name}' is already registered"
            )));
        }
        self.engines.insert(name.to_string(), engine);
        Ok(())
    }

    /// Engine for a variant name, applying any adjustment suffix.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn CalendarEngine>, CalendarError> {
        let (base, adjustment) = split_adjustment(name)?;
        let engine = self.engines.get(base).cloned().ok_or_else(|| {
            CalendarError::VariantNotFound(format!("no variant named '{base}'"))
        })?;
        Ok(match adjustment {
            0 => engine,
            offset => Arc::new(Adjusted {
                base: engine,
                offset,
            }),
        })
    }

    /// Registered variant names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate date fields against a variant and bind them as a date.
    ///
    /// The stored fields are the caller's, as accepted by the engine.
    /// Resolve through [`date_from_epoch_day`](Self::date_from_epoch_day)
    /// for the canonical spelling of a day.
    pub fn date_from_fields(
        &self,
        variant: &str,
        fields: DateFields,
        leniency: Leniency,
    ) -> Result<CalendarDate, CalendarError> {
        let engine = self.resolve(variant)?;
        let day = engine.to_epoch_day(&fields, leniency)?;
        Ok(CalendarDate::new(variant.to_string(), fields, day))
    }

    /// Canonical date for an epoch day under a variant.
    pub fn date_from_epoch_day(
        &self,
        variant: &str,
        day: EpochDay,
    ) -> Result<CalendarDate, CalendarError> {
        let engine = self.resolve(variant)?;
        let fields = engine.from_epoch_day(day)?;
        Ok(CalendarDate::new(variant.to_string(), fields, day))
    }

    /// The same epoch day spelled in another variant.
    pub fn convert(
        &self,
        date: &CalendarDate,
        target: &str,
    ) -> Result<CalendarDate, CalendarError> {
        self.date_from_epoch_day(target, date.epoch_day())
    }
}

/// Split `name[:+N|:-N]` into the base name and the day adjustment.
fn split_adjustment(name: &str) -> Result<(&str, i64), CalendarError> {
    let Some((base, suffix)) = name.split_once(':') else {
        return Ok((name, 0));
    };
    let signed = suffix.starts_with(['+', '-']);
    let Some(adjustment) = suffix.parse::<i64>().ok().filter(|_| signed) else {
        return Err(CalendarError::VariantNotFound(format!(
            "bad adjustment suffix ':{suffix}' in '{name}'"
        )));
    };
    if adjustment.abs() > MAX_ADJUSTMENT {
        return Err(CalendarError::range(
            "adjustment",
            adjustment,
            -MAX_ADJUSTMENT,
            MAX_ADJUSTMENT,
        ));
    }
    Ok((base, adjustment))
}

/// Day-adjustment decorator over a base engine.
///
/// Shifts the epoch-day side of every conversion by a fixed offset, so
/// the wrapped calendar's dates begin `offset` days later (or earlier)
/// on the shared timeline. Field-space queries pass through unchanged.
struct Adjusted {
    base: Arc<dyn CalendarEngine>,
    offset: i64,
}

impl CalendarEngine for Adjusted {
    fn to_epoch_day(
        &self,
        fields: &DateFields,
        leniency: Leniency,
    ) -> Result<EpochDay, CalendarError> {
        Ok(self.base.to_epoch_day(fields, leniency)? + self.offset)
    }

    fn from_epoch_day(&self, day: EpochDay) -> Result<DateFields, CalendarError> {
        self.base.from_epoch_day(day - self.offset)
    }

    fn is_leap_year(&self, year: &YearFields) -> Result<bool, CalendarError> {
        self.base.is_leap_year(year)
    }

    fn length_of_month(
        &self,
        year: &YearFields,
        month: u8,
        leap_month: bool,
    ) -> Result<u8, CalendarError> {
        self.base.length_of_month(year, month, leap_month)
    }

    fn length_of_year(&self, year: &YearFields) -> Result<u16, CalendarError> {
        self.base.length_of_year(year)
    }

    fn min_epoch_day(&self) -> EpochDay {
        self.base.min_epoch_day() + self.offset
    }

    fn max_epoch_day(&self) -> EpochDay {
        self.base.max_epoch_day() + self.offset
    }
}
