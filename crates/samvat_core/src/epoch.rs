//! Day-count and instant types used by every calendar.
//!
//! An [`EpochDay`] counts whole days on a single universal axis where day 1 is
//! Monday, 1 January of year 1 in the proleptic Gregorian calendar. A
//! [`Moment`] is the same axis with a fractional part for the time of day in
//! universal time.

use std::ops::{Add, Sub};

/// A whole day on the universal day axis (day 1 = 0001-01-01 Gregorian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochDay(i64);

impl EpochDay {
    /// Wrap a raw day number.
    pub const fn new(day: i64) -> Self {
        Self(day)
    }

    /// The raw day number.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// This day as a [`Moment`] at midnight universal time.
    pub const fn as_moment(self) -> Moment {
        Moment::new(self.0 as f64)
    }

    /// Signed day count from `other` to `self`.
    pub const fn since(self, other: EpochDay) -> i64 {
        self.0 - other.0
    }

    /// The weekday this day falls on.
    pub const fn weekday(self) -> Weekday {
        Weekday::from_index(self.0.rem_euclid(7) as u8)
    }
}

impl Add<i64> for EpochDay {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<i64> for EpochDay {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        Self(self.0 - rhs)
    }
}

impl Sub for EpochDay {
    type Output = i64;
    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

/// An instant on the universal day axis, in fractional days.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Moment(f64);

impl Moment {
    /// Wrap a raw fractional day value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw fractional day value.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// The day this instant falls on (floor of the fractional value).
    pub fn epoch_day(self) -> EpochDay {
        EpochDay(self.0.floor() as i64)
    }

    /// Fraction of the day elapsed since midnight, in `[0, 1)`.
    pub fn time_of_day(self) -> f64 {
        self.0 - self.0.floor()
    }
}

impl Add<f64> for Moment {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<f64> for Moment {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self(self.0 - rhs)
    }
}

impl Sub for Moment {
    type Output = f64;
    fn sub(self, rhs: Self) -> f64 {
        self.0 - rhs.0
    }
}

/// Day of the week. Index 0 = Sunday, matching `EpochDay::weekday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// All weekdays in index order.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// Weekday from index 0-6 (0 = Sunday). Indices wrap modulo 7.
    pub const fn from_index(index: u8) -> Self {
        ALL_WEEKDAYS[(index % 7) as usize]
    }

    /// Index 0-6, 0 = Sunday.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}
