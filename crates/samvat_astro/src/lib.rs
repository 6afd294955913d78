//! Astronomical primitives for the astronomical calendars.
//!
//! This crate provides:
//! - Dynamical-time (Delta T) correction and julian-century scaling
//! - Apparent solar longitude and seasonal-event estimation
//! - New-moon (lunar conjunction) series and searches
//!
//! Everything here works in universal time on the shared day axis; time
//! zone policy belongs to the calendars that consume these series.

pub mod ephemeris;
pub mod lunar;
pub mod solar;

pub use ephemeris::{J2000, dynamical_from_universal, julian_centuries, universal_from_dynamical};
pub use lunar::{
    LUNATION_ZERO, MEAN_SYNODIC_MONTH, new_moon_at_or_after, new_moon_before, nth_new_moon,
};
pub use solar::{
    MEAN_TROPICAL_YEAR, SPRING, WINTER, estimate_prior_solar_longitude,
    major_solar_term_from_longitude, solar_longitude, solar_longitude_after,
};
