//! New-moon series and conjunction search.
//!
//! Conjunction times come from a truncated ELP-style series indexed by
//! lunation number. Searches seed from the mean synodic rhythm and walk to
//! the exact lunation, so they stay correct even when the true conjunction
//! drifts half a day or more from the mean.

use crate::ephemeris::{J2000, universal_from_dynamical};
use samvat_core::{CalendarError, Moment};

/// Mean length of the synodic month in days.
pub const MEAN_SYNODIC_MONTH: f64 = 29.530588861;

/// Universal moment of lunation 0, the series anchor.
pub const LUNATION_ZERO: Moment = Moment::new(11.458922815770109);

/// Lunation index offset: index 24724 is the first new moon of 2000.
const LUNATION_J2000: f64 = 24724.0;

const NM_SINE_COEF: [f64; 24] = [
    -0.40720, 0.17241, 0.01608, 0.01039, 0.00739, -0.00514, 0.00208, -0.00111, -0.00057,
    0.00056, -0.00042, 0.00042, 0.00038, -0.00024, -0.00007, 0.00004, 0.00004, 0.00003,
    0.00003, -0.00003, 0.00003, -0.00002, -0.00002, 0.00002,
];
const NM_SOLAR_MULT: [f64; 24] = [
    0.0, 1.0, 0.0, 0.0, -1.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, -1.0, 2.0, 0.0, 3.0,
    1.0, 0.0, 1.0, -1.0, -1.0, 1.0, 0.0,
];
const NM_LUNAR_MULT: [f64; 24] = [
    1.0, 0.0, 2.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 2.0, 3.0, 0.0, 0.0, 2.0, 1.0, 2.0, 0.0, 1.0,
    2.0, 1.0, 1.0, 1.0, 3.0, 4.0,
];
const NM_MOON_ARG_MULT: [f64; 24] = [
    0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, -2.0, 2.0, 0.0, 0.0, 2.0, -2.0, 0.0, 0.0, -2.0, 0.0,
    -2.0, 2.0, 2.0, 2.0, -2.0, 0.0, 0.0,
];
/// Eccentricity power per series term: most terms are independent of the
/// solar eccentricity, a few scale by e or e^2.
const NM_ECC_POWER: [u8; 24] = [
    0, 1, 0, 0, 1, 1, 2, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
const NM_EXTRA_PHASE: [f64; 13] = [
    251.88, 251.83, 349.42, 84.66, 141.74, 207.14, 154.84, 34.52, 207.19, 291.34, 161.72,
    239.56, 331.55,
];
const NM_EXTRA_RATE: [f64; 13] = [
    0.016321, 26.651886, 36.412478, 18.206239, 53.303771, 2.453732, 7.306860, 27.261239,
    0.121824, 1.844379, 24.198154, 25.513099, 3.592518,
];
const NM_EXTRA_COEF: [f64; 13] = [
    0.000165, 0.000164, 0.000126, 0.000110, 0.000062, 0.000060, 0.000056, 0.000047, 0.000042,
    0.000040, 0.000037, 0.000035, 0.000023,
];

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

/// Universal moment of the `n`-th new moon after [`LUNATION_ZERO`].
pub fn nth_new_moon(n: i64) -> Moment {
    let k = n as f64 - LUNATION_J2000;
    let c = k / 1236.85;
    let approx = J2000.get()
        + (5.09766 + MEAN_SYNODIC_MONTH * 1236.85 * c + 0.00015437 * c * c
            - 0.00000015 * c * c * c
            + 0.00000000073 * c * c * c * c);
    let e = 1.0 - 0.002516 * c - 0.0000074 * c * c;
    let solar_anomaly =
        2.5534 + 1236.85 * 29.10535670 * c - 0.0000014 * c * c - 0.00000011 * c * c * c;
    let lunar_anomaly = 201.5643
        + 385.81693528 * 1236.85 * c
        + 0.0107582 * c * c
        + 0.00001238 * c * c * c
        - 0.000000058 * c * c * c * c;
    let moon_argument = 160.7108 + 390.67050284 * 1236.85 * c
        - 0.0016118 * c * c
        - 0.00000227 * c * c * c
        + 0.000000011 * c * c * c * c;
    let omega = 124.7746 - 1.56375588 * 1236.85 * c + 0.0020672 * c * c + 0.00000215 * c * c * c;

    let mut correction = -0.00017 * sin_deg(omega);
    for i in 0..24 {
        let ecc = match NM_ECC_POWER[i] {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        correction += NM_SINE_COEF[i]
            * ecc
            * sin_deg(
                NM_SOLAR_MULT[i] * solar_anomaly
                    + NM_LUNAR_MULT[i] * lunar_anomaly
                    + NM_MOON_ARG_MULT[i] * moon_argument,
            );
    }
    let extra = 0.000325 * sin_deg(299.77 + 132.8475848 * c - 0.009173 * c * c);
    let mut additional = 0.0;
    for i in 0..13 {
        additional += NM_EXTRA_COEF[i] * sin_deg(NM_EXTRA_PHASE[i] + NM_EXTRA_RATE[i] * k);
    }

    universal_from_dynamical(Moment::new(approx + correction + extra + additional))
}

/// Lunation index of the first new moon at or after `moment`.
///
/// Seeds two lunations below the mean-rhythm estimate and walks up; the
/// true conjunction never drifts more than about 0.6 days from the mean,
/// so the walk finishes within a handful of steps.
pub fn lunation_at_or_after(moment: Moment) -> Result<i64, CalendarError> {
    let mut n = ((moment - LUNATION_ZERO) / MEAN_SYNODIC_MONTH).round() as i64 - 2;
    for _ in 0..31 {
        if nth_new_moon(n) >= moment {
            return Ok(n);
        }
        n += 1;
    }
    Err(CalendarError::Internal("new moon search did not converge"))
}

/// Universal moment of the first new moon at or after `moment`.
pub fn new_moon_at_or_after(moment: Moment) -> Result<Moment, CalendarError> {
    Ok(nth_new_moon(lunation_at_or_after(moment)?))
}

/// Universal moment of the last new moon strictly before `moment`.
pub fn new_moon_before(moment: Moment) -> Result<Moment, CalendarError> {
    Ok(nth_new_moon(lunation_at_or_after(moment)? - 1))
}
