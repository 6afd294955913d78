//! Solar longitude series and season search.
//!
//! The longitude of the sun is computed from a 49-term trigonometric fit
//! plus aberration and nutation, good to well under a minute of arc over
//! the supported calendar ranges. Seasonal events (solstices, equinoxes,
//! the major solar terms of the lunisolar calendars) are found by inverting
//! this series.

use crate::ephemeris::julian_centuries;
use samvat_core::Moment;

/// Mean length of the tropical year in days.
pub const MEAN_TROPICAL_YEAR: f64 = 365.242189;

/// Solar longitude of the winter solstice, degrees.
pub const WINTER: f64 = 270.0;
/// Solar longitude of the spring equinox, degrees.
pub const SPRING: f64 = 0.0;

const SOLAR_AMPLITUDE: [f64; 49] = [
    403406.0, 195207.0, 119433.0, 112392.0, 3891.0, 2819.0, 1721.0, 660.0, 350.0, 334.0,
    314.0, 268.0, 242.0, 234.0, 158.0, 132.0, 129.0, 114.0, 99.0, 93.0, 86.0, 78.0, 72.0,
    68.0, 64.0, 46.0, 38.0, 37.0, 32.0, 29.0, 28.0, 27.0, 27.0, 25.0, 24.0, 21.0, 21.0, 20.0,
    18.0, 17.0, 14.0, 13.0, 13.0, 13.0, 12.0, 10.0, 10.0, 10.0, 10.0,
];
const SOLAR_PHASE_DEG: [f64; 49] = [
    270.54861, 340.19128, 63.91854, 331.26220, 317.843, 86.631, 240.052, 310.26, 247.23,
    260.87, 297.82, 343.14, 166.79, 81.53, 3.50, 132.75, 182.95, 162.03, 29.8, 266.4, 249.2,
    157.6, 257.8, 185.1, 69.9, 8.0, 197.1, 250.4, 65.3, 162.7, 341.5, 291.6, 98.5, 146.7,
    110.0, 5.2, 342.6, 230.9, 256.1, 45.3, 242.9, 115.2, 151.8, 285.3, 53.3, 126.6, 205.7,
    85.9, 146.1,
];
const SOLAR_RATE: [f64; 49] = [
    0.9287892, 35999.1376958, 35999.4089666, 35998.7287385, 71998.20261, 71998.4403,
    36000.35726, 71997.4812, 32964.4678, -19.4410, 445267.1117, 45036.8840, 3.1008,
    22518.4434, -19.9739, 65928.9345, 9038.0293, 3034.7684, 33718.148, 3034.448, -2280.773,
    29929.992, 31556.493, 149.588, 9037.750, 107997.405, -4444.176, 151.771, 67555.316,
    31556.080, -4561.540, 107996.706, 1221.655, 62894.167, 31437.369, 14578.298, -31931.757,
    34777.243, 1221.999, 62894.511, -4442.039, 107997.909, 119.066, 16859.071, -4.578,
    26895.292, -39.127, 12297.536, 90073.778,
];

/// Scale factor for the summed series: 1e-6 degrees converted to radians
/// and back out through the final degree result.
const SERIES_SCALE: f64 = 0.000005729577951308232;

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

/// Longitudinal nutation in degrees at `c` julian centuries.
pub fn nutation(c: f64) -> f64 {
    let a = 124.90 - 1934.134 * c + 0.002063 * c * c;
    let b = 201.11 + 72001.5377 * c + 0.00057 * c * c;
    -0.004778 * sin_deg(a) - 0.0003667 * sin_deg(b)
}

/// Aberration of light in degrees at `c` julian centuries.
pub fn aberration(c: f64) -> f64 {
    0.0000974 * cos_deg(177.63 + 35999.01848 * c) - 0.005575
}

/// Apparent solar longitude in degrees, `[0, 360)`, at `c` julian centuries.
pub fn solar_longitude(c: f64) -> f64 {
    let mut sum = 0.0;
    for i in 0..49 {
        sum += SOLAR_AMPLITUDE[i] * sin_deg(SOLAR_PHASE_DEG[i] + SOLAR_RATE[i] * c);
    }
    let lambda = 282.7771834 + 36000.76953744 * c + SERIES_SCALE * sum;
    (lambda + aberration(c) + nutation(c)).rem_euclid(360.0)
}

/// The universal moment, at or before `moment`, when the solar longitude
/// last reached `angle` degrees.
///
/// One Newton-like refinement of the mean-rate estimate, then a clamp so
/// the result never passes `moment`. Accurate to well under a day, which is
/// all the day-granularity searches built on top of it require.
pub fn estimate_prior_solar_longitude(angle: f64, moment: Moment) -> Moment {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = moment - rate * (solar_longitude(julian_centuries(moment)) - angle).rem_euclid(360.0);
    let delta = (solar_longitude(julian_centuries(tau)) - angle + 180.0).rem_euclid(360.0) - 180.0;
    let refined = tau - rate * delta;
    if refined < moment { refined } else { moment }
}

/// UT moment at or after `moment` when the apparent solar longitude first
/// reaches `angle` degrees.
///
/// Mean-rate estimate bracketed five days either side, then bisection down
/// to about a second of time.
pub fn solar_longitude_after(angle: f64, moment: Moment) -> Moment {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = moment.get()
        + rate * (angle - solar_longitude(julian_centuries(moment))).rem_euclid(360.0);
    let mut lo = moment.get().max(tau - 5.0);
    let mut hi = tau + 5.0;
    while hi - lo >= 1e-5 {
        let mid = (lo + hi) / 2.0;
        let passed =
            (solar_longitude(julian_centuries(Moment::new(mid))) - angle).rem_euclid(360.0) < 180.0;
        if passed {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Moment::new((lo + hi) / 2.0)
}

/// Index 1-12 of the major solar term (zhongqi) a solar longitude falls in.
///
/// Term 1 begins at 330 degrees, term 2 at 0 degrees, and so on in 30
/// degree steps, matching the month numbering of the lunisolar calendars.
pub fn major_solar_term_from_longitude(degrees: f64) -> u8 {
    let term = (2 + (degrees as i64 as i32).div_euclid(30) - 1).rem_euclid(12) + 1;
    term as u8
}
