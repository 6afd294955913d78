//! Dynamical-time correction (Delta T) and julian-century scaling.
//!
//! Universal time follows the Earth's rotation; the solar and lunar series
//! are fitted in uniform dynamical time. The correction between the two is
//! an empirical piecewise fit per calendar-year band, expressed in days.

use samvat_core::Moment;
use samvat_core::gregorian::epoch_day_from_ymd;

/// Noon of 1 January 2000, the zero point of the century scale.
pub const J2000: Moment = Moment::new(730_120.5);

/// Estimated dynamical-minus-universal offset in days at `moment`.
pub fn ephemeris_correction(moment: Moment) -> f64 {
    let year = moment.get() / 365.2425;
    // Treat year 0 as band year 1; the fit bands are keyed by calendar year.
    let year_int = if year > 0.0 {
        (year + 1.0) as i64 as i32
    } else {
        year as i64 as i32
    };
    let fixed_mid_year = epoch_day_from_ymd(year_int, 7, 1);
    let c = (fixed_mid_year.get() as f64 - 693_596.0) / 36525.0;

    let y2000 = (year_int - 2000) as f64;
    let y1700 = (year_int - 1700) as f64;
    let y1600 = (year_int - 1600) as f64;
    let y1000 = ((year_int - 1000) as f64) / 100.0;
    let y0 = year_int as f64 / 100.0;
    let y1820 = ((year_int - 1820) as f64) / 100.0;

    if (2051..=2150).contains(&year_int) {
        (-20.0
            + 32.0 * ((year_int - 1820) as f64 * (year_int - 1820) as f64 / 10000.0)
            + 0.5628 * (2150 - year_int) as f64)
            / 86400.0
    } else if (2006..=2050).contains(&year_int) {
        (62.92 + 0.32217 * y2000 + 0.005589 * y2000 * y2000) / 86400.0
    } else if (1987..=2005).contains(&year_int) {
        (63.86 + 0.3345 * y2000 - 0.060374 * y2000 * y2000
            + 0.0017275 * y2000 * y2000 * y2000
            + 0.000651814 * y2000 * y2000 * y2000 * y2000
            + 0.00002373599 * y2000 * y2000 * y2000 * y2000 * y2000)
            / 86400.0
    } else if (1900..=1986).contains(&year_int) {
        -0.00002 + 0.000297 * c + 0.025184 * c * c - 0.181133 * c * c * c
            + 0.553040 * c * c * c * c
            - 0.861938 * c * c * c * c * c
            + 0.677066 * c * c * c * c * c * c
            - 0.212591 * c * c * c * c * c * c * c
    } else if (1800..=1899).contains(&year_int) {
        -0.000009
            + 0.003844 * c
            + 0.083563 * c * c
            + 0.865736 * c * c * c
            + 4.867575 * c * c * c * c
            + 15.845535 * c * c * c * c * c
            + 31.332267 * c * c * c * c * c * c
            + 38.291999 * c * c * c * c * c * c * c
            + 28.316289 * c * c * c * c * c * c * c * c
            + 11.636204 * c * c * c * c * c * c * c * c * c
            + 2.043794 * c * c * c * c * c * c * c * c * c * c
    } else if (1700..=1799).contains(&year_int) {
        (8.118780842 - 0.005092142 * y1700 + 0.003336121 * y1700 * y1700
            - 0.0000266484 * y1700 * y1700 * y1700)
            / 86400.0
    } else if (1600..=1699).contains(&year_int) {
        (120.0 - 0.9808 * y1600 - 0.01532 * y1600 * y1600
            + 0.000140272128 * y1600 * y1600 * y1600)
            / 86400.0
    } else if (500..=1599).contains(&year_int) {
        (1574.2 - 556.01 * y1000 + 71.23472 * y1000 * y1000 + 0.319781 * y1000 * y1000 * y1000
            - 0.8503463 * y1000 * y1000 * y1000 * y1000
            - 0.005050998 * y1000 * y1000 * y1000 * y1000 * y1000
            + 0.0083572073 * y1000 * y1000 * y1000 * y1000 * y1000 * y1000)
            / 86400.0
    } else if (-499..=499).contains(&year_int) {
        (10583.6 - 1014.41 * y0 + 33.78311 * y0 * y0
            - 5.952053 * y0 * y0 * y0
            - 0.1798452 * y0 * y0 * y0 * y0
            + 0.022174192 * y0 * y0 * y0 * y0 * y0
            + 0.0090316521 * y0 * y0 * y0 * y0 * y0 * y0)
            / 86400.0
    } else {
        (-20.0 + 32.0 * y1820 * y1820) / 86400.0
    }
}

/// Universal moment -> dynamical moment.
pub fn dynamical_from_universal(moment: Moment) -> Moment {
    moment + ephemeris_correction(moment)
}

/// Dynamical moment -> universal moment.
pub fn universal_from_dynamical(moment: Moment) -> Moment {
    moment - ephemeris_correction(moment)
}

/// Julian centuries of dynamical time since [`J2000`] for a universal moment.
pub fn julian_centuries(moment: Moment) -> f64 {
    (dynamical_from_universal(moment) - J2000) / 36525.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_around_j2000() {
        // Delta T near 2000 was about 64 seconds.
        let corr = ephemeris_correction(J2000);
        assert!(
            (corr - 0.0007391203703703703).abs() < 1e-15,
            "got {corr}"
        );
    }

    #[test]
    fn correction_antiquity() {
        let corr = ephemeris_correction(Moment::new(0.0));
        assert!((corr - 0.12249537037037038).abs() < 1e-15, "got {corr}");
    }

    #[test]
    fn universal_dynamical_near_inverse() {
        let m = Moment::new(738_500.25);
        let back = universal_from_dynamical(dynamical_from_universal(m));
        // The correction varies slowly, so the naive inverse is good to
        // far below a second.
        assert!((back - m).abs() < 1e-8);
    }

    #[test]
    fn centuries_at_j2000_is_zero() {
        let c = julian_centuries(J2000);
        assert!(c.abs() < 1e-3, "got {c}");
    }
}
