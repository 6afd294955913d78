//! Golden-value tests for the Hebrew arithmetic calendar.
//!
//! Sample days follow the Reingold & Dershowitz table; months are
//! numbered civilly (Tishri = 1).

use samvat_cal::hebrew::Hebrew;
use samvat_cal::{CalendarEngine, DateFields, EpochDay, Leniency, YearFields};

const HEBREW: [(i64, i32, u8, u8); 33] = [
    (-214193, 3174, 11, 10),
    (-61387, 3593, 3, 25),
    (25469, 3831, 1, 3),
    (49217, 3896, 1, 9),
    (171307, 4230, 4, 18),
    (210155, 4336, 9, 4),
    (253427, 4455, 2, 13),
    (369740, 4773, 8, 6),
    (400085, 4856, 9, 23),
    (434355, 4950, 7, 7),
    (452605, 5000, 7, 8),
    (470160, 5048, 7, 21),
    (473837, 5058, 8, 7),
    (507850, 5151, 10, 1),
    (524156, 5196, 5, 7),
    (544676, 5252, 8, 3),
    (567118, 5314, 1, 1),
    (569477, 5320, 6, 27),
    (601716, 5408, 9, 20),
    (613424, 5440, 11, 3),
    (626596, 5476, 11, 5),
    (645554, 5528, 10, 4),
    (664224, 5579, 11, 11),
    (671401, 5599, 7, 12),
    (694799, 5663, 7, 22),
    (704424, 5689, 12, 19),
    (708842, 5702, 1, 8),
    (709409, 5703, 8, 14),
    (709580, 5704, 1, 8),
    (727274, 5752, 7, 12),
    (728714, 5756, 6, 5),
    (744313, 5799, 2, 12),
    (764652, 5854, 11, 5),
];

#[test]
fn sample_days_both_directions() {
    let engine = Hebrew;
    for (rd, year, month, day) in HEBREW {
        let want = DateFields::ymd(year, month, day);
        assert_eq!(
            engine.from_epoch_day(EpochDay::new(rd)).unwrap(),
            want,
            "from {rd}"
        );
        assert_eq!(
            engine.to_epoch_day(&want, Leniency::Strict).unwrap(),
            EpochDay::new(rd),
            "to {year}-{month}-{day}"
        );
    }
}

#[test]
fn year_lengths_stay_in_the_six_forms() {
    let engine = Hebrew;
    for year in 5700..5800 {
        let len = engine.length_of_year(&YearFields::Standard(year)).unwrap();
        assert!(
            [353, 354, 355, 383, 384, 385].contains(&len),
            "year {year} has {len} days"
        );
    }
}

/// Heshvan and Kislev (civil months 2 and 3) absorb the postponements:
/// deficient years shorten Kislev, complete years lengthen Heshvan.
#[test]
fn heshvan_30_only_in_complete_years() {
    let engine = Hebrew;
    for year in 5700..5760 {
        let y = YearFields::Standard(year);
        let heshvan = engine.length_of_month(&y, 2, false).unwrap();
        let kislev = engine.length_of_month(&y, 3, false).unwrap();
        match engine.length_of_year(&y).unwrap() % 10 {
            3 => assert_eq!((heshvan, kislev), (29, 29), "deficient year {year}"),
            4 => assert_eq!((heshvan, kislev), (29, 30), "regular year {year}"),
            5 => assert_eq!((heshvan, kislev), (30, 30), "complete year {year}"),
            rem => panic!("year {year} length ends in {rem}"),
        }
        let fields = DateFields::ymd(year, 2, 30);
        assert_eq!(
            engine.to_epoch_day(&fields, Leniency::Strict).is_ok(),
            heshvan == 30,
            "Heshvan 30 in year {year}"
        );
    }
}

#[test]
fn leap_years_follow_the_metonic_cycle() {
    let engine = Hebrew;
    // Years 3, 6, 8, 11, 14, 17, 19 of each 19-year cycle are embolismic.
    for year in 5758..=5776 {
        let want = matches!((7 * year + 1) % 19, 0..=6);
        assert_eq!(
            engine.is_leap_year(&YearFields::Standard(year)).unwrap(),
            want,
            "leap status of {year}"
        );
    }
    // 5784 (2023-24) carried Adar I; 5785 did not.
    assert!(engine.is_leap_year(&YearFields::Standard(5784)).unwrap());
    assert!(!engine.is_leap_year(&YearFields::Standard(5785)).unwrap());
}

#[test]
fn daily_roundtrip_through_a_leap_year() {
    let engine = Hebrew;
    // 5784 began at RD 738779 (2023-09-16) and ran 383 days.
    let start = engine
        .to_epoch_day(&DateFields::ymd(5784, 1, 1), Leniency::Strict)
        .unwrap();
    let len = engine
        .length_of_year(&YearFields::Standard(5784))
        .unwrap();
    for offset in 0..i64::from(len) {
        let day = start + offset;
        let fields = engine.from_epoch_day(day).unwrap();
        assert_eq!(
            engine.to_epoch_day(&fields, Leniency::Strict).unwrap(),
            day,
            "roundtrip at {fields:?}"
        );
    }
}
