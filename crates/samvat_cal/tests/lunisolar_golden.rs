//! Golden-value tests for the astronomical lunisolar calendars, on the
//! Reingold & Dershowitz sample days plus new-year dates published in
//! the ICU4C calendar tests.

use samvat_cal::gregorian::Gregorian;
use samvat_cal::lunisolar::Lunisolar;
use samvat_cal::{CalendarEngine, DateFields, EpochDay, Leniency};

const CHINESE: [(i64, i32, u8, u8, bool, u8); 33] = [
    (-214193, 35, 11, 6, false, 12),
    (-61387, 42, 9, 10, false, 27),
    (25469, 46, 7, 8, false, 4),
    (49217, 47, 12, 8, false, 9),
    (171307, 52, 46, 11, false, 20),
    (210155, 54, 33, 4, false, 5),
    (253427, 56, 31, 10, false, 15),
    (369740, 61, 50, 3, false, 7),
    (400085, 63, 13, 4, false, 24),
    (434355, 64, 47, 2, false, 9),
    (452605, 65, 37, 2, false, 9),
    (470160, 66, 25, 2, false, 23),
    (473837, 66, 35, 3, false, 9),
    (507850, 68, 8, 5, false, 2),
    (524156, 68, 53, 1, false, 8),
    (544676, 69, 49, 3, false, 4),
    (567118, 70, 50, 8, false, 2),
    (569477, 70, 57, 1, false, 29),
    (601716, 72, 25, 4, true, 20),
    (613424, 72, 57, 6, false, 5),
    (626596, 73, 33, 6, false, 6),
    (645554, 74, 25, 5, false, 5),
    (664224, 75, 16, 6, false, 12),
    (671401, 75, 36, 2, false, 13),
    (694799, 76, 40, 3, false, 22),
    (704424, 77, 6, 7, false, 21),
    (708842, 77, 18, 8, false, 9),
    (709409, 77, 20, 3, false, 15),
    (709580, 77, 20, 9, false, 9),
    (727274, 78, 9, 2, false, 14),
    (728714, 78, 13, 1, false, 7),
    (744313, 78, 55, 10, false, 14),
    (764652, 79, 51, 6, false, 7),
];

/// Chinese New Year in each Gregorian year 2015 through 2030.
const NEW_YEARS: [(i32, u8, u8); 16] = [
    (2015, 2, 19),
    (2016, 2, 8),
    (2017, 1, 28),
    (2018, 2, 16),
    (2019, 2, 5),
    (2020, 1, 25),
    (2021, 2, 12),
    (2022, 2, 1),
    (2023, 1, 22),
    (2024, 2, 10),
    (2025, 1, 29),
    (2026, 2, 17),
    (2027, 2, 6),
    (2028, 1, 26),
    (2029, 2, 13),
    (2030, 2, 3),
];

/// Seollal (Korean New Year) in each Gregorian year 2018 through 2030.
const SEOLLAL: [(i32, u8, u8); 13] = [
    (2018, 2, 16),
    (2019, 2, 5),
    (2020, 1, 25),
    (2021, 2, 12),
    (2022, 2, 1),
    (2023, 1, 22),
    (2024, 2, 10),
    (2025, 1, 29),
    (2026, 2, 17),
    (2027, 2, 7),
    (2028, 1, 27),
    (2029, 2, 13),
    (2030, 2, 3),
];

fn cyc(cycle: i32, year: u8, month: u8, leap_month: bool, day: u8) -> DateFields {
    DateFields::CycleYmd {
        cycle,
        year,
        month,
        leap_month,
        day,
    }
}

fn gregorian_day(year: i32, month: u8, day: u8) -> EpochDay {
    Gregorian
        .to_epoch_day(&DateFields::ymd(year, month, day), Leniency::Strict)
        .unwrap()
}

/// New year of the lunar year containing the given day.
fn new_year_containing(engine: &Lunisolar, day: EpochDay) -> EpochDay {
    let (cycle, year) = match engine.from_epoch_day(day).unwrap() {
        DateFields::CycleYmd { cycle, year, .. } => (cycle, year),
        other => panic!("unexpected field shape {other:?}"),
    };
    engine.month_table(cycle, year).unwrap().new_year()
}

#[test]
fn chinese_sample_days() {
    let engine = Lunisolar::chinese();
    for (rd, cycle, year, month, leap_month, day) in CHINESE {
        let want = cyc(cycle, year, month, leap_month, day);
        assert_eq!(
            engine.from_epoch_day(EpochDay::new(rd)).unwrap(),
            want,
            "from {rd}"
        );
        assert_eq!(
            engine.to_epoch_day(&want, Leniency::Strict).unwrap(),
            EpochDay::new(rd),
            "to cycle {cycle} year {year}"
        );
    }
}

/// Month boundaries across cycle 78 year 40, the leap year that began
/// on 2023-01-22; last-of-month and first-of-next are adjacent days.
#[test]
fn month_boundaries_across_a_leap_year() {
    let engine = Lunisolar::chinese();
    let cases = [
        (738_700, cyc(78, 40, 5, false, 12)),
        (738_718, cyc(78, 40, 5, false, 30)),
        (738_747, cyc(78, 40, 6, false, 29)),
        (738_748, cyc(78, 40, 7, false, 1)),
        (738_865, cyc(78, 40, 10, false, 29)),
        (738_895, cyc(78, 40, 11, false, 29)),
        (738_925, cyc(78, 40, 12, false, 30)),
    ];
    for (rd, fields) in cases {
        assert_eq!(engine.from_epoch_day(EpochDay::new(rd)).unwrap(), fields);
        assert_eq!(
            engine.to_epoch_day(&fields, Leniency::Strict).unwrap(),
            EpochDay::new(rd)
        );
    }
}

/// The last day of cycle 83 year 35 and the first of year 36 sit deep
/// in the twenty-third century.
#[test]
fn far_future_year_boundary() {
    let engine = Lunisolar::chinese();
    assert_eq!(
        engine.from_epoch_day(EpochDay::new(846_682)).unwrap(),
        cyc(83, 35, 12, false, 30)
    );
    assert_eq!(
        engine.from_epoch_day(EpochDay::new(846_683)).unwrap(),
        cyc(83, 36, 1, false, 1)
    );
}

#[test]
fn chinese_new_year_dates() {
    let engine = Lunisolar::chinese();
    for (year, month, day) in NEW_YEARS {
        let mid_year = gregorian_day(year, 6, 1);
        assert_eq!(
            new_year_containing(&engine, mid_year),
            gregorian_day(year, month, day),
            "new year of {year}"
        );
    }
}

/// Seollal mostly coincides with Chinese New Year, but the UTC+9 zone
/// shifts it a day later in 2027 and 2028.
#[test]
fn seollal_dates() {
    let chinese = Lunisolar::chinese();
    let dangi = Lunisolar::dangi();
    for (year, month, day) in SEOLLAL {
        let mid_year = gregorian_day(year, 6, 1);
        assert_eq!(
            new_year_containing(&dangi, mid_year),
            gregorian_day(year, month, day),
            "seollal of {year}"
        );
    }
    for year in [2027, 2028] {
        let mid_year = gregorian_day(year, 6, 1);
        assert_eq!(
            new_year_containing(&dangi, mid_year) - new_year_containing(&chinese, mid_year),
            1,
            "divergence in {year}"
        );
    }
}

/// Every month runs 29 or 30 days and every year total lands in the
/// lunisolar bands, with the thirteenth month present exactly when a
/// leap month is.
#[test]
fn month_and_year_lengths_stay_lunisolar() {
    let engine = Lunisolar::chinese();
    for year in 2015..=2030 {
        let mid_year = gregorian_day(year, 6, 1);
        let (cycle, cyclic_year) = match engine.from_epoch_day(mid_year).unwrap() {
            DateFields::CycleYmd { cycle, year, .. } => (cycle, year),
            other => panic!("unexpected field shape {other:?}"),
        };
        let table = engine.month_table(cycle, cyclic_year).unwrap();
        let mut total = 0u16;
        for month in 1..=12u8 {
            let len = table.length_of_month(month, false).unwrap();
            assert!(len == 29 || len == 30, "{year} month {month}: {len}");
            total += u16::from(len);
        }
        if let Some(leap) = table.leap_month() {
            assert_eq!(table.month_count(), 13, "{year}");
            total += u16::from(table.length_of_month(leap, true).unwrap());
            assert!(table.days_in_year() >= 383, "{year}");
        } else {
            assert_eq!(table.month_count(), 12, "{year}");
            assert!(table.days_in_year() <= 355, "{year}");
        }
        assert_eq!(total, table.days_in_year(), "{year}");
        assert_eq!(
            i64::from(table.days_in_year()),
            table.next_new_year() - table.new_year(),
            "{year}"
        );
    }
}
