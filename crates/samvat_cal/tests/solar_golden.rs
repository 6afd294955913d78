//! Golden-value tests for the Julian, Coptic, Ethiopian, and historic
//! cutover calendars, on the Reingold & Dershowitz sample days.

use samvat_cal::coptic::Coptic;
use samvat_cal::ethiopian::Ethiopian;
use samvat_cal::historic::Historic;
use samvat_cal::julian::Julian;
use samvat_cal::{CalendarEngine, CalendarError, DateFields, EpochDay, Leniency, YearFields};

const JULIAN: [(i64, i32, u8, u8); 33] = [
    (-214193, -586, 7, 30),
    (-61387, -168, 12, 8),
    (25469, 70, 9, 26),
    (49217, 135, 10, 3),
    (171307, 470, 1, 7),
    (210155, 576, 5, 18),
    (253427, 694, 11, 7),
    (369740, 1013, 4, 19),
    (400085, 1096, 5, 18),
    (434355, 1190, 3, 16),
    (452605, 1240, 3, 3),
    (470160, 1288, 3, 26),
    (473837, 1298, 4, 20),
    (507850, 1391, 6, 4),
    (524156, 1436, 1, 25),
    (544676, 1492, 3, 31),
    (567118, 1553, 9, 9),
    (569477, 1560, 2, 24),
    (601716, 1648, 5, 31),
    (613424, 1680, 6, 20),
    (626596, 1716, 7, 13),
    (645554, 1768, 6, 8),
    (664224, 1819, 7, 21),
    (671401, 1839, 3, 15),
    (694799, 1903, 4, 6),
    (704424, 1929, 8, 12),
    (708842, 1941, 9, 16),
    (709409, 1943, 4, 6),
    (709580, 1943, 9, 24),
    (727274, 1992, 3, 4),
    (728714, 1996, 2, 12),
    (744313, 2038, 10, 28),
    (764652, 2094, 7, 5),
];

const COPTIC: [(i64, i32, u8, u8); 33] = [
    (-214193, -870, 12, 6),
    (-61387, -451, 4, 12),
    (25469, -213, 1, 29),
    (49217, -148, 2, 5),
    (171307, 186, 5, 12),
    (210155, 292, 9, 23),
    (253427, 411, 3, 11),
    (369740, 729, 8, 24),
    (400085, 812, 9, 23),
    (434355, 906, 7, 20),
    (452605, 956, 7, 7),
    (470160, 1004, 7, 30),
    (473837, 1014, 8, 25),
    (507850, 1107, 10, 10),
    (524156, 1152, 5, 29),
    (544676, 1208, 8, 5),
    (567118, 1270, 1, 12),
    (569477, 1276, 6, 29),
    (601716, 1364, 10, 6),
    (613424, 1396, 10, 26),
    (626596, 1432, 11, 19),
    (645554, 1484, 10, 14),
    (664224, 1535, 11, 27),
    (671401, 1555, 7, 19),
    (694799, 1619, 8, 11),
    (704424, 1645, 12, 19),
    (708842, 1658, 1, 19),
    (709409, 1659, 8, 11),
    (709580, 1660, 1, 26),
    (727274, 1708, 7, 8),
    (728714, 1712, 6, 17),
    (744313, 1755, 3, 1),
    (764652, 1810, 11, 11),
];

const ETHIOPIAN: [(i64, i32, u8, u8); 33] = [
    (-214193, -594, 12, 6),
    (-61387, -175, 4, 12),
    (25469, 63, 1, 29),
    (49217, 128, 2, 5),
    (171307, 462, 5, 12),
    (210155, 568, 9, 23),
    (253427, 687, 3, 11),
    (369740, 1005, 8, 24),
    (400085, 1088, 9, 23),
    (434355, 1182, 7, 20),
    (452605, 1232, 7, 7),
    (470160, 1280, 7, 30),
    (473837, 1290, 8, 25),
    (507850, 1383, 10, 10),
    (524156, 1428, 5, 29),
    (544676, 1484, 8, 5),
    (567118, 1546, 1, 12),
    (569477, 1552, 6, 29),
    (601716, 1640, 10, 6),
    (613424, 1672, 10, 26),
    (626596, 1708, 11, 19),
    (645554, 1760, 10, 14),
    (664224, 1811, 11, 27),
    (671401, 1831, 7, 19),
    (694799, 1895, 8, 11),
    (704424, 1921, 12, 19),
    (708842, 1934, 1, 19),
    (709409, 1935, 8, 11),
    (709580, 1936, 1, 26),
    (727274, 1984, 7, 8),
    (728714, 1988, 6, 17),
    (744313, 2031, 3, 1),
    (764652, 2086, 11, 11),
];

fn assert_cases(engine: &dyn CalendarEngine, cases: &[(i64, i32, u8, u8)]) {
    for &(rd, year, month, day) in cases {
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
fn julian_sample_days() {
    assert_cases(&Julian, &JULIAN);
}

#[test]
fn coptic_sample_days() {
    assert_cases(&Coptic, &COPTIC);
}

#[test]
fn ethiopian_sample_days() {
    assert_cases(&Ethiopian::AMETE_MIHRET, &ETHIOPIAN);
}

/// Coptic 1723 is a leap year, so its epagomenal month reaches day 6;
/// the next day opens 1724.
#[test]
fn coptic_epagomenal_boundary() {
    let engine = Coptic;
    let last = engine
        .to_epoch_day(&DateFields::ymd(1723, 13, 6), Leniency::Strict)
        .unwrap();
    assert_eq!(last, EpochDay::new(732_930));
    assert_eq!(
        engine.from_epoch_day(last + 1).unwrap(),
        DateFields::ymd(1724, 1, 1)
    );
    // A common year stops at epagomenal day 5.
    assert!(
        engine
            .to_epoch_day(&DateFields::ymd(1724, 13, 6), Leniency::Strict)
            .is_err()
    );
}

/// The three cutover presets label the same continuous timeline with
/// different switch days: the last Julian-labelled day and the first
/// Gregorian-labelled day are adjacent epoch days.
#[test]
fn cutover_adjacency() {
    let cases = [
        (Historic::ROME, (1582, 10, 4), (1582, 10, 15), 577_736),
        (Historic::BRITAIN, (1752, 9, 2), (1752, 9, 14), 639_797),
        (Historic::RUSSIA, (1918, 1, 31), (1918, 2, 14), 700_214),
    ];
    for (engine, (jy, jm, jd), (gy, gm, gd), first_gregorian) in cases {
        let julian_side = engine
            .to_epoch_day(&DateFields::ymd(jy, jm, jd), Leniency::Strict)
            .unwrap();
        let gregorian_side = engine
            .to_epoch_day(&DateFields::ymd(gy, gm, gd), Leniency::Strict)
            .unwrap();
        assert_eq!(gregorian_side, EpochDay::new(first_gregorian));
        assert_eq!(gregorian_side - julian_side, 1, "gap at {first_gregorian}");
        assert_eq!(
            engine.from_epoch_day(julian_side).unwrap(),
            DateFields::ymd(jy, jm, jd)
        );
        assert_eq!(
            engine.from_epoch_day(gregorian_side).unwrap(),
            DateFields::ymd(gy, gm, gd)
        );
    }
}

#[test]
fn dropped_dates_never_existed() {
    for day in 5..15 {
        assert!(
            matches!(
                Historic::ROME.to_epoch_day(&DateFields::ymd(1582, 10, day), Leniency::Lax),
                Err(CalendarError::InvalidDate(_))
            ),
            "1582-10-{day}"
        );
    }
    for day in 3..14 {
        assert!(
            Historic::BRITAIN
                .to_epoch_day(&DateFields::ymd(1752, 9, day), Leniency::Strict)
                .is_err(),
            "1752-09-{day}"
        );
    }
}

/// Month and year lengths shrink by exactly the dropped span.
#[test]
fn cutover_lengths() {
    let cases = [
        (Historic::ROME, 1582, 10u8, 21u8, 355u16),
        (Historic::BRITAIN, 1752, 9, 19, 355),
        (Historic::RUSSIA, 1918, 2, 15, 352),
    ];
    for (engine, year, month, month_len, year_len) in cases {
        let y = YearFields::Standard(year);
        assert_eq!(
            engine.length_of_month(&y, month, false).unwrap(),
            month_len,
            "{year}-{month}"
        );
        assert_eq!(engine.length_of_year(&y).unwrap(), year_len, "{year}");
    }
}

/// Away from their cutovers the presets agree with the plain calendars.
#[test]
fn cutover_matches_plain_calendars_off_the_seam() {
    let rome = Historic::ROME;
    let modern = EpochDay::new(739_488);
    assert_eq!(
        rome.from_epoch_day(modern).unwrap(),
        DateFields::ymd(2025, 8, 25)
    );
    let medieval = EpochDay::new(544_676);
    assert_eq!(
        rome.from_epoch_day(medieval).unwrap(),
        Julian.from_epoch_day(medieval).unwrap()
    );
}

#[test]
fn julian_leap_rule_is_unconditional_div_4() {
    // 1700, 1800, 1900 leap in Julian, common in Gregorian.
    for year in [1700, 1900] {
        assert!(Julian.is_leap_year(&YearFields::Standard(year)).unwrap());
        assert_eq!(
            Julian
                .length_of_month(&YearFields::Standard(year), 2, false)
                .unwrap(),
            29
        );
    }
    assert!(!Julian.is_leap_year(&YearFields::Standard(1901)).unwrap());
}
