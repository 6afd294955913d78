//! Sexagenary (stem-branch) year names for the East Asian cycle.
//!
//! Ten celestial stems pair with twelve terrestrial branches; both advance
//! each year, so the combined cycle repeats every 60 years. Year 1 of a
//! cycle is jia-zi. Names are given in pinyin romanization.

use samvat_core::CalendarError;

/// The ten celestial stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CelestialStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All ten stems in order (index 0 = jia).
pub const ALL_STEMS: [CelestialStem; 10] = [
    CelestialStem::Jia,
    CelestialStem::Yi,
    CelestialStem::Bing,
    CelestialStem::Ding,
    CelestialStem::Wu,
    CelestialStem::Ji,
    CelestialStem::Geng,
    CelestialStem::Xin,
    CelestialStem::Ren,
    CelestialStem::Gui,
];

const ALL_STEM_NAMES: [&str; 10] = [
    "jia", "yi", "bing", "ding", "wu", "ji", "geng", "xin", "ren", "gui",
];

impl CelestialStem {
    /// Pinyin name of the stem.
    pub fn name(self) -> &'static str {
        ALL_STEM_NAMES[self.index() as usize]
    }

    /// 0-based index (jia=0 .. gui=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Jia => 0,
            Self::Yi => 1,
            Self::Bing => 2,
            Self::Ding => 3,
            Self::Wu => 4,
            Self::Ji => 5,
            Self::Geng => 6,
            Self::Xin => 7,
            Self::Ren => 8,
            Self::Gui => 9,
        }
    }
}

/// The twelve terrestrial branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TerrestrialBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All twelve branches in order (index 0 = zi).
pub const ALL_BRANCHES: [TerrestrialBranch; 12] = [
    TerrestrialBranch::Zi,
    TerrestrialBranch::Chou,
    TerrestrialBranch::Yin,
    TerrestrialBranch::Mao,
    TerrestrialBranch::Chen,
    TerrestrialBranch::Si,
    TerrestrialBranch::Wu,
    TerrestrialBranch::Wei,
    TerrestrialBranch::Shen,
    TerrestrialBranch::You,
    TerrestrialBranch::Xu,
    TerrestrialBranch::Hai,
];

const ALL_BRANCH_NAMES: [&str; 12] = [
    "zi", "chou", "yin", "mao", "chen", "si", "wu", "wei", "shen", "you", "xu", "hai",
];

impl TerrestrialBranch {
    /// Pinyin name of the branch.
    pub fn name(self) -> &'static str {
        ALL_BRANCH_NAMES[self.index() as usize]
    }

    /// 0-based index (zi=0 .. hai=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Zi => 0,
            Self::Chou => 1,
            Self::Yin => 2,
            Self::Mao => 3,
            Self::Chen => 4,
            Self::Si => 5,
            Self::Wu => 6,
            Self::Wei => 7,
            Self::Shen => 8,
            Self::You => 9,
            Self::Xu => 10,
            Self::Hai => 11,
        }
    }
}

/// Stem and branch for a year of the 60-year cycle (1..=60).
pub fn stem_branch_for_cycle_year(
    year: u8,
) -> Result<(CelestialStem, TerrestrialBranch), CalendarError> {
    if year < 1 || year > 60 {
        return Err(CalendarError::range("cycle year", year as i64, 1, 60));
    }
    let stem = ALL_STEMS[((year - 1) % 10) as usize];
    let branch = ALL_BRANCHES[((year - 1) % 12) as usize];
    Ok((stem, branch))
}

/// Hyphenated pinyin name for a year of the cycle, e.g. `"jia-zi"`.
pub fn cycle_year_name(year: u8) -> Result<String, CalendarError> {
    let (stem, branch) = stem_branch_for_cycle_year(year)?;
    Ok(format!("{}-{}", stem.name(), branch.name()))
}
