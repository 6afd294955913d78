use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use samvat_astro::{
    WINTER, julian_centuries, major_solar_term_from_longitude, new_moon_at_or_after,
    new_moon_before, solar_longitude, solar_longitude_after,
};
use samvat_cal::era::EraGregorian;
use samvat_cal::gregorian::Gregorian;
use samvat_cal::sexagenary::cycle_year_name;
use samvat_cal::{
    CalendarEngine, CalendarError, DateFields, EpochDay, Leniency, Moment, VariantRegistry,
    YearFields,
};
use samvat_core::gregorian::ymd_from_epoch_day;

#[derive(Parser)]
#[command(name = "samvat", about = "Samvat calendar CLI")]
struct Cli {
    /// Replace the packaged Umm al-Qura table with this file
    #[arg(long, value_name = "PATH", global = true)]
    umalqura: Option<PathBuf>,
    /// Replace the packaged Japanese era table with this file
    #[arg(long = "eras", value_name = "PATH", global = true)]
    eras_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a date between variants
    Convert {
        /// Date fields: Y-M-D, ERA:Y-M-D, or CYCLE:Y-M-D (month suffix L = leap)
        date: String,
        /// Source variant, with optional :+N/:-N day adjustment
        #[arg(long)]
        from: String,
        /// Target variant
        #[arg(long)]
        to: String,
        /// Validation mode: strict, smart, or lax
        #[arg(long, default_value = "smart")]
        leniency: String,
    },
    /// Epoch day of a date
    EpochDay {
        /// Date fields: Y-M-D, ERA:Y-M-D, or CYCLE:Y-M-D (month suffix L = leap)
        date: String,
        /// Variant the fields are spelled in
        #[arg(long)]
        variant: String,
        /// Validation mode: strict, smart, or lax
        #[arg(long, default_value = "smart")]
        leniency: String,
    },
    /// Date fields of an epoch day
    Fields {
        /// Epoch day (RD; day 1 = Gregorian 0001-01-01)
        epoch_day: i64,
        /// Variant to spell the day in
        #[arg(long)]
        variant: String,
    },
    /// Leap flag, year length, and month lengths of a year
    Info {
        /// Year: Y, ERA:Y, or CYCLE:Y
        year: String,
        /// Variant to query
        #[arg(long)]
        variant: String,
    },
    /// New moons bracketing a Gregorian date
    NewMoon {
        /// Gregorian date (Y-M-D)
        date: String,
    },
    /// Winter solstice of a Gregorian year
    Solstice {
        /// Gregorian year
        year: i32,
    },
    /// Major solar term at a Gregorian date (midnight UT)
    Term {
        /// Gregorian date (Y-M-D)
        date: String,
    },
    /// List the Japanese eras, or resolve the era at a date
    Eras {
        /// Gregorian date (Y-M-D) to resolve instead of listing
        #[arg(long)]
        at: Option<String>,
    },
    /// List registered variants and their supported ranges
    Variants,
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            date,
            from,
            to,
            leniency,
        } => {
            let registry = build_registry(&cli);
            let fields = parse_fields(date);
            let source = check(
                registry.date_from_fields(from, fields, parse_leniency(leniency)),
                from,
            );
            let target = check(registry.convert(&source, to), to);
            println!(
                "{} {} (epoch day {}, {})",
                to,
                format_fields(target.fields()),
                target.epoch_day().get(),
                target.weekday().name()
            );
        }

        Commands::EpochDay {
            date,
            variant,
            leniency,
        } => {
            let registry = build_registry(&cli);
            let fields = parse_fields(date);
            let bound = check(
                registry.date_from_fields(variant, fields, parse_leniency(leniency)),
                variant,
            );
            println!(
                "epoch day {} ({})",
                bound.epoch_day().get(),
                bound.weekday().name()
            );
        }

        Commands::Fields { epoch_day, variant } => {
            let registry = build_registry(&cli);
            let date = check(
                registry.date_from_epoch_day(variant, EpochDay::new(*epoch_day)),
                variant,
            );
            println!(
                "{} {} ({})",
                variant,
                format_fields(date.fields()),
                date.weekday().name()
            );
        }

        Commands::Info { year, variant } => {
            let registry = build_registry(&cli);
            let engine = check(registry.resolve(variant), variant);
            let y = parse_year(year);
            let leap = check(engine.is_leap_year(&y), variant);
            let days = check(engine.length_of_year(&y), variant);
            println!(
                "{variant} year {year}: {}, {days} days",
                if leap { "leap" } else { "common" }
            );
            for month in 1u8..=13 {
                match engine.length_of_month(&y, month, false) {
                    Ok(len) => println!("  month {month:02}: {len} days"),
                    Err(_) => break,
                }
                if let Ok(len) = engine.length_of_month(&y, month, true) {
                    println!("  month {month:02} (leap): {len} days");
                }
            }
        }

        Commands::NewMoon { date } => {
            let midnight = parse_gregorian(date).as_moment();
            let prev = check(new_moon_before(midnight), "new moon search");
            let next = check(new_moon_at_or_after(midnight), "new moon search");
            println!("last new moon before {date}:       {}", format_moment(prev));
            println!("first new moon on or after {date}: {}", format_moment(next));
        }

        Commands::Solstice { year } => {
            let dec1 = check(
                Gregorian.to_epoch_day(&DateFields::ymd(*year, 12, 1), Leniency::Strict),
                "gregorian",
            );
            let moment = solar_longitude_after(WINTER, dec1.as_moment());
            println!("winter solstice {year}: {}", format_moment(moment));
        }

        Commands::Term { date } => {
            let midnight = parse_gregorian(date).as_moment();
            let longitude = solar_longitude(julian_centuries(midnight));
            let term = major_solar_term_from_longitude(longitude);
            println!("{date}: major solar term {term} (solar longitude {longitude:.3} deg)");
        }

        Commands::Eras { at } => match at {
            Some(date) => {
                let registry = build_registry(&cli);
                let day = parse_gregorian(date);
                let spelled = check(registry.date_from_epoch_day("japanese", day), "japanese");
                match spelled.fields() {
                    DateFields::EraYmd { era, year, .. } => println!("{date}: {era} {year}"),
                    _ => println!("{date}: before the first era"),
                }
            }
            None => {
                let engine = load_era_engine(&cli);
                for entry in engine.table().entries() {
                    let (y, m, d) = ymd_from_epoch_day(entry.start());
                    println!("{:10} from {y}-{m:02}-{d:02}", entry.name());
                }
            }
        },

        Commands::Variants => {
            let registry = build_registry(&cli);
            for name in registry.names() {
                let engine = check(registry.resolve(name), name);
                let (ly, lm, ld) = ymd_from_epoch_day(engine.min_epoch_day());
                let (hy, hm, hd) = ymd_from_epoch_day(engine.max_epoch_day());
                println!(
                    "{name:24} epoch days {}..{} (gregorian {ly}-{lm:02}-{ld:02} .. {hy}-{hm:02}-{hd:02})",
                    engine.min_epoch_day().get(),
                    engine.max_epoch_day().get()
                );
            }
        }
    }
}

fn build_registry(cli: &Cli) -> VariantRegistry {
    VariantRegistry::with_overrides(cli.umalqura.as_deref(), cli.eras_file.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Failed to build variant registry: {e}");
            process::exit(1);
        })
}

fn load_era_engine(cli: &Cli) -> EraGregorian {
    let result = match &cli.eras_file {
        Some(path) => EraGregorian::from_path("japanese", path),
        None => EraGregorian::japanese(),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Failed to load era table: {e}");
        process::exit(1);
    })
}

fn check<T>(result: Result<T, CalendarError>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("{what}: {e}");
        process::exit(1);
    })
}

fn parse_leniency(s: &str) -> Leniency {
    match s.to_lowercase().as_str() {
        "strict" => Leniency::Strict,
        "smart" => Leniency::Smart,
        "lax" => Leniency::Lax,
        _ => {
            eprintln!("Invalid leniency: {s}");
            eprintln!("Valid: strict, smart (default), lax");
            process::exit(1);
        }
    }
}

fn parse_fields(s: &str) -> DateFields {
    try_parse_fields(s).unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e}");
        eprintln!("Forms: Y-M-D, ERA:Y-M-D, CYCLE:Y-M-D (month suffix L marks a leap month)");
        process::exit(1);
    })
}

fn try_parse_fields(s: &str) -> Result<DateFields, String> {
    let (prefix, rest) = match s.split_once(':') {
        Some((p, r)) => (Some(p), r),
        None => (None, s),
    };
    let (year_str, month_raw, day_str) = split_ymd(rest)?;
    let (month_str, leap_month) = match month_raw.strip_suffix(['L', 'l']) {
        Some(bare) => (bare, true),
        None => (month_raw, false),
    };
    let month: u8 = month_str.parse().map_err(|_| format!("bad month '{month_str}'"))?;
    let day: u8 = day_str.parse().map_err(|_| format!("bad day '{day_str}'"))?;
    let year: i32 = year_str.parse().map_err(|_| format!("bad year '{year_str}'"))?;
    match prefix {
        Some(p) => match p.parse::<i32>() {
            Ok(cycle) => {
                let year = u8::try_from(year).map_err(|_| "cycle years run 1-60".to_string())?;
                Ok(DateFields::CycleYmd {
                    cycle,
                    year,
                    month,
                    leap_month,
                    day,
                })
            }
            Err(_) if leap_month => Err("leap months need the CYCLE:Y-M-D form".to_string()),
            Err(_) => Ok(DateFields::era_ymd(p, year, month, day)),
        },
        None if leap_month => Err("leap months need the CYCLE:Y-M-D form".to_string()),
        None => Ok(DateFields::ymd(year, month, day)),
    }
}

/// Split `Y-M-D` from the right so a negative year keeps its sign.
fn split_ymd(s: &str) -> Result<(&str, &str, &str), String> {
    let (rest, day) = s.rsplit_once('-').ok_or("expected Y-M-D")?;
    let (year, month) = rest.rsplit_once('-').ok_or("expected Y-M-D")?;
    if year.is_empty() {
        return Err("expected Y-M-D".to_string());
    }
    Ok((year, month, day))
}

fn parse_year(s: &str) -> YearFields {
    try_parse_year(s).unwrap_or_else(|e| {
        eprintln!("Invalid year '{s}': {e}");
        eprintln!("Forms: Y, ERA:Y, CYCLE:Y");
        process::exit(1);
    })
}

fn try_parse_year(s: &str) -> Result<YearFields, String> {
    match s.split_once(':') {
        None => {
            let year: i32 = s.parse().map_err(|_| format!("bad year '{s}'"))?;
            Ok(YearFields::Standard(year))
        }
        Some((p, y)) => match p.parse::<i32>() {
            Ok(cycle) => {
                let year: u8 = y.parse().map_err(|_| "cycle years run 1-60".to_string())?;
                Ok(YearFields::Cycle { cycle, year })
            }
            Err(_) => {
                let year: i32 = y.parse().map_err(|_| format!("bad year '{y}'"))?;
                Ok(YearFields::Era {
                    era: p.to_string(),
                    year,
                })
            }
        },
    }
}

fn parse_gregorian(s: &str) -> EpochDay {
    let fields = parse_fields(s);
    if !matches!(fields, DateFields::Ymd { .. }) {
        eprintln!("Invalid date '{s}': expected a plain Gregorian Y-M-D");
        process::exit(1);
    }
    Gregorian
        .to_epoch_day(&fields, Leniency::Strict)
        .unwrap_or_else(|e| {
            eprintln!("Invalid date '{s}': {e}");
            process::exit(1);
        })
}

fn format_fields(fields: &DateFields) -> String {
    match fields {
        DateFields::Ymd { year, month, day } => format!("{year}-{month:02}-{day:02}"),
        DateFields::EraYmd {
            era,
            year,
            month,
            day,
        } => format!("{era} {year}-{month:02}-{day:02}"),
        DateFields::CycleYmd {
            cycle,
            year,
            month,
            leap_month,
            day,
        } => {
            let name = cycle_year_name(*year).unwrap_or_else(|_| "?".to_string());
            let leap = if *leap_month { " (leap)" } else { "" };
            format!("cycle {cycle} year {year} ({name}), month {month}{leap}, day {day}")
        }
    }
}

/// Render a UT moment as a Gregorian date plus clock time.
fn format_moment(moment: Moment) -> String {
    let mut day = moment.get().floor() as i64;
    let mut minutes = ((moment.get() - day as f64) * 1440.0).round() as u32;
    if minutes == 1440 {
        day += 1;
        minutes = 0;
    }
    let (y, m, d) = ymd_from_epoch_day(EpochDay::new(day));
    format!("{y}-{m:02}-{d:02} {:02}:{:02} UT", minutes / 60, minutes % 60)
}
