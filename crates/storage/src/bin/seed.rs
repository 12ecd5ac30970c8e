use std::fmt;

use chrono::{DateTime, Days, Utc};
use storage::json::JsonStore;
use tracker_core::model::{Directory, EntryDate, MemberId, TeamProgress};

#[derive(Debug, Clone)]
struct Args {
    data_dir: String,
    interns: Vec<String>,
    days: u32,
    members: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDataDir { raw: String },
    InvalidDays { raw: String },
    InvalidMembers { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDataDir { raw } => write!(f, "invalid --data-dir value: {raw}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidMembers { raw } => write!(f, "invalid --members value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("TRACKER_DATA_DIR").unwrap_or_else(|_| "data".into());
        let mut interns: Vec<String> = std::env::var("TRACKER_INTERNS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let mut days = std::env::var("TRACKER_DAYS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut members = std::env::var("TRACKER_MEMBERS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(0);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(&mut args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataDir { raw: value });
                    }
                    data_dir = value;
                }
                "--interns" => {
                    let value = require_value(&mut args, "--interns")?;
                    interns = value
                        .split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "--days" => {
                    let value = require_value(&mut args, "--days")?;
                    days = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDays { raw: value })?;
                }
                "--members" => {
                    let value = require_value(&mut args, "--members")?;
                    members = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidMembers { raw: value })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value })?;
                    now = Some(parsed.with_timezone(&Utc));
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }

        if interns.is_empty() {
            interns = vec!["Alice".into(), "Bob".into(), "Cara".into()];
        }

        Ok(Self {
            data_dir,
            interns,
            days,
            members,
            now,
        })
    }
}

fn print_usage() {
    eprintln!(
        "usage: seed [--data-dir DIR] [--interns A,B,C] [--days N] [--members N] [--now RFC3339]"
    );
}

const SAMPLES: [&str; 5] = [
    "Read onboarding docs",
    "Paired on the data pipeline",
    "Fixed the export script",
    "Wrote tests for the parser",
    "Reviewed yesterday's feedback",
];

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let store = JsonStore::open(&args.data_dir)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let mut team = TeamProgress::new();
    for (who, intern) in args.interns.iter().enumerate() {
        for back in 0..args.days {
            let date = EntryDate::new(now.date_naive() - Days::new(u64::from(back)));
            let sample = SAMPLES[(who + back as usize) % SAMPLES.len()];
            team.set_entry(intern, date, date.weekday_label(), sample);
        }
    }
    store.write_progress(&team)?;

    if args.members > 0 {
        let mut directory = Directory::new();
        for n in 1..=args.members {
            directory.ensure_member(MemberId::new(n));
        }
        store.write_directory(&directory)?;
    }

    println!(
        "Seeded {} interns x {} days into {} ({} unclaimed members)",
        args.interns.len(),
        args.days,
        store.progress_path().display(),
        args.members
    );

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
