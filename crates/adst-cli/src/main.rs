//! `adst` CLI — inspect calendar conversion and automatic DST rules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Counter value -> calendar record
//! adst break 1772935200
//!
//! # Calendar record -> counter value
//! adst make 2026-03-08T02:00:00
//!
//! # Day of the week
//! adst dotw 2026-03-08
//!
//! # Resolved DST start/end for a year (built-in preset or JSON rules file)
//! adst transitions 2026 --preset eu
//! adst transitions 2026 --rules rules.json
//!
//! # Offset and display time for a standard-time instant
//! adst offset 2026-07-04T12:00:00 --mode auto
//!
//! # List built-in presets, as JSON
//! adst presets --json
//! ```

use adst_core::{
    dst_init, local_time, make_time, preset, CalendarRecord, DstMode, DstRules, PRESETS,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde::Serialize;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Parser)]
#[command(
    name = "adst",
    version,
    about = "RTC calendar conversion and automatic DST rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log rule resolution to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Break an elapsed-seconds counter into calendar fields
    Break {
        /// Seconds since 1970-01-01T00:00:00
        seconds: u32,
    },
    /// Convert a calendar date/time to an elapsed-seconds counter
    Make {
        /// Date and time as YYYY-MM-DDTHH:MM:SS
        datetime: String,
    },
    /// Day of the week for a date (0 = Sunday)
    Dotw {
        /// Date as YYYY-MM-DD
        date: String,
    },
    /// Resolve the DST start and end instants for a year
    Transitions {
        year: u16,
        #[command(flatten)]
        rules: RulesArgs,
    },
    /// DST offset and display time for a standard-time instant
    Offset {
        /// Standard time as YYYY-MM-DDTHH:MM:SS
        datetime: String,
        #[command(flatten)]
        rules: RulesArgs,
        /// DST setting: off, on or auto
        #[arg(long, default_value = "auto")]
        mode: String,
    },
    /// List the built-in rule presets
    Presets,
}

#[derive(Args)]
struct RulesArgs {
    /// Built-in rule set (see `adst presets`)
    #[arg(long, default_value = "us")]
    preset: String,
    /// JSON file with a rule set; takes precedence over --preset
    #[arg(long)]
    rules: Option<String>,
}

#[derive(Serialize)]
struct OffsetReport {
    standard: CalendarRecord,
    mode: DstMode,
    offset: u8,
    local: CalendarRecord,
}

#[derive(Serialize)]
struct PresetDto {
    name: &'static str,
    description: &'static str,
    rules: DstRules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Break { seconds } => {
            let record = adst_core::break_time(seconds);
            if cli.json {
                print_json(&record)?;
            } else {
                println!("{} {}", record, record.weekday_name());
            }
        }
        Commands::Make { datetime } => {
            let record = parse_record(&datetime)?;
            let seconds = make_time(&record);
            if cli.json {
                print_json(&serde_json::json!({ "seconds": seconds }))?;
            } else {
                println!("{}", seconds);
            }
        }
        Commands::Dotw { date } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;
            let year = u16::try_from(date.year())
                .with_context(|| format!("Year {} is out of range", date.year()))?;
            let weekday = adst_core::dotw(year, date.month() as u8, date.day() as u8);
            let name = adst_core::calendar::weekday_name(weekday);
            if cli.json {
                print_json(&serde_json::json!({ "weekday": weekday, "name": name }))?;
            } else {
                println!("{} {}", weekday, name);
            }
        }
        Commands::Transitions { year, rules } => {
            let rules = load_rules(&rules)?;
            let jan_first = CalendarRecord::new(year, 1, 1, 0, 0, 0)
                .with_context(|| format!("Year {} is outside the clock range", year))?;
            let transitions = dst_init(&jan_first, &rules);
            if cli.json {
                print_json(&transitions)?;
            } else {
                println!("{:<8}{}", "year:", transitions.year);
                println!("{:<8}{}", "rules:", rules);
                println!(
                    "{:<8}{} {} ({})",
                    "start:",
                    transitions.start,
                    transitions.start.weekday_name(),
                    transitions.start_time
                );
                println!(
                    "{:<8}{} {} ({})",
                    "end:",
                    transitions.end,
                    transitions.end.weekday_name(),
                    transitions.end_time
                );
                if transitions.wraps_year() {
                    println!("DST spans New Year");
                }
            }
        }
        Commands::Offset {
            datetime,
            rules,
            mode,
        } => {
            let rules = load_rules(&rules)?;
            let mode: DstMode = mode.parse().context("Invalid --mode")?;
            let standard = parse_record(&datetime)?;
            let offset = mode.offset(&standard, &rules);
            let local = local_time(make_time(&standard), &rules, mode);
            if cli.json {
                print_json(&OffsetReport {
                    standard,
                    mode,
                    offset,
                    local,
                })?;
            } else {
                println!("{:<8}{}", "mode:", mode);
                println!("{:<8}{}", "offset:", offset);
                println!("{:<8}{} {}", "local:", local, local.weekday_name());
            }
        }
        Commands::Presets => {
            if cli.json {
                let presets: Vec<PresetDto> = PRESETS
                    .iter()
                    .map(|p| PresetDto {
                        name: p.name,
                        description: p.description,
                        rules: p.rules,
                    })
                    .collect();
                print_json(&presets)?;
            } else {
                for p in PRESETS {
                    println!("{:<4}{:<48}{}", p.name, p.description, p.rules);
                }
            }
        }
    }

    Ok(())
}

/// Resolve the rule set from --rules (JSON file) or --preset.
fn load_rules(args: &RulesArgs) -> Result<DstRules> {
    if let Some(path) = args.rules.as_deref() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path))?;
        let rules: DstRules = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse rules file: {}", path))?;
        rules
            .validate()
            .with_context(|| format!("Rejected rules file: {}", path))?;
        debug!("loaded rules from {}: {}", path, rules);
        return Ok(rules);
    }

    match preset(&args.preset) {
        Some(rules) => {
            debug!("using preset {}: {}", args.preset, rules);
            Ok(rules)
        }
        None => {
            let names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
            anyhow::bail!(
                "Unknown preset: '{}'. Available presets: {}",
                args.preset,
                names.join(", ")
            );
        }
    }
}

fn parse_record(datetime: &str) -> Result<CalendarRecord> {
    let dt = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT).with_context(|| {
        format!(
            "Invalid date/time '{}', expected YYYY-MM-DDTHH:MM:SS",
            datetime
        )
    })?;
    CalendarRecord::try_from(dt).with_context(|| format!("Cannot represent {}", datetime))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
