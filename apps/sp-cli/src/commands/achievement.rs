// achievement.rs — Achievement subcommands: compute, rollup.
//
// Both read a JSON input file prepared by an export from the portal's
// database: an indicator (or a list of them) with its yearly targets and
// data entries. Only eligible entries for the requested year are counted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use serde::Deserialize;

use sp_achievement::{bucketize, compute_for_year, Achievement, AchievementStats};
use sp_model::{DataEntry, Indicator, YearlyTarget};

#[derive(Subcommand)]
pub enum AchievementCommands {
    /// Compute one indicator's achievement for a year.
    Compute {
        /// JSON file with { indicator, yearly_targets, entries }.
        #[arg(long)]
        input: PathBuf,
        /// Year under report.
        #[arg(long)]
        year: i32,
    },
    /// Roll many indicators up into bucket counts and an average.
    Rollup {
        /// JSON file with { indicators: [ { indicator, yearly_targets, entries } ] }.
        #[arg(long)]
        input: PathBuf,
        /// Year under report.
        #[arg(long)]
        year: i32,
    },
}

/// One indicator with its context, as exported from the portal.
#[derive(Deserialize)]
struct IndicatorInput {
    indicator: Indicator,
    #[serde(default)]
    yearly_targets: Vec<YearlyTarget>,
    #[serde(default)]
    entries: Vec<DataEntry>,
}

#[derive(Deserialize)]
struct RollupInput {
    indicators: Vec<IndicatorInput>,
}

pub fn execute(cmd: &AchievementCommands) -> anyhow::Result<()> {
    match cmd {
        AchievementCommands::Compute { input, year } => compute(input, *year),
        AchievementCommands::Rollup { input, year } => rollup(input, *year),
    }
}

fn compute_one(input: &IndicatorInput, year: i32) -> anyhow::Result<Achievement> {
    let eligible: Vec<DataEntry> = input
        .entries
        .iter()
        .filter(|e| e.period_year == year && e.status.is_eligible())
        .cloned()
        .collect();

    compute_for_year(&input.indicator, &input.yearly_targets, &eligible, year)
        .with_context(|| format!("indicator '{}'", input.indicator.name))
}

fn compute(input: &Path, year: i32) -> anyhow::Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let parsed: IndicatorInput = serde_json::from_str(&json)?;

    match compute_one(&parsed, year)? {
        Achievement::NoData => {
            println!("{}: —", parsed.indicator.name);
        }
        Achievement::Computed { actual, percent } => {
            println!(
                "{}: actual={actual}  achievement={percent:.1}%  bucket={}",
                parsed.indicator.name,
                bucketize(percent)
            );
        }
    }
    Ok(())
}

fn rollup(input: &Path, year: i32) -> anyhow::Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let parsed: RollupInput = serde_json::from_str(&json)?;

    let mut stats = AchievementStats::new();
    for item in &parsed.indicators {
        stats.record_achievement(&compute_one(item, year)?);
    }

    println!("indicators: {}", stats.total);
    println!("  exceeding_target: {}", stats.exceeding_target);
    println!("  excellent:        {}", stats.excellent);
    println!("  good:             {}", stats.good);
    println!("  moderate:         {}", stats.moderate);
    println!("  weak:             {}", stats.weak);
    println!("  very_weak:        {}", stats.very_weak);
    println!("  no data:          {}", stats.no_data);
    match stats.average_percent() {
        Some(avg) => println!("average achievement: {avg:.1}%"),
        None => println!("average achievement: —"),
    }
    Ok(())
}
