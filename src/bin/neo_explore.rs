use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use neo_explorer::config::Config;
use neo_explorer::db::NeoDatabase;
use neo_explorer::io::{loaders, writers};
use neo_explorer::models::CloseApproach;
use neo_explorer::services::ApproachFilter;

const USAGE: &str = "\
Explore close approaches of near-Earth objects.

Usage:
  neo-explore inspect (--designation D | --name N) [--verbose]
  neo-explore query [criteria] [--limit N] [--outfile FILE.csv|FILE.json]

Query criteria:
  --date YYYY-MM-DD            approach occurs on this date
  --start-date YYYY-MM-DD      approach occurs on or after this date
  --end-date YYYY-MM-DD        approach occurs on or before this date
  --min-distance AU            approach distance at least AU
  --max-distance AU            approach distance at most AU
  --min-velocity KM_S          approach velocity at least KM_S
  --max-velocity KM_S          approach velocity at most KM_S
  --min-diameter KM            NEO diameter at least KM
  --max-diameter KM            NEO diameter at most KM
  --hazardous | --not-hazardous

Common options:
  --neofile FILE.csv           NEO catalog (default from neo.toml)
  --cadfile FILE.json          close-approach data (default from neo.toml)
";

struct Cli {
    command: String,
    flags: Vec<(String, Option<String>)>,
}

impl Cli {
    /// Split argv into a command word and `--flag [value]` pairs.
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let command = match args.next() {
            Some(command) if !command.starts_with("--") => command,
            _ => bail!("expected a command (inspect or query)\n\n{}", USAGE),
        };

        let mut flags = Vec::new();
        let mut pending: Option<String> = None;
        for arg in args {
            if let Some(flag) = arg.strip_prefix("--") {
                if let Some(flag) = pending.take() {
                    flags.push((flag, None));
                }
                pending = Some(flag.to_string());
            } else {
                match pending.take() {
                    Some(flag) => flags.push((flag, Some(arg))),
                    None => bail!("unexpected argument `{}`\n\n{}", arg, USAGE),
                }
            }
        }
        if let Some(flag) = pending {
            flags.push((flag, None));
        }

        Ok(Self { command, flags })
    }

    fn value(&self, flag: &str) -> Option<&str> {
        self.flags
            .iter()
            .find(|(name, _)| name == flag)
            .and_then(|(_, value)| value.as_deref())
    }

    fn is_set(&self, flag: &str) -> bool {
        self.flags.iter().any(|(name, _)| name == flag)
    }

    fn parsed<T: std::str::FromStr>(&self, flag: &str) -> Result<Option<T>>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.value(flag) {
            Some(raw) => {
                let value = raw
                    .parse::<T>()
                    .with_context(|| format!("invalid value for --{}: `{}`", flag, raw))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn date(&self, flag: &str) -> Result<Option<NaiveDate>> {
        match self.value(flag) {
            Some(raw) => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid date for --{}: `{}`", flag, raw))?;
                Ok(Some(date))
            }
            None => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse(std::env::args().skip(1))?;
    let db = load(&cli)?;

    match cli.command.as_str() {
        "inspect" => inspect(&cli, &db),
        "query" => query(&cli, &db),
        other => bail!("unknown command `{}`\n\n{}", other, USAGE),
    }
}

fn load(cli: &Cli) -> Result<NeoDatabase> {
    let config = Config::from_default_location().context("Failed to load neo.toml")?;
    let neos_csv = cli
        .value("neofile")
        .map(PathBuf::from)
        .unwrap_or(config.data.neos_csv);
    let cad_json = cli
        .value("cadfile")
        .map(PathBuf::from)
        .unwrap_or(config.data.cad_json);
    loaders::load_database(&neos_csv, &cad_json)
}

fn inspect(cli: &Cli, db: &NeoDatabase) -> Result<()> {
    let neo = if let Some(designation) = cli.value("designation") {
        db.get_neo_by_designation(designation)
            .with_context(|| format!("no NEO with designation `{}`", designation))?
    } else if let Some(name) = cli.value("name") {
        db.get_neo_by_name(name)
            .with_context(|| format!("no NEO named `{}`", name))?
    } else {
        bail!("inspect requires --designation or --name\n\n{}", USAGE);
    };

    println!("{}", neo);
    if cli.is_set("verbose") {
        for &approach_id in &neo.approaches {
            println!("- {}", db.describe_approach(db.approach(approach_id)));
        }
    }
    Ok(())
}

fn query(cli: &Cli, db: &NeoDatabase) -> Result<()> {
    let filter = build_filter(cli)?;
    let limit = cli.parsed::<usize>("limit")?;

    let results: Vec<&CloseApproach> = match limit {
        Some(limit) => db.query(&filter).take(limit).collect(),
        None if cli.is_set("outfile") => db.query(&filter).collect(),
        // Interactive queries default to ten rows, like the source tool.
        None => db.query(&filter).take(10).collect(),
    };

    match cli.value("outfile") {
        Some(outfile) => {
            let path = PathBuf::from(outfile);
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("csv") => writers::write_csv(db, results.iter().copied(), &path)?,
                Some("json") => writers::write_json(db, results.iter().copied(), &path)?,
                _ => bail!("outfile must end in .csv or .json: `{}`", outfile),
            }
            println!("✓ Wrote {} approaches to {}", results.len(), path.display());
        }
        None => {
            if results.is_empty() {
                println!("No matching close approaches.");
            }
            for approach in results {
                println!("{}", db.describe_approach(approach));
            }
        }
    }
    Ok(())
}

fn build_filter(cli: &Cli) -> Result<ApproachFilter> {
    if cli.is_set("hazardous") && cli.is_set("not-hazardous") {
        bail!("--hazardous and --not-hazardous are mutually exclusive");
    }

    let mut filter = ApproachFilter::new();
    filter.date = cli.date("date")?;
    filter.start_date = cli.date("start-date")?;
    filter.end_date = cli.date("end-date")?;
    filter.min_distance = cli.parsed("min-distance")?;
    filter.max_distance = cli.parsed("max-distance")?;
    filter.min_velocity = cli.parsed("min-velocity")?;
    filter.max_velocity = cli.parsed("max-velocity")?;
    filter.min_diameter = cli.parsed("min-diameter")?;
    filter.max_diameter = cli.parsed("max-diameter")?;
    filter.hazardous = if cli.is_set("hazardous") {
        Some(true)
    } else if cli.is_set("not-hazardous") {
        Some(false)
    } else {
        None
    };
    Ok(filter)
}
