use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{default_quests, default_rewards, JitterConfig, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(name = "queueflow", version, about = "Virtual queue simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scenario and report the outcome
    Run(RunArgs),
    /// Print the parsed scenario without running it
    ShowConfig(ConfigArgs),
    /// Project position and wait for a single customer
    Estimate(EstimateArgs),
    /// List the rewards available in the XP shop
    ListRewards(CatalogArgs),
    /// List the mini-quests customers can complete
    ListQuests(CatalogArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,
    #[arg(long, help = "Shorthand for --format summary")]
    pub summary: bool,
    #[arg(
        long,
        help = "Seed join jitter; omit to use the scenario's own jitter settings"
    )]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[arg(long, help = "Customers already waiting")]
    pub ahead: u32,
    #[arg(long = "avg-service", help = "Average service time per customer in minutes")]
    pub avg_service: u32,
    #[arg(long, default_value_t = 0, help = "Minutes elapsed since joining")]
    pub minutes: u32,
    #[arg(long, default_value_t = 0, help = "Extra minutes added to the estimate")]
    pub jitter: u32,
    #[arg(long, help = "Places skipped right after joining")]
    pub skip: Option<u32>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[arg(long, help = "Read the catalog from a scenario file instead of the defaults")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(Error::Cli(err.to_string())),
    }
}

pub fn load_config(path: &Path) -> Result<ScenarioConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Loads the scenario for `run` and applies command-line overrides.
pub fn build_config(args: &RunArgs) -> Result<(ScenarioConfig, FormatArg)> {
    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.jitter = JitterConfig::Seeded;
        config.seed = Some(seed);
    }
    let format = if args.summary {
        FormatArg::Summary
    } else {
        args.format.clone()
    };
    Ok((config, format))
}

/// Scenario catalogs, or the built-in ones when no file is given.
pub fn load_catalog(args: &CatalogArgs) -> Result<ScenarioConfig> {
    match &args.config {
        Some(path) => load_config(path),
        None => Ok(ScenarioConfig {
            queues: Vec::new(),
            tickets: Vec::new(),
            script: Vec::new(),
            quests: default_quests(),
            rewards: default_rewards(),
            starting_xp: 0,
            jitter: JitterConfig::Off,
            jitter_max_minutes: 0,
            seed: None,
            tick_interval_ms: 0,
            horizon_ms: 0,
        }),
    }
}
