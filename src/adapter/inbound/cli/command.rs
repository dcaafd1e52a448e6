//! Command-line interface definitions.
//!
//! Defines the CLI structure for the hempboard application using `clap`.
//! The CLI supports subcommands for loading the seed catalog into the
//! warehouse, rendering dashboard sections, and diagnostic checks.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::loader::RefreshMode;

/// Hemp-industry economic indicators warehouse and dashboard CLI
#[derive(Parser, Debug)]
#[command(name = "hempboard")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the hempboard CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the seed catalog into the warehouse
    Load(LoadArgs),

    /// Render the dashboard or one of its sections
    Show(ShowArgs),

    /// Check warehouse connectivity
    Check(CheckArgs),
}

/// Refresh semantics for `hempboard load`.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LoadMode {
    /// Truncate each table before inserting
    #[default]
    Replace,
    /// Insert on top of existing rows (duplicates accumulate)
    Append,
}

impl From<LoadMode> for RefreshMode {
    fn from(mode: LoadMode) -> Self {
        match mode {
            LoadMode::Replace => RefreshMode::Replace,
            LoadMode::Append => RefreshMode::Append,
        }
    }
}

/// Dashboard sections for `hempboard show`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Every section in order
    #[default]
    All,
    /// Headline cards
    Overview,
    /// Production value series
    Production,
    /// Market size trend
    Market,
    /// National employment series
    Employment,
    /// Regulatory status tally and state map data
    Regulatory,
    /// State tax revenue ranking
    Tax,
    /// Consumer trend metrics
    Trends,
    /// Industry timeline
    Timeline,
}

/// Arguments for the `load` subcommand.
#[derive(Parser, Debug)]
pub struct LoadArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the warehouse database (overrides the config).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Path to the seed catalog.
    #[arg(long, default_value_os_t = crate::paths::default_seed())]
    pub seed: PathBuf,

    /// Refresh semantics.
    #[arg(long, value_enum, default_value_t = LoadMode::Replace)]
    pub mode: LoadMode,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Section to render.
    #[arg(value_enum, default_value_t = Section::All)]
    pub section: Section,

    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the warehouse database (overrides the config).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Bypass the retrieval cache for this render.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the warehouse database (overrides the config).
    #[arg(long)]
    pub db: Option<PathBuf>,
}
