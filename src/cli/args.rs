use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-odds")]
#[command(about = "Historical weather odds for any place and day of the year")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Config file (TOML, JSON or YAML) with window and thresholds"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Location and day shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    #[arg(short, long, help = "Target date, YYYY-MM-DD or an ISO timestamp")]
    pub date: String,

    #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
    pub lon: f64,

    #[arg(
        long,
        help = "Year the window trails [default: current UTC year]"
    )]
    pub reference_year: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Exceedance odds, trends and per-year series for a day of the year
    Analyze {
        #[arg(short, long, help = "Archive JSON response file")]
        archive: PathBuf,

        #[command(flatten)]
        location: LocationArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Average conditions for a day of the year
    TypicalDay {
        #[arg(short, long, help = "Archive JSON response file")]
        archive: PathBuf,

        #[command(flatten)]
        location: LocationArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the archive request URL covering the analysis window
    Query {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long, help = "Timezone for the archive request [default: from config]")]
        timezone: Option<String>,

        #[arg(long, default_value = "false", help = "Ask the archive for imperial units")]
        imperial: bool,
    },
}
