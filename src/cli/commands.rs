use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::Level;

use crate::analyzers::{AnalysisRequest, WeatherAnalyzer};
use crate::cli::args::{Cli, Commands, LocationArgs, OutputFormat};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::Category;
use crate::readers::ArchiveReader;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = AnalysisConfig::load(cli.config.as_deref())?;
    let analyzer = WeatherAnalyzer::with_config(config);

    match cli.command {
        Commands::Analyze {
            archive,
            location,
            format,
        } => {
            let request = build_request(&location)?;
            let series = ArchiveReader::new().read_file(&archive)?;
            tracing::debug!(
                archive = %archive.display(),
                records = series.len(),
                "Read archive"
            );

            let response = analyzer.analyze(&request, &series)?;
            match format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Text => {
                    let resolved = analyzer.resolve(&request)?;
                    println!(
                        "{} ({}) at {}",
                        resolved.day,
                        resolved.day.season().display_name(),
                        request.coordinate
                    );
                    println!(
                        "Years {} to {}\n",
                        resolved.window.start_year, resolved.window.end_year
                    );
                    println!("{}", response.summary());

                    let thresholds = &analyzer.config().thresholds;
                    println!("Criteria:");
                    for category in Category::ALL {
                        println!(
                            "- {}: {} ({})",
                            category.label(),
                            category.description(thresholds),
                            category.source()
                        );
                    }
                }
            }
        }

        Commands::TypicalDay {
            archive,
            location,
            format,
        } => {
            let request = build_request(&location)?;
            let series = ArchiveReader::new().read_file(&archive)?;

            let summary = analyzer.typical_day(&request, &series)?;
            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Text => println!("{}", summary.summary()),
            }
        }

        Commands::Query {
            location,
            timezone,
            imperial,
        } => {
            let request = build_request(&location)?;

            let mut query = analyzer.query(&request)?.with_imperial_units(imperial);
            if let Some(timezone) = timezone {
                query = query.with_timezone(&timezone);
            }

            println!("{}", query.url()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    // Logs go to stderr so JSON on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_request(location: &LocationArgs) -> Result<AnalysisRequest> {
    let reference_year = location
        .reference_year
        .unwrap_or_else(|| Utc::now().year());

    AnalysisRequest::parse(location.lat, location.lon, &location.date, reference_year)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
