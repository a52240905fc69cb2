//! Command-line interface for the `quake` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// quake - list recent significant earthquakes
///
/// Fetches the USGS GeoJSON event feed once and prints the ten most recent
/// events at or above the minimum magnitude.
#[derive(Debug, Parser)]
#[command(name = "quake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Feed query endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Minimum magnitude, passed through as `minmag`
    #[arg(short = 'm', long, value_name = "MAG")]
    pub min_magnitude: Option<String>,

    /// Sort order, passed through as `orderby` (time, time-asc, magnitude, magnitude-asc)
    #[arg(short = 'o', long, value_name = "ORDER")]
    pub order_by: Option<String>,

    /// Print records as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// Command-line values win over file and environment.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(min_magnitude) = &self.min_magnitude {
            config.min_magnitude.clone_from(min_magnitude);
        }
        if let Some(order_by) = &self.order_by {
            config.order_by.clone_from(order_by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "quake",
            "--endpoint",
            "http://localhost:3000/q",
            "-m",
            "4.5",
            "--order-by",
            "magnitude",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.min_magnitude.as_deref(), Some("4.5"));
        assert!(cli.json);
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cli = Cli::try_parse_from(["quake", "--min-magnitude", "3"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.min_magnitude, "3");
        assert_eq!(config.order_by, "time");
        assert_eq!(config.endpoint, Config::default().endpoint);
    }

    #[test]
    fn quiet_wins() {
        let cli = Cli::try_parse_from(["quake", "-q", "-v"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
