//! Command-line interface parsing for SWAPI Explorer
//!
//! With no subcommand the dashboard is launched. The category subcommands
//! print a single report, `fetch` refreshes every category (or the ones
//! named) and `status` inspects the cache without touching the network.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::data::Category;

/// SWAPI Explorer - cached Star Wars API statistics in your terminal
#[derive(Parser, Debug)]
#[command(name = "swapi-explorer")]
#[command(about = "Explore cached Star Wars API data from the terminal")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "SWAPI_EXPLORER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for cached records, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// API base URL, overriding the config file
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive dashboard (default)
    Dashboard,
    /// Refresh stale categories and print record counts
    Fetch {
        /// Categories to fetch, all of them when omitted (e.g. films, characters)
        #[arg(value_name = "CATEGORY")]
        categories: Vec<Category>,
    },
    /// Show what is cached and how old it is
    Status,
    /// Print the films report
    Films,
    /// Print the characters report
    People,
    /// Print the planets report
    Planets,
    /// Print the species report
    Species,
    /// Print the starships report
    Starships,
    /// Print the vehicles report
    Vehicles,
}

impl Command {
    /// The category a report subcommand prints, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            Command::Films => Some(Category::Films),
            Command::People => Some(Category::People),
            Command::Planets => Some(Category::Planets),
            Command::Species => Some(Category::Species),
            Command::Starships => Some(Category::Starships),
            Command::Vehicles => Some(Category::Vehicles),
            Command::Dashboard | Command::Fetch { .. } | Command::Status => None,
        }
    }
}

impl Cli {
    /// The subcommand to run, defaulting to the dashboard
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dashboard)
    }

    /// Applies command-line overrides on top of file configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.cache_dir {
            config.cache.dir = Some(dir.clone());
        }
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_defaults_to_dashboard() {
        let cli = Cli::parse_from(["swapi-explorer"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command(), Command::Dashboard);
    }

    #[test]
    fn test_cli_parse_category_commands() {
        for (arg, category) in [
            ("films", Category::Films),
            ("people", Category::People),
            ("planets", Category::Planets),
            ("species", Category::Species),
            ("starships", Category::Starships),
            ("vehicles", Category::Vehicles),
        ] {
            let cli = Cli::parse_from(["swapi-explorer", arg]);
            assert_eq!(cli.command().category(), Some(category));
        }
    }

    #[test]
    fn test_cli_parse_fetch_and_status() {
        assert_eq!(
            Cli::parse_from(["swapi-explorer", "fetch"]).command(),
            Command::Fetch { categories: vec![] }
        );
        assert_eq!(Cli::parse_from(["swapi-explorer", "status"]).command(), Command::Status);
        assert_eq!(Command::Status.category(), None);
    }

    #[test]
    fn test_fetch_accepts_category_aliases() {
        let cli = Cli::parse_from(["swapi-explorer", "fetch", "characters", "Vehicle"]);
        assert_eq!(
            cli.command(),
            Command::Fetch {
                categories: vec![Category::People, Category::Vehicles]
            }
        );
    }

    #[test]
    fn test_fetch_rejects_unknown_category() {
        let err = Cli::try_parse_from(["swapi-explorer", "fetch", "droids"]).unwrap_err();
        assert!(err.to_string().contains("Unknown category: 'droids'"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "swapi-explorer",
            "planets",
            "--cache-dir",
            "/tmp/cache",
            "--base-url",
            "http://localhost:1234/api",
        ]);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:1234/api"));
    }

    #[test]
    fn test_invalid_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["swapi-explorer", "droids"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "swapi-explorer",
            "--cache-dir",
            "/tmp/cache",
            "--base-url",
            "http://localhost:1234/api",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(config.api.base_url, "http://localhost:1234/api");
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::parse_from(["swapi-explorer", "status"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }
}
