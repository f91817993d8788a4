//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ReportConfig;
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "office-energy-report")]
#[command(about = "Office electrical usage analysis report generator")]
#[command(version)]
pub struct Cli {
    /// Room and device inventory (TOML, or JSON by `.json` extension)
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Report configuration TOML file
    #[arg(short, long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in page preset (a4, letter, a5)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Where to write the rendered page document
    #[arg(short, long, default_value = "energy-report.json")]
    pub out: PathBuf,

    /// Also export the per-device breakdown as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Resolves the configuration: `--config` file, then `--preset`, then A4.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be loaded or the preset is unknown.
    pub fn load_config(&self) -> Result<ReportConfig, ConfigError> {
        match (&self.config, &self.preset) {
            (Some(path), _) => ReportConfig::from_toml_file(path),
            (None, Some(name)) => ReportConfig::from_preset(name),
            (None, None) => Ok(ReportConfig::a4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("office-energy-report").chain(args.iter().copied()))
    }

    #[test]
    fn inventory_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = parse(&["--inventory", "rooms.toml"]);
        let Ok(cli) = cli else {
            panic!("should parse: {:?}", cli.err());
        };
        assert_eq!(cli.out, PathBuf::from("energy-report.json"));
        assert!(cli.csv.is_none());
        assert!(!cli.log_json);
        assert!(cli.load_config().is_ok_and(|c| c == ReportConfig::a4()));
    }

    #[test]
    fn config_and_preset_conflict() {
        assert!(parse(&["-i", "x.toml", "--config", "c.toml", "--preset", "a5"]).is_err());
    }

    #[test]
    fn preset_selects_page_size() {
        let cli = parse(&["-i", "x.toml", "--preset", "letter", "--log-json"]);
        assert!(cli.as_ref().is_ok_and(|c| c.log_json));
        let config = cli.ok().map(|c| c.load_config());
        assert!(matches!(config, Some(Ok(ref c)) if c.page.width == 612.0));
    }

    #[test]
    fn unknown_preset_is_a_config_error() {
        let cli = parse(&["-i", "x.toml", "--preset", "tabloid"]);
        let config = cli.ok().map(|c| c.load_config());
        assert!(matches!(config, Some(Err(ref e)) if e.field == "preset"));
    }
}
