use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::Config,
    error::Result,
    model::structures::division::Division
};

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Science Olympiad Elo",
    about = "Rates Science Olympiad teams from tournament result files",
    long_about = "Replays every tournament result file in order and writes per-state \
    Elo ratings (overall and per event) plus a metadata file for each division"
)]
pub struct Args {
    /// Directory searched recursively for `*_b.yaml` / `*_c.yaml` result files
    #[arg(short, long, env = "RESULTS_DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Output files are written to `<output-dir>/states<Division>/`
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "./public")]
    pub output_dir: PathBuf,

    /// Divisions to process. Repeatable; defaults to B and C
    #[arg(short, long = "division", value_parser = parse_division)]
    pub divisions: Vec<Division>,

    /// JSON file of configuration overrides (camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Individual overrides, e.g. `--set maxEloLoss=150`. Applied last
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Only rate the most recent N seasons
    #[arg(long, value_name = "N")]
    pub past_seasons: Option<u32>,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Run without writing output files")]
    pub skip_output: bool,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print the backtest loss to stdout")]
    pub print_loss: bool,

    #[arg(long, value_name = "PATH", help = "Write a metrics JSON file")]
    pub metrics_out: Option<PathBuf>,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Verbose per-category logging")]
    pub enable_logging: bool,

    #[arg(long, action = clap::ArgAction::SetTrue, help = "Process divisions in parallel")]
    pub parallel_divisions: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    /// Defaults, then the `--config` file, then dedicated flags, then `--set`.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default()
        };

        if let Some(seasons) = self.past_seasons {
            config.seasons_to_include = seasons;
        }
        if let Some(path) = &self.metrics_out {
            config.metrics_out = Some(path.clone());
        }
        config.skip_output |= self.skip_output;
        config.print_loss |= self.print_loss;
        config.enable_logging |= self.enable_logging;
        config.parallel_divisions |= self.parallel_divisions;

        config.apply_overrides(&self.overrides)?;

        Ok(config)
    }

    pub fn divisions(&self) -> Vec<Division> {
        if self.divisions.is_empty() {
            vec![Division::B, Division::C]
        } else {
            self.divisions.clone()
        }
    }
}

fn parse_division(value: &str) -> std::result::Result<Division, String> {
    value
        .parse()
        .map_err(|_| format!("unknown division '{}', expected B or C", value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use approx::assert_abs_diff_eq;
    use clap::Parser;

    use super::Args;
    use crate::model::structures::division::Division;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["scioly-elo", "--log-level", "info"]);

        assert_eq!(args.divisions(), vec![Division::B, Division::C]);
        assert_eq!(args.output_dir.to_string_lossy(), "./public");

        let config = args.resolve_config().unwrap();
        assert!(!config.skip_output);
        assert_eq!(config.seasons_to_include, 0);
    }

    #[test]
    fn test_divisions_are_parsed() {
        let args = Args::parse_from(["scioly-elo", "--log-level", "info", "-d", "c"]);

        assert_eq!(args.divisions(), vec![Division::C]);
        assert!(Args::try_parse_from(["scioly-elo", "--log-level", "info", "-d", "A"]).is_err());
    }

    #[test]
    fn test_layering_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "maxEloLoss": 120, "seasonsToInclude": 5, "printLoss": false }}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let args = Args::parse_from([
            "scioly-elo",
            "--log-level",
            "info",
            "--config",
            path.as_str(),
            "--past-seasons",
            "2",
            "--print-loss",
            "--set",
            "maxEloLoss=90",
        ]);
        let config = args.resolve_config().unwrap();

        assert_abs_diff_eq!(config.max_elo_loss, 90.0);
        assert_eq!(config.seasons_to_include, 2);
        assert!(config.print_loss);
    }

    #[test]
    fn test_unknown_override_fails() {
        let args = Args::parse_from(["scioly-elo", "--log-level", "info", "--set", "bogus=1"]);

        assert!(args.resolve_config().is_err());
    }
}
