use anyhow::Context;
use bigtwo_core::{TableConfig, MAX_PLAYERS, MIN_PLAYERS};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bigtwo")]
#[command(author, version, about = "Play Big Two against the computer in a terminal")]
pub struct Args {
    /// Number of seats at the table (2-4)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(MIN_PLAYERS as i64..=MAX_PLAYERS as i64))]
    pub players: Option<u8>,

    /// Number of human seats; they take the first seats
    #[arg(long)]
    pub humans: Option<u8>,

    /// Shuffle seed, for reproducible deals
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON table config; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Let computer seats play a whole game and print the log
    #[arg(long)]
    pub auto: bool,

    /// Print game events as JSON lines
    #[arg(long)]
    pub json_events: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }

    /// Config file first, then flags. `--auto` seats no humans.
    pub fn table_config(&self) -> anyhow::Result<TableConfig> {
        let mut config = match &self.config {
            Some(path) => load_table_config(path)?,
            None => TableConfig::default(),
        };
        if let Some(players) = self.players {
            config.players = usize::from(players);
        }
        if let Some(humans) = self.humans {
            config.humans = usize::from(humans);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.auto {
            config.humans = 0;
        }
        Ok(config.normalized())
    }
}

pub fn load_table_config(path: &Path) -> anyhow::Result<TableConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bigtwo").chain(argv.iter().copied()))
            .expect("args")
    }

    #[test]
    fn flags_build_a_table() {
        let config = parse(&["--players", "3", "--humans", "2", "--seed", "17"])
            .table_config()
            .expect("config");
        assert_eq!(config.players, 3);
        assert_eq!(config.humans, 2);
        assert_eq!(config.seed, Some(17));
    }

    #[test]
    fn auto_mode_has_no_humans() {
        let config = parse(&["--auto"]).table_config().expect("config");
        assert_eq!(config.players, 4);
        assert_eq!(config.humans, 0);
    }

    #[test]
    fn rejects_out_of_range_seat_count() {
        let argv = ["bigtwo", "--players", "5"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(parse(&[]).log_level(), log::LevelFilter::Warn);
        assert_eq!(parse(&["-v"]).log_level(), log::LevelFilter::Info);
        assert_eq!(parse(&["-vv"]).log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn config_file_values_are_overridden_by_flags() {
        let path = std::env::temp_dir().join(format!("bigtwo-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "players": 3, "seed": 4, "names": ["Ana"] }"#).expect("write");
        let argv = ["--config", path.to_str().expect("utf8 path"), "--seed", "9"];
        let config = parse(&argv).table_config().expect("config");
        fs::remove_file(&path).ok();
        assert_eq!(config.players, 3);
        assert_eq!(config.humans, 1);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.names, vec!["Ana".to_string()]);
    }

    #[test]
    fn missing_config_file_reports_the_path() {
        let err = load_table_config(Path::new("/nonexistent/bigtwo.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bigtwo.json"));
    }
}
