use std::ops::RangeInclusive;
use std::str::FromStr;

use clap::{Arg, ArgAction, ArgMatches};
use serde::{Deserialize, Serialize};

use crate::aggregate::ClosedSide;
use crate::error::{Error, Result};
use crate::generate::GenerationParams;

pub const POINTS_RANGE: RangeInclusive<i64> = 0..=500;
pub const DEFAULT_POINTS: i64 = 250;
pub const SEED_RANGE: RangeInclusive<u64> = 0..=100;
pub const DEFAULT_SEED: u64 = 50;

/// Startup parameters shared by the GUI and the report tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub points: i64,
    pub seed: u64,
    pub closed: ClosedSide,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            seed: DEFAULT_SEED,
            closed: ClosedSide::Right,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !POINTS_RANGE.contains(&self.points) {
            return Err(Error::InvalidArgument(format!(
                "point count {} outside {:?}",
                self.points, POINTS_RANGE
            )));
        }
        if !SEED_RANGE.contains(&self.seed) {
            return Err(Error::InvalidArgument(format!(
                "seed {} outside {:?}",
                self.seed, SEED_RANGE
            )));
        }
        Ok(())
    }

    pub fn params(&self) -> Result<GenerationParams> {
        self.validate()?;
        GenerationParams::new(self.points, self.seed)
    }

    /// Arguments understood by [`Config::from_matches`]
    pub fn args() -> Vec<Arg> {
        vec![
            Arg::new("points")
                .short('n')
                .long("points")
                .value_name("COUNT")
                .help(format!(
                    "Number of generated points ({}-{})",
                    POINTS_RANGE.start(),
                    POINTS_RANGE.end()
                ))
                .value_parser(clap::value_parser!(i64).range(POINTS_RANGE))
                .default_value(DEFAULT_POINTS.to_string()),
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help(format!("Random seed ({}-{})", SEED_RANGE.start(), SEED_RANGE.end()))
                .value_parser(clap::value_parser!(u64).range(SEED_RANGE))
                .default_value(DEFAULT_SEED.to_string()),
            Arg::new("closed")
                .long("closed")
                .value_name("SIDE")
                .help("Inclusive side of each bar chart interval")
                .value_parser(["left", "right"])
                .default_value("right"),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Verbosity level (-v for info, -vv for debug)")
                .action(ArgAction::Count),
        ]
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let defaults = Self::default();
        let closed = match matches.get_one::<String>("closed") {
            Some(side) => ClosedSide::from_str(side)
                .map_err(|_| Error::InvalidArgument(format!("unknown closed side: {}", side)))?,
            None => defaults.closed,
        };
        let config = Self {
            points: matches.get_one::<i64>("points").copied().unwrap_or(defaults.points),
            seed: matches.get_one::<u64>("seed").copied().unwrap_or(defaults.seed),
            closed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Initialize `env_logger`; `RUST_LOG` overrides the verbosity count
pub fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // a second init in the same process is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn parse(args: &[&str]) -> std::result::Result<ArgMatches, clap::Error> {
        Command::new("test")
            .args(Config::args())
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_match_arguments() {
        let matches = parse(&[]).unwrap();
        assert_eq!(Config::from_matches(&matches).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_arguments() {
        let matches = parse(&["--points", "40", "-s", "7", "--closed", "left", "-vv"]).unwrap();
        let config = Config::from_matches(&matches).unwrap();
        assert_eq!(config.points, 40);
        assert_eq!(config.seed, 7);
        assert_eq!(config.closed, ClosedSide::Left);
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn test_argument_bounds_follow_constants() {
        let max_points = POINTS_RANGE.end().to_string();
        let max_seed = SEED_RANGE.end().to_string();
        let matches = parse(&["--points", &max_points, "--seed", &max_seed]).unwrap();
        let config = Config::from_matches(&matches).unwrap();
        assert_eq!(config.points, *POINTS_RANGE.end());
        assert_eq!(config.seed, *SEED_RANGE.end());

        let over_points = (POINTS_RANGE.end() + 1).to_string();
        let over_seed = (SEED_RANGE.end() + 1).to_string();
        assert!(parse(&["--points", &over_points]).is_err());
        assert!(parse(&["--seed", &over_seed]).is_err());
    }

    #[test]
    fn test_out_of_range_arguments_rejected() {
        assert!(parse(&["--points", "501"]).is_err());
        assert!(parse(&["--points", "-1"]).is_err());
        assert!(parse(&["--seed", "101"]).is_err());
        assert!(parse(&["--closed", "both"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());
        let config = Config {
            points: -3,
            ..Config::default()
        };
        assert!(matches!(config.params(), Err(Error::InvalidArgument(_))));
        let config = Config {
            seed: 200,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
