use std::path::PathBuf;

use thiserror::Error;

use crate::logging::LogDestination;

pub const USAGE: &str = "usage: crop_app [--catalog <file>] [--state <file>] [--seed <u64>] \
[--log terminal|file|both]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("flag {0} needs a value")]
    MissingValue(String),
    #[error("unknown argument {0}")]
    UnknownArgument(String),
    #[error("invalid seed {0:?}")]
    InvalidSeed(String),
    #[error("invalid log destination {0:?}")]
    InvalidLogDestination(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    /// Field state to resume from and save to; `None` keeps the session in memory.
    pub state_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.ron"),
            state_path: None,
            rng_seed: None,
            log_destination: LogDestination::Terminal,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by command-line flags (program name excluded).
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--catalog" => {
                    config.catalog_path = PathBuf::from(flag_value(&mut args, &flag)?);
                }
                "--state" => {
                    config.state_path = Some(PathBuf::from(flag_value(&mut args, &flag)?));
                }
                "--seed" => {
                    let raw = flag_value(&mut args, &flag)?;
                    let seed = raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed(raw))?;
                    config.rng_seed = Some(seed);
                }
                "--log" => {
                    config.log_destination = flag_value(&mut args, &flag)?
                        .parse()
                        .map_err(ConfigError::InvalidLogDestination)?;
                }
                _ => return Err(ConfigError::UnknownArgument(flag)),
            }
        }
        Ok(config)
    }
}

fn flag_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, ConfigError> {
    args.next()
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}
