/***************************************/
/*        3rd party libraries          */
/***************************************/
use chrono::Weekday;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, Floor};

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_N_FLOORS: Floor = 30;
pub const DEFAULT_N_ELEVATORS: usize = 3;

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub fleet: FleetConfig,
    pub policy: PolicyConfig,
    pub simulation: SimulationConfig,
}

/// Shape of the building and the fleet serving it.
///
/// `always_on` holds 1-based elevator ids that the off-hours policy never
/// deactivates.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub n_elevators: usize,
    pub n_floors: Floor,
    pub always_on: Vec<ElevatorId>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        FleetConfig {
            n_elevators: DEFAULT_N_ELEVATORS,
            n_floors: DEFAULT_N_FLOORS,
            always_on: vec![DEFAULT_N_ELEVATORS],
        }
    }
}

impl FleetConfig {
    pub fn new(n_elevators: usize, n_floors: Floor, always_on: Vec<ElevatorId>) -> FleetConfig {
        FleetConfig {
            n_elevators,
            n_floors,
            always_on,
        }
    }

    pub fn is_always_on(&self, id: ElevatorId) -> bool {
        self.always_on.contains(&id)
    }
}

/// Half-open window of hours `[start, end)`. A window with `start > end`
/// wraps past midnight, so `[22, 6]` covers 22:00 to 05:59.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourWindow(pub u32, pub u32);

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        let HourWindow(start, end) = *self;
        if start <= end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    pub weekend_days: Vec<Weekday>,
    pub off_hours: HourWindow,
    pub morning_rush: HourWindow,
    pub evening_rush: HourWindow,
    pub morning_rush_floor: Floor,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            off_hours: HourWindow(22, 6),
            morning_rush: HourWindow(8, 10),
            evening_rush: HourWindow(16, 18),
            morning_rush_floor: 1,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    /// Simulated minutes per tick. Zero means the system clock drives the policy.
    pub minutes_per_tick: u32,
    pub max_ticks: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_interval_ms: 500,
            minutes_per_tick: 0,
            max_ticks: None,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fleet = &self.fleet;
        if fleet.n_elevators == 0 {
            return Err(ConfigError::Invalid("fleet needs at least one elevator".into()));
        }
        if fleet.n_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "building needs at least two floors, got {}",
                fleet.n_floors
            )));
        }
        if fleet.always_on.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one elevator must be always-on".into(),
            ));
        }
        if let Some(id) = fleet
            .always_on
            .iter()
            .find(|id| **id == 0 || **id > fleet.n_elevators)
        {
            return Err(ConfigError::Invalid(format!(
                "always-on elevator #{} is outside the fleet of {}",
                id, fleet.n_elevators
            )));
        }

        let policy = &self.policy;
        for (name, window) in [
            ("off_hours", policy.off_hours),
            ("morning_rush", policy.morning_rush),
            ("evening_rush", policy.evening_rush),
        ] {
            if window.0 > 24 || window.1 > 24 {
                return Err(ConfigError::Invalid(format!(
                    "{} hours must be within 0..=24, got [{}, {}]",
                    name, window.0, window.1
                )));
            }
        }
        if policy.morning_rush_floor == 0 || policy.morning_rush_floor > fleet.n_floors {
            return Err(ConfigError::Invalid(format!(
                "morning rush floor {} is outside 1..={}",
                policy.morning_rush_floor, fleet.n_floors
            )));
        }
        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
