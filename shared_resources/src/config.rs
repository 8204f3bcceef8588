use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

use log::{info, warn};

use crate::error::ConfigError;
use crate::request::Floor;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Fcfs,
    RoundRobin,
    NearestFirst,
}

impl PolicyKind {
    pub fn iter() -> impl Iterator<Item = PolicyKind> {
        [PolicyKind::Fcfs, PolicyKind::RoundRobin, PolicyKind::NearestFirst].iter().copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "fcfs",
            PolicyKind::RoundRobin => "round_robin",
            PolicyKind::NearestFirst => "nearest_first",
        }
    }

    /// Nearest-first carries a larger car than the other two.
    pub fn default_capacity(self) -> usize {
        match self {
            PolicyKind::Fcfs | PolicyKind::RoundRobin => 8,
            PolicyKind::NearestFirst => 16,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fcfs" | "first_come_first_served" => Ok(PolicyKind::Fcfs),
            "round_robin" | "rr" | "scan" => Ok(PolicyKind::RoundRobin),
            "nearest_first" | "sdf" | "shortest_distance_first" => Ok(PolicyKind::NearestFirst),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ElevatorSection {
    pub num_floors: Floor,
    pub policy: String,
}

impl Default for ElevatorSection {
    fn default() -> Self {
        ElevatorSection {
            num_floors: 6,
            policy: PolicyKind::Fcfs.as_str().to_string(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MonitorSection {
    pub enabled: bool,
    pub refresh_ms: u64,
}

impl Default for MonitorSection {
    fn default() -> Self {
        let monitor = MonitorConfig::default();
        MonitorSection {
            enabled: monitor.enabled,
            refresh_ms: monitor.refresh.as_millis() as u64,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub elevator: ElevatorSection,
    pub capacity: HashMap<String, usize>,
    pub timing: HashMap<String, u64>,
    pub monitor: MonitorSection,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    fn capacity_for(&self, policy: PolicyKind) -> usize {
        self.capacity
            .get(policy.as_str())
            .copied()
            .unwrap_or_else(|| policy.default_capacity())
    }

    fn timing_value(&self, key: &str, default: u64) -> u64 {
        self.timing.get(key).copied().unwrap_or(default)
    }

    fn timing_count(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        let value = self.timing_value(key, u64::from(default));
        u32::try_from(value)
            .map_err(|_| ConfigError::Invalid(format!("timing.{} = {} is too large", key, value)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorConfig {
    pub num_floors: Floor,
    pub capacity: usize,
    pub policy: PolicyKind,
}

impl ElevatorConfig {
    pub fn new(policy: PolicyKind, num_floors: Floor) -> Self {
        ElevatorConfig {
            num_floors,
            capacity: policy.default_capacity(),
            policy,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "need at least 2 floors, got {}",
                self.num_floors
            )));
        }
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Simulated latency of a single-floor move.
    pub travel_time: Duration,
    pub idle_tick: Duration,
    /// Idle ticks to wait for the very first request before giving up.
    pub max_idle_checks: u32,
    pub drain_grace_ticks: u32,
}

impl TimingConfig {
    pub fn instant() -> Self {
        TimingConfig {
            travel_time: Duration::ZERO,
            idle_tick: Duration::from_millis(1),
            ..TimingConfig::default()
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            travel_time: Duration::from_millis(1000),
            idle_tick: Duration::from_millis(1000),
            max_idle_checks: 10,
            drain_grace_ticks: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub enabled: bool,
    pub refresh: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            enabled: false,
            refresh: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    pub elevator: ElevatorConfig,
    pub timing: TimingConfig,
    pub monitor: MonitorConfig,
}

impl DispatchConfig {
    pub fn get() -> Result<Self, ConfigError> {
        let config_file = read_config_file()?;
        let args: Vec<String> = env::args().collect();
        Self::resolve(&config_file, &args)
    }

    /// Combines the file with `--key value` overrides and validates the result.
    pub fn resolve(config_file: &ConfigFile, args: &[String]) -> Result<Self, ConfigError> {
        let overrides = parse_env_args(args);

        let policy = match overrides.policy {
            Some(policy) => policy,
            None => config_file.elevator.policy.parse()?,
        };
        let num_floors = overrides.num_floors.unwrap_or(config_file.elevator.num_floors);
        let capacity = overrides
            .capacity
            .unwrap_or_else(|| config_file.capacity_for(policy));

        let elevator = ElevatorConfig::new(policy, num_floors).with_capacity(capacity);
        elevator.validate()?;

        let defaults = TimingConfig::default();
        let timing = TimingConfig {
            travel_time: Duration::from_millis(
                config_file.timing_value("travel_ms", defaults.travel_time.as_millis() as u64),
            ),
            idle_tick: Duration::from_millis(
                config_file.timing_value("idle_tick_ms", defaults.idle_tick.as_millis() as u64),
            ),
            max_idle_checks: config_file.timing_count("max_idle_checks", defaults.max_idle_checks)?,
            drain_grace_ticks: config_file.timing_count("drain_grace_ticks", defaults.drain_grace_ticks)?,
        };

        let monitor = MonitorConfig {
            enabled: overrides.monitor.unwrap_or(config_file.monitor.enabled),
            refresh: Duration::from_millis(config_file.monitor.refresh_ms),
        };

        Ok(DispatchConfig {
            elevator,
            timing,
            monitor,
        })
    }
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    let config_contents = match fs::read_to_string(CONFIG_FILE_PATH) {
        Ok(content) => content,
        Err(_) => {
            info!("No configuration file provided, using default settings...");
            fs::read_to_string(FALLBACK_CONFIG_FILE_PATH)?
        },
    };
    ConfigFile::parse(&config_contents)
}

#[derive(Debug, Default, PartialEq)]
struct ArgOverrides {
    policy: Option<PolicyKind>,
    num_floors: Option<Floor>,
    capacity: Option<usize>,
    monitor: Option<bool>,
}

fn parse_env_args(args: &[String]) -> ArgOverrides {
    let mut overrides = ArgOverrides::default();

    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--policy" => match arg_pair[1].parse::<PolicyKind>() {
                Ok(policy) => overrides.policy = Some(policy),
                Err(e) => warn!("{}, skipping...", e),
            },
            "--floors" => match arg_pair[1].parse::<Floor>() {
                Ok(num) => overrides.num_floors = Some(num),
                Err(_) => warn!("floors {} is not a number, skipping...", arg_pair[1]),
            },
            "--capacity" => match arg_pair[1].parse::<usize>() {
                Ok(num) => overrides.capacity = Some(num),
                Err(_) => warn!("capacity {} is not a number, skipping...", arg_pair[1]),
            },
            "--monitor" => match arg_pair[1].parse::<bool>() {
                Ok(on) => overrides.monitor = Some(on),
                Err(_) => warn!("monitor {} is not true/false, skipping...", arg_pair[1]),
            },
            _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
        }
    }
    overrides
}
