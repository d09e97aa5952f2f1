//! Configuration for SamudraIO
//!
//! Loaded once at startup from a TOML file and then passed by reference into
//! the generator and broadcaster. Every field has a default matching the
//! reference vessel off Varna (43.18447 N, 27.99403 E), so an empty file is a
//! valid configuration.
//!
//! # Example
//!
//! ```toml
//! [vessel]
//! start_latitude = 43.18447
//! start_longitude = 27.99403
//! true_wind_direction = 360.0
//! initial_heading = 90.0
//! cog_heading = 73.0
//! magnetic_heading = 73.0
//! heading_limits = { upper = 73.0, lower = 73.0 }
//! log_speed_knots = 8.0
//! sog_speed_knots = 7.0
//! wind_speed_knots = 10.0
//!
//! [simulation]
//! update_interval_secs = 1.0
//! random_seed = 0             # 0 = different every run
//! heading_drift = false
//! wall_clock_timestamps = false
//! position_step_secs = 1.5
//!
//! [network]
//! destinations = ["127.0.0.1"]
//! port = 4950
//! bind_address = "0.0.0.0:0"
//! line_terminator = false
//!
//! [logging]
//! level = "info"
//! stats_interval_ticks = 60
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub vessel: VesselConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Heading bounds applied to COG and magnetic heading while drift is enabled
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HeadingLimits {
    /// Upper bound (degrees)
    pub upper: f64,
    /// Lower bound (degrees)
    pub lower: f64,
}

impl Default for HeadingLimits {
    fn default() -> Self {
        Self {
            upper: 73.0,
            lower: 73.0,
        }
    }
}

/// Initial vessel state
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VesselConfig {
    /// Starting latitude (decimal degrees, north positive)
    #[serde(default = "default_start_latitude")]
    pub start_latitude: f64,

    /// Starting longitude (decimal degrees, east positive)
    #[serde(default = "default_start_longitude")]
    pub start_longitude: f64,

    /// Direction the true wind blows from (degrees)
    #[serde(default = "default_true_wind_direction")]
    pub true_wind_direction: f64,

    /// Boat heading used for true wind angle (degrees)
    #[serde(default = "default_initial_heading")]
    pub initial_heading: f64,

    /// Course over ground (degrees), drives the GPS track
    #[serde(default = "default_cog_heading")]
    pub cog_heading: f64,

    /// Magnetic compass heading (degrees)
    #[serde(default = "default_magnetic_heading")]
    pub magnetic_heading: f64,

    /// Bounds for COG/magnetic drift
    #[serde(default)]
    pub heading_limits: HeadingLimits,

    /// Speed through water (knots)
    #[serde(default = "default_log_speed")]
    pub log_speed_knots: f64,

    /// Speed over ground (knots)
    #[serde(default = "default_sog_speed")]
    pub sog_speed_knots: f64,

    /// True wind speed (knots)
    #[serde(default = "default_wind_speed")]
    pub wind_speed_knots: f64,
}

fn default_start_latitude() -> f64 {
    43.18447
}
fn default_start_longitude() -> f64 {
    27.99403
}
fn default_true_wind_direction() -> f64 {
    360.0
}
fn default_initial_heading() -> f64 {
    90.0
}
fn default_cog_heading() -> f64 {
    73.0
}
fn default_magnetic_heading() -> f64 {
    73.0
}
fn default_log_speed() -> f64 {
    8.0
}
fn default_sog_speed() -> f64 {
    7.0
}
fn default_wind_speed() -> f64 {
    10.0
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            start_latitude: default_start_latitude(),
            start_longitude: default_start_longitude(),
            true_wind_direction: default_true_wind_direction(),
            initial_heading: default_initial_heading(),
            cog_heading: default_cog_heading(),
            magnetic_heading: default_magnetic_heading(),
            heading_limits: HeadingLimits::default(),
            log_speed_knots: default_log_speed(),
            sog_speed_knots: default_sog_speed(),
            wind_speed_knots: default_wind_speed(),
        }
    }
}

/// Simulation control
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Seconds between sentence batches
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: f64,

    /// Random seed for reproducible noise (0 = random each run)
    #[serde(default)]
    pub random_seed: u64,

    /// Random walk on boat, COG and magnetic headings
    #[serde(default)]
    pub heading_drift: bool,

    /// Stamp RMC with current UTC instead of the fixed reference fix time
    #[serde(default)]
    pub wall_clock_timestamps: bool,

    /// Seconds of travel represented by one GPS sentence
    ///
    /// Independent of `update_interval_secs`.
    #[serde(default = "default_position_step")]
    pub position_step_secs: f64,
}

fn default_update_interval() -> f64 {
    1.0
}
fn default_position_step() -> f64 {
    1.5
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: default_update_interval(),
            random_seed: 0,
            heading_drift: false,
            wall_clock_timestamps: false,
            position_step_secs: default_position_step(),
        }
    }
}

/// UDP destinations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Listener hosts (IP address or hostname), all sharing `port`
    #[serde(default = "default_destinations")]
    pub destinations: Vec<String>,

    /// Destination UDP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Local bind address for the sending socket
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Append `\r\n` to every datagram
    #[serde(default)]
    pub line_terminator: bool,
}

fn default_destinations() -> Vec<String> {
    vec!["127.0.0.1".to_string()]
}
fn default_port() -> u16 {
    4950
}
fn default_bind_address() -> String {
    "0.0.0.0:0".to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            destinations: default_destinations(),
            port: default_port(),
            bind_address: default_bind_address(),
            line_terminator: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit a delivery summary every N ticks (0 = never)
    #[serde(default = "default_stats_interval")]
    pub stats_interval_ticks: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_stats_interval() -> u64 {
    60
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            stats_interval_ticks: default_stats_interval(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use samudra_io::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("samudra.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations that would run a degenerate loop
    pub fn validate(&self) -> Result<()> {
        let vessel = &self.vessel;
        let sim = &self.simulation;
        let net = &self.network;

        if net.destinations.is_empty() {
            return Err(invalid("network.destinations is empty"));
        }
        if let Some(i) = net.destinations.iter().position(|h| h.trim().is_empty()) {
            return Err(invalid(format!("network.destinations[{}] is blank", i)));
        }
        if net.port == 0 {
            return Err(invalid("network.port must be non-zero"));
        }

        if !(sim.update_interval_secs.is_finite() && sim.update_interval_secs > 0.0) {
            return Err(invalid(format!(
                "simulation.update_interval_secs must be positive, got {}",
                sim.update_interval_secs
            )));
        }
        if Duration::try_from_secs_f64(sim.update_interval_secs).is_err() {
            return Err(invalid(format!(
                "simulation.update_interval_secs is too large: {}",
                sim.update_interval_secs
            )));
        }
        if !(sim.position_step_secs.is_finite() && sim.position_step_secs > 0.0) {
            return Err(invalid(format!(
                "simulation.position_step_secs must be positive, got {}",
                sim.position_step_secs
            )));
        }

        // Longitude steps scale with 1/cos(latitude), so the poles are excluded
        if !(vessel.start_latitude.is_finite() && vessel.start_latitude.abs() < 90.0) {
            return Err(invalid(format!(
                "vessel.start_latitude must be strictly between -90 and 90, got {}",
                vessel.start_latitude
            )));
        }
        if !(vessel.start_longitude.is_finite()
            && (-180.0..=180.0).contains(&vessel.start_longitude))
        {
            return Err(invalid(format!(
                "vessel.start_longitude out of range: {}",
                vessel.start_longitude
            )));
        }

        let angles = [
            ("true_wind_direction", vessel.true_wind_direction),
            ("initial_heading", vessel.initial_heading),
            ("cog_heading", vessel.cog_heading),
            ("magnetic_heading", vessel.magnetic_heading),
            ("heading_limits.upper", vessel.heading_limits.upper),
            ("heading_limits.lower", vessel.heading_limits.lower),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(invalid(format!("vessel.{} is not finite", name)));
            }
        }
        let limits = &vessel.heading_limits;
        if !(0.0 <= limits.lower && limits.lower <= limits.upper && limits.upper < 360.0) {
            return Err(invalid(format!(
                "vessel.heading_limits must satisfy 0 <= lower <= upper < 360, got lower {} upper {}",
                limits.lower, limits.upper
            )));
        }

        let speeds = [
            ("log_speed_knots", vessel.log_speed_knots),
            ("sog_speed_knots", vessel.sog_speed_knots),
            ("wind_speed_knots", vessel.wind_speed_knots),
        ];
        for (name, value) in speeds {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!(
                    "vessel.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}
