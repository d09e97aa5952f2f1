//! Simulated vessel state

use crate::config::VesselConfig;
use crate::nmea::angles::normalize_angle_180;
use crate::nmea::position::{dead_reckon, PositionDelta};

/// Inclusive speed bounds (knots)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Speed through water bounds
pub const LOG_SPEED_RANGE: SpeedRange = SpeedRange {
    min: 4.0,
    max: 12.0,
};

/// Speed over ground bounds
pub const SOG_SPEED_RANGE: SpeedRange = SpeedRange {
    min: 3.0,
    max: 10.0,
};

/// True wind speed bounds
pub const WIND_SPEED_RANGE: SpeedRange = SpeedRange {
    min: 5.0,
    max: 20.0,
};

/// Everything the instrument suite reports, owned by the generator.
///
/// Angles are degrees, normalized to `[0, 360)` by the generator each tick;
/// speeds are knots and are kept inside their ranges by [`perturb_speeds`].
///
/// [`perturb_speeds`]: VesselState::perturb_speeds
#[derive(Debug, Clone, PartialEq)]
pub struct VesselState {
    pub latitude: f64,
    pub longitude: f64,
    /// Treated as a static reference
    pub true_wind_direction: f64,
    /// Boat heading, only used for true wind angle
    pub heading: f64,
    pub cog_heading: f64,
    pub magnetic_heading: f64,
    pub log_speed_knots: f64,
    pub sog_speed_knots: f64,
    pub wind_speed_knots: f64,
}

impl VesselState {
    /// Initial state straight from configuration (no normalization yet)
    pub fn from_config(config: &VesselConfig) -> Self {
        Self {
            latitude: config.start_latitude,
            longitude: config.start_longitude,
            true_wind_direction: config.true_wind_direction,
            heading: config.initial_heading,
            cog_heading: config.cog_heading,
            magnetic_heading: config.magnetic_heading,
            log_speed_knots: config.log_speed_knots,
            sog_speed_knots: config.sog_speed_knots,
            wind_speed_knots: config.wind_speed_knots,
        }
    }

    /// Add the given deltas to log, SOG and wind speed, then clamp each to
    /// its range
    pub fn perturb_speeds(&mut self, log_delta: f64, sog_delta: f64, wind_delta: f64) {
        self.log_speed_knots = LOG_SPEED_RANGE.clamp(self.log_speed_knots + log_delta);
        self.sog_speed_knots = SOG_SPEED_RANGE.clamp(self.sog_speed_knots + sog_delta);
        self.wind_speed_knots = WIND_SPEED_RANGE.clamp(self.wind_speed_knots + wind_delta);
    }

    /// Move the position along COG at SOG for `step_secs`
    ///
    /// Longitude wraps across the antimeridian to stay in `[-180, 180]`.
    pub fn advance_position(&mut self, step_secs: f64) -> PositionDelta {
        let delta = dead_reckon(self.latitude, self.sog_speed_knots, self.cog_heading, step_secs);
        self.latitude += delta.latitude;
        self.longitude = normalize_angle_180(self.longitude + delta.longitude);
        delta
    }
}
