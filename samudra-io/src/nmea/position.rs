//! Dead reckoning and NMEA coordinate formatting
//!
//! Position advance uses the flat-earth approximation: one minute of
//! latitude is one nautical mile, and longitude minutes shrink with the
//! cosine of latitude. Good enough for the sub-second steps the simulator
//! takes.

/// Seconds per hour, for knots -> nautical miles
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Minutes per degree (and nautical miles per degree of latitude)
const MINUTES_PER_DEGREE: f64 = 60.0;

/// Change in position for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionDelta {
    /// Latitude change (degrees, positive = north)
    pub latitude: f64,
    /// Longitude change (degrees, positive = east)
    pub longitude: f64,
}

/// Compute the position change for travelling at `speed_knots` on
/// `course_deg` for `step_secs`.
///
/// # Arguments
/// * `latitude` - Current latitude (degrees), scales the longitude step
/// * `speed_knots` - Speed over ground
/// * `course_deg` - Course over ground (degrees true)
/// * `step_secs` - Time represented by one step
pub fn dead_reckon(latitude: f64, speed_knots: f64, course_deg: f64, step_secs: f64) -> PositionDelta {
    let distance_nm = speed_knots * (step_secs / SECONDS_PER_HOUR);
    let course_rad = course_deg.to_radians();

    PositionDelta {
        latitude: distance_nm * course_rad.cos() / MINUTES_PER_DEGREE,
        longitude: distance_nm * course_rad.sin()
            / (MINUTES_PER_DEGREE * latitude.to_radians().cos()),
    }
}

/// Split an absolute coordinate into whole degrees and decimal minutes
#[inline]
fn degrees_minutes(value: f64) -> (u32, f64) {
    let magnitude = value.abs();
    let degrees = magnitude.trunc();
    (degrees as u32, (magnitude - degrees) * MINUTES_PER_DEGREE)
}

/// Format latitude as `DDMM.MMMM` plus hemisphere (`N` for >= 0, else `S`)
///
/// ```
/// use samudra_io::nmea::position::format_latitude;
///
/// assert_eq!(format_latitude(43.18447), ("4311.0682".to_string(), 'N'));
/// assert_eq!(format_latitude(-5.5), ("0530.0000".to_string(), 'S'));
/// ```
pub fn format_latitude(latitude: f64) -> (String, char) {
    let (degrees, minutes) = degrees_minutes(latitude);
    let hemisphere = if latitude >= 0.0 { 'N' } else { 'S' };
    (format!("{:02}{:07.4}", degrees, minutes), hemisphere)
}

/// Format longitude as `DDDMM.MMMM` plus hemisphere (`E` for >= 0, else `W`)
pub fn format_longitude(longitude: f64) -> (String, char) {
    let (degrees, minutes) = degrees_minutes(longitude);
    let hemisphere = if longitude >= 0.0 { 'E' } else { 'W' };
    (format!("{:03}{:07.4}", degrees, minutes), hemisphere)
}
