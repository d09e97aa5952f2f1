//! Compass angle helpers
//!
//! All headings in the simulator are degrees. Stored headings live in
//! `[0, 360)`; relative angles such as true wind angle are reported in
//! `[-180, 180]` when a signed form is needed.

/// Full circle in degrees
const FULL_CIRCLE: f64 = 360.0;

/// Normalize any finite angle to `[0, 360)`.
///
/// Uses Euclidean remainder so negative inputs wrap upward. A tiny negative
/// input can round to exactly 360.0, which is folded back to 0.0.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_CIRCLE);
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// Normalize any finite angle to `[-180, 180]`.
#[inline]
pub fn normalize_angle_180(angle: f64) -> f64 {
    let wrapped = normalize_angle(angle);
    if wrapped > 180.0 {
        wrapped - FULL_CIRCLE
    } else {
        wrapped
    }
}

/// True wind angle as `true_wind_direction - heading`.
///
/// Both inputs are normalized to `[0, 360)` first; the difference is NOT
/// wrapped, so the result lies in `(-360, 360)`. The MWV sentence reports
/// its absolute value. Use [`signed_twa`] for a port/starboard aware angle.
#[inline]
pub fn calculate_twa(true_wind_direction: f64, heading: f64) -> f64 {
    normalize_angle(true_wind_direction) - normalize_angle(heading)
}

/// True wind angle wrapped to `[-180, 180]`.
///
/// Negative means wind from port, positive from starboard.
#[inline]
pub fn signed_twa(true_wind_direction: f64, heading: f64) -> f64 {
    normalize_angle_180(calculate_twa(true_wind_direction, heading))
}
