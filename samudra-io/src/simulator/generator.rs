//! Sentence generator
//!
//! Owns the [`VesselState`] and the random source, applies the per-tick
//! updates and renders one sentence per instrument.
//!
//! | Sentence | Instrument | Source |
//! |----------|------------|--------|
//! | `IIDPT` | Depth sounder | fresh random depth |
//! | `IIVHW` | Speed log | heading, magnetic heading, log speed |
//! | `IIHDG` | Compass | magnetic heading |
//! | `IIMTW` | Water temperature | fresh random temperature |
//! | `IIMWV` | Anemometer | true wind angle, wind speed |
//! | `GPRMC` | GPS | position (advanced on every call), SOG, COG |

use super::noise::NoiseGenerator;
use super::state::VesselState;
use crate::config::{HeadingLimits, SimulationConfig, VesselConfig};
use crate::nmea::angles::{calculate_twa, normalize_angle, signed_twa};
use crate::nmea::position::{format_latitude, format_longitude};
use crate::nmea::Sentence;

/// Depth reported by the sounder (meters)
pub const DEPTH_RANGE: (f64, f64) = (35.0, 50.0);

/// Water temperature (°C)
pub const TEMPERATURE_RANGE: (f64, f64) = (30.0, 40.0);

/// Per-tick jitter amplitude for log and SOG speed (knots)
const BOAT_SPEED_JITTER: f64 = 0.5;

/// Per-tick jitter amplitude for wind speed (knots)
const WIND_SPEED_JITTER: f64 = 0.05;

/// Per-tick drift amplitudes (degrees), only with heading drift enabled
const HEADING_DRIFT: f64 = 1.0;
const COG_DRIFT: f64 = 2.0;
const MAGNETIC_DRIFT: f64 = 1.0;

/// Fix time and date of the reference recording
const REFERENCE_FIX_TIME: &str = "080820.000";
const REFERENCE_FIX_DATE: &str = "181223";

/// Number of sentences produced per tick
pub const BATCH_SIZE: usize = 6;

/// Source of the RMC time and date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixClock {
    /// Fixed reference fix time (`080820.000`, `181223`)
    Reference,
    /// Current UTC
    WallClock,
}

impl FixClock {
    /// `(hhmmss.sss, ddmmyy)`
    pub fn stamp(&self) -> (String, String) {
        match self {
            FixClock::Reference => (
                REFERENCE_FIX_TIME.to_string(),
                REFERENCE_FIX_DATE.to_string(),
            ),
            FixClock::WallClock => {
                let now = chrono::Utc::now();
                (
                    now.format("%H%M%S%.3f").to_string(),
                    now.format("%d%m%y").to_string(),
                )
            }
        }
    }
}

/// Depth sentence: `IIDPT,<depth:1dp>,,`
pub fn depth_sentence(noise: &mut NoiseGenerator) -> Sentence {
    let depth = noise.uniform(DEPTH_RANGE.0, DEPTH_RANGE.1);
    Sentence::from_body(&format!("IIDPT,{:.1},,", depth))
}

/// Water temperature sentence: `IIMTW,<temp:1dp>,C`
pub fn temperature_sentence(noise: &mut NoiseGenerator) -> Sentence {
    let temperature = noise.uniform(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
    Sentence::from_body(&format!("IIMTW,{:.1},C", temperature))
}

/// Simulated instrument suite
pub struct SentenceGenerator {
    state: VesselState,
    noise: NoiseGenerator,
    heading_drift: bool,
    heading_limits: HeadingLimits,
    position_step_secs: f64,
    clock: FixClock,
}

impl SentenceGenerator {
    /// Create generator from configuration
    pub fn new(vessel: &VesselConfig, simulation: &SimulationConfig) -> Self {
        let clock = if simulation.wall_clock_timestamps {
            FixClock::WallClock
        } else {
            FixClock::Reference
        };

        Self {
            state: VesselState::from_config(vessel),
            noise: NoiseGenerator::new(simulation.random_seed),
            heading_drift: simulation.heading_drift,
            heading_limits: vessel.heading_limits,
            position_step_secs: simulation.position_step_secs,
            clock,
        }
    }

    /// Current vessel state
    pub fn state(&self) -> &VesselState {
        &self.state
    }

    /// Mutable vessel state, for scripted scenarios
    pub fn state_mut(&mut self) -> &mut VesselState {
        &mut self.state
    }

    // ========================================================================
    // Per-tick updates
    // ========================================================================

    /// Keep boat heading in `[0, 360)`, with optional ±1° drift
    pub fn update_heading(&mut self) {
        if self.heading_drift {
            self.state.heading += self.noise.jitter(HEADING_DRIFT);
        }
        self.state.heading = normalize_angle(self.state.heading);
    }

    /// Keep COG and magnetic heading in `[0, 360)`
    ///
    /// With drift enabled, COG moves ±2° and magnetic ±1°, both held
    /// inside the configured heading limits.
    pub fn update_cog_and_magnetic_heading(&mut self) {
        if self.heading_drift {
            let limits = self.heading_limits;
            let cog = self.state.cog_heading + self.noise.jitter(COG_DRIFT);
            let magnetic = self.state.magnetic_heading + self.noise.jitter(MAGNETIC_DRIFT);
            self.state.cog_heading = cog.clamp(limits.lower, limits.upper);
            self.state.magnetic_heading = magnetic.clamp(limits.lower, limits.upper);
        }
        self.state.cog_heading = normalize_angle(self.state.cog_heading);
        self.state.magnetic_heading = normalize_angle(self.state.magnetic_heading);
    }

    /// Jitter log/SOG by ±0.5 kn and wind by ±0.05 kn, then clamp
    pub fn update_speeds(&mut self) {
        let log_delta = self.noise.jitter(BOAT_SPEED_JITTER);
        let sog_delta = self.noise.jitter(BOAT_SPEED_JITTER);
        let wind_delta = self.noise.jitter(WIND_SPEED_JITTER);
        self.state.perturb_speeds(log_delta, sog_delta, wind_delta);
    }

    // ========================================================================
    // Sentences
    // ========================================================================

    /// `IIDPT` with a fresh random depth in `[35, 50]` m
    pub fn generate_depth_sentence(&mut self) -> Sentence {
        depth_sentence(&mut self.noise)
    }

    /// `IIVHW,<heading:0dp>,T,<magnetic:0dp>,M,<log:2dp>,N`
    pub fn generate_speed_sentence(&self) -> Sentence {
        Sentence::from_body(&format!(
            "IIVHW,{:.0},T,{:.0},M,{:.2},N",
            self.state.heading, self.state.magnetic_heading, self.state.log_speed_knots
        ))
    }

    /// `IIHDG,<magnetic:1dp>,,,0.0,E`
    pub fn generate_heading_sentence(&self) -> Sentence {
        Sentence::from_body(&format!("IIHDG,{:.1},,,0.0,E", self.state.magnetic_heading))
    }

    /// `IIMTW` with a fresh random temperature in `[30, 40]` °C
    pub fn generate_temperature_sentence(&mut self) -> Sentence {
        temperature_sentence(&mut self.noise)
    }

    /// Unwrapped true wind angle as reported (before taking the magnitude)
    pub fn true_wind_angle(&self) -> f64 {
        calculate_twa(self.state.true_wind_direction, self.state.heading)
    }

    /// True wind angle in `[-180, 180]`, negative = wind from port
    ///
    /// Not used by the MWV sentence, which reports `|true_wind_angle()|`.
    pub fn signed_true_wind_angle(&self) -> f64 {
        signed_twa(self.state.true_wind_direction, self.state.heading)
    }

    /// `IIMWV,<|twa|:0dp>,T,<wind:1dp>,N,A`
    pub fn generate_true_wind_sentence(&self) -> Sentence {
        Sentence::from_body(&format!(
            "IIMWV,{:.0},T,{:.1},N,A",
            self.true_wind_angle().abs(),
            self.state.wind_speed_knots
        ))
    }

    /// `GPRMC` after advancing the position by one step
    pub fn generate_gps_sentence(&mut self) -> Sentence {
        self.state.advance_position(self.position_step_secs);

        let (latitude, lat_hemisphere) = format_latitude(self.state.latitude);
        let (longitude, lon_hemisphere) = format_longitude(self.state.longitude);
        let (time, date) = self.clock.stamp();

        Sentence::from_body(&format!(
            "GPRMC,{},A,{},{},{},{},{:.2},{:.1},{},,,A",
            time,
            latitude,
            lat_hemisphere,
            longitude,
            lon_hemisphere,
            self.state.sog_speed_knots,
            self.state.cog_heading,
            date
        ))
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Apply the three updates, then produce the batch in wire order:
    /// DPT, VHW, HDG, MTW, MWV, RMC
    pub fn tick(&mut self) -> [Sentence; BATCH_SIZE] {
        self.update_heading();
        self.update_cog_and_magnetic_heading();
        self.update_speeds();

        [
            self.generate_depth_sentence(),
            self.generate_speed_sentence(),
            self.generate_heading_sentence(),
            self.generate_temperature_sentence(),
            self.generate_true_wind_sentence(),
            self.generate_gps_sentence(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::checksum::checksum;
    use crate::simulator::{LOG_SPEED_RANGE, SOG_SPEED_RANGE, WIND_SPEED_RANGE};
    use approx::assert_abs_diff_eq;

    fn seeded(seed: u64) -> SentenceGenerator {
        let simulation = SimulationConfig {
            random_seed: seed,
            ..SimulationConfig::default()
        };
        SentenceGenerator::new(&VesselConfig::default(), &simulation)
    }

    fn verifies(sentence: &Sentence) -> bool {
        let text = sentence.as_str();
        let star = text.rfind('*').unwrap();
        let body = &text[1..star];
        text.starts_with('$')
            && text.len() == star + 3
            && format!("{:02X}", checksum(body)) == text[star + 1..]
    }

    #[test]
    fn test_reference_speed_heading_wind() {
        let mut generator = seeded(1);
        generator.update_heading();
        generator.update_cog_and_magnetic_heading();

        assert_eq!(generator.generate_speed_sentence().as_str(), "$IIVHW,90,T,73,M,8.00,N*05");
        assert_eq!(generator.generate_heading_sentence().as_str(), "$IIHDG,73.0,,,0.0,E*16");
        assert_eq!(
            generator.generate_true_wind_sentence().as_str(),
            "$IIMWV,90,T,10.0,N,A*2D"
        );
    }

    #[test]
    fn test_twa_reports_magnitude() {
        let mut generator = seeded(1);
        generator.state_mut().heading = 90.0;
        generator.state_mut().true_wind_direction = 360.0;

        assert_eq!(generator.true_wind_angle(), -90.0);
        assert_eq!(generator.signed_true_wind_angle(), -90.0);
        assert_eq!(generator.generate_true_wind_sentence().fields()[0], "90");

        generator.state_mut().heading = 350.0;
        generator.state_mut().true_wind_direction = 10.0;
        // Unwrapped -340 is reported as 340; signed form is +20
        assert_eq!(generator.generate_true_wind_sentence().fields()[0], "340");
        assert_eq!(generator.signed_true_wind_angle(), 20.0);
    }

    #[test]
    fn test_gps_reference_step() {
        let mut generator = seeded(1);
        let sentence = generator.generate_gps_sentence();

        let distance = 7.0 * (1.5 / 3600.0);
        let heading = 73.0f64.to_radians();
        let expected_lat = 43.18447 + distance * heading.cos() / 60.0;
        let expected_lon =
            27.99403 + distance * heading.sin() / (60.0 * 43.18447f64.to_radians().cos());

        assert_abs_diff_eq!(generator.state().latitude, expected_lat, epsilon = 1e-6);
        assert_abs_diff_eq!(generator.state().longitude, expected_lon, epsilon = 1e-6);
        assert_eq!(
            sentence.as_str(),
            "$GPRMC,080820.000,A,4311.0691,N,02759.6456,E,7.00,73.0,181223,,,A*65"
        );
    }

    #[test]
    fn test_gps_southern_western_hemisphere() {
        let mut generator = seeded(1);
        generator.state_mut().latitude = -33.85;
        generator.state_mut().longitude = -70.5;
        let sentence = generator.generate_gps_sentence();
        let fields = sentence.fields();

        assert_eq!(fields[2].len(), 9);
        assert_eq!(fields[3], "S");
        assert_eq!(fields[4].len(), 10);
        assert_eq!(fields[5], "W");
    }

    #[test]
    fn test_speeds_stay_clamped() {
        let mut generator = seeded(99);
        for _ in 0..10_000 {
            generator.update_speeds();
            let s = generator.state();
            assert!(LOG_SPEED_RANGE.contains(s.log_speed_knots));
            assert!(SOG_SPEED_RANGE.contains(s.sog_speed_knots));
            assert!(WIND_SPEED_RANGE.contains(s.wind_speed_knots));
        }
    }

    #[test]
    fn test_depth_and_temperature_ranges() {
        let mut generator = seeded(3);
        for _ in 0..5_000 {
            let depth: f64 = generator.generate_depth_sentence().fields()[0].parse().unwrap();
            assert!((35.0..=50.0).contains(&depth));

            let temp: f64 = generator.generate_temperature_sentence().fields()[0]
                .parse()
                .unwrap();
            assert!((30.0..=40.0).contains(&temp));
        }
    }

    #[test]
    fn test_headings_static_without_drift() {
        let mut generator = seeded(5);
        for _ in 0..100 {
            generator.update_heading();
            generator.update_cog_and_magnetic_heading();
        }
        assert_eq!(generator.state().heading, 90.0);
        assert_eq!(generator.state().cog_heading, 73.0);
        assert_eq!(generator.state().magnetic_heading, 73.0);
    }

    #[test]
    fn test_heading_drift_respects_limits() {
        let vessel = VesselConfig {
            heading_limits: HeadingLimits {
                upper: 80.0,
                lower: 65.0,
            },
            ..VesselConfig::default()
        };
        let simulation = SimulationConfig {
            random_seed: 11,
            heading_drift: true,
            ..SimulationConfig::default()
        };
        let mut generator = SentenceGenerator::new(&vessel, &simulation);

        let mut moved = false;
        for _ in 0..1_000 {
            generator.update_heading();
            generator.update_cog_and_magnetic_heading();
            let s = generator.state();
            assert!((0.0..360.0).contains(&s.heading));
            assert!((65.0..=80.0).contains(&s.cog_heading));
            assert!((65.0..=80.0).contains(&s.magnetic_heading));
            moved |= s.heading != 90.0;
        }
        assert!(moved);
    }

    #[test]
    fn test_tick_order_and_checksums() {
        let mut generator = seeded(8);
        for _ in 0..20 {
            let batch = generator.tick();
            let headers: Vec<&str> = batch.iter().map(|s| s.header()).collect();
            assert_eq!(headers, ["IIDPT", "IIVHW", "IIHDG", "IIMTW", "IIMWV", "GPRMC"]);
            assert!(batch.iter().all(verifies));
        }
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let mut a = seeded(1234);
        let mut b = seeded(1234);
        for _ in 0..50 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn test_wall_clock_stamp_shape() {
        let (time, date) = FixClock::WallClock.stamp();
        assert_eq!(time.len(), 10);
        assert_eq!(&time[6..7], ".");
        assert_eq!(date.len(), 6);
        assert!(date.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(
            FixClock::Reference.stamp(),
            ("080820.000".to_string(), "181223".to_string())
        );
    }
}
