//! Marine instrument simulation
//!
//! A single [`SentenceGenerator`] owns the vessel state and produces one
//! batch of sentences per tick:
//!
//! ```text
//! tick()
//! ├── update_heading()                   normalize (+ optional drift)
//! ├── update_cog_and_magnetic_heading()  normalize (+ optional drift)
//! ├── update_speeds()                    uniform jitter, clamp
//! └── DPT, VHW, HDG, MTW, MWV, RMC       RMC advances the position
//! ```
//!
//! # Noise
//!
//! All randomness comes from one [`NoiseGenerator`]. With
//! `simulation.random_seed = 0` each run differs; any other seed makes the
//! whole sentence stream reproducible.

mod generator;
mod noise;
mod state;

pub use generator::{
    depth_sentence, temperature_sentence, FixClock, SentenceGenerator, BATCH_SIZE, DEPTH_RANGE,
    TEMPERATURE_RANGE,
};
pub use noise::NoiseGenerator;
pub use state::{SpeedRange, VesselState, LOG_SPEED_RANGE, SOG_SPEED_RANGE, WIND_SPEED_RANGE};
