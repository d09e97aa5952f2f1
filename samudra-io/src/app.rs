//! Application orchestration for SamudraIO
//!
//! One thread does everything in strict sequence, so the vessel state is
//! never read while it is being mutated:
//!
//! ```text
//! loop {
//!     generator.tick()        update state, build 6 sentences
//!     broadcaster.broadcast() each sentence to each destination
//!     sleep(update_interval)  interruptible by shutdown
//! }
//! ```

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::simulator::SentenceGenerator;
use crate::streaming::Broadcaster;
use crate::transport::DatagramTransport;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest single sleep between shutdown checks
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Outcome of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Sentences generated
    pub sentences: usize,
    /// Datagrams handed to the transport
    pub delivered: usize,
    /// Datagrams that failed (resolution or send)
    pub failed: usize,
}

/// Totals across the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub ticks: u64,
    pub sentences: u64,
    pub delivered: u64,
    pub failed: u64,
}

impl DeliveryStats {
    fn record(&mut self, tick: &TickSummary) {
        self.ticks += 1;
        self.sentences += tick.sentences as u64;
        self.delivered += tick.delivered as u64;
        self.failed += tick.failed as u64;
    }
}

/// Main application structure: generator, broadcaster and the driver loop
pub struct SamudraApp<T: DatagramTransport> {
    generator: SentenceGenerator,
    broadcaster: Broadcaster<T>,
    interval: Duration,
    stats_interval_ticks: u64,
    running: Arc<AtomicBool>,
    stats: DeliveryStats,
}

impl<T: DatagramTransport> SamudraApp<T> {
    /// Create new SamudraApp instance
    ///
    /// Fails fast on configuration that would run a degenerate loop.
    pub fn new(config: &AppConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let interval = Duration::try_from_secs_f64(config.simulation.update_interval_secs)
            .map_err(|e| Error::InvalidConfig(format!("update interval: {}", e)))?;
        let generator = SentenceGenerator::new(&config.vessel, &config.simulation);
        let broadcaster = Broadcaster::with_hosts(
            transport,
            &config.network.destinations,
            config.network.port,
            config.network.line_terminator,
        );

        info!(
            "Broadcasting to {} destination(s) on port {}: {}",
            broadcaster.destinations().len(),
            config.network.port,
            config.network.destinations.join(", ")
        );
        info!(
            "Update interval {:.3}s, position step {:.3}s, seed {}",
            config.simulation.update_interval_secs,
            config.simulation.position_step_secs,
            match config.simulation.random_seed {
                0 => "random".to_string(),
                seed => seed.to_string(),
            }
        );
        if config.simulation.heading_drift {
            info!(
                "Heading drift enabled (COG/magnetic limits {:.1}..{:.1})",
                config.vessel.heading_limits.lower, config.vessel.heading_limits.upper
            );
        }
        if config.simulation.wall_clock_timestamps {
            info!("RMC stamped with wall-clock UTC");
        }

        Ok(Self {
            generator,
            broadcaster,
            interval,
            stats_interval_ticks: config.logging.stats_interval_ticks,
            running: Arc::new(AtomicBool::new(true)),
            stats: DeliveryStats::default(),
        })
    }

    /// Shared flag; storing `false` stops [`run`](Self::run) after the
    /// current tick
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Generator, for inspection
    pub fn generator(&self) -> &SentenceGenerator {
        &self.generator
    }

    /// Totals so far
    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    /// Generate one batch and send it
    pub fn run_tick(&mut self) -> TickSummary {
        let batch = self.generator.tick();
        let mut summary = TickSummary {
            sentences: batch.len(),
            ..TickSummary::default()
        };

        for sentence in &batch {
            let report = self.broadcaster.broadcast(sentence);
            summary.delivered += report.delivered();
            summary.failed += report.failed();
        }

        self.stats.record(&summary);
        summary
    }

    /// Run until the running flag is cleared or `max_ticks` ticks have run
    /// (`None` = forever)
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<DeliveryStats> {
        info!("Simulation running. Press Ctrl-C to stop.");

        let mut ticks: u64 = 0;
        while self.running.load(Ordering::Relaxed) {
            let started = Instant::now();
            let summary = self.run_tick();
            ticks += 1;

            debug!(
                "Tick {}: {} sentences, {} delivered, {} failed",
                ticks, summary.sentences, summary.delivered, summary.failed
            );
            if self.stats_interval_ticks > 0 && ticks % self.stats_interval_ticks == 0 {
                self.log_stats();
            }

            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            self.sleep_remaining(started);
        }

        info!("Simulation stopped");
        self.log_stats();
        Ok(self.stats)
    }

    /// Sleep out the rest of the interval in short slices so shutdown is
    /// noticed promptly
    fn sleep_remaining(&self, started: Instant) {
        let deadline = started + self.interval;
        while self.running.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            std::thread::sleep((deadline - now).min(SHUTDOWN_POLL));
        }
    }

    fn log_stats(&self) {
        let state = self.generator.state();
        info!(
            "{} ticks, {} sentences, {} datagrams sent, {} failed | pos {:.5},{:.5} SOG {:.2} kn",
            self.stats.ticks,
            self.stats.sentences,
            self.stats.delivered,
            self.stats.failed,
            state.latitude,
            state.longitude,
            state.sog_speed_knots
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.random_seed = 7;
        config.simulation.update_interval_secs = 0.001;
        config.network.destinations = vec!["127.0.0.1".to_string(), "127.0.0.2".to_string()];
        config
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = test_config();
        config.network.destinations.clear();
        match SamudraApp::new(&config, MockTransport::new()) {
            Err(Error::InvalidConfig(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("empty destination list accepted"),
        }
    }

    #[test]
    fn test_rejects_interval_beyond_duration() {
        let mut config = test_config();
        config.simulation.update_interval_secs = 1e30;
        assert!(matches!(
            SamudraApp::new(&config, MockTransport::new()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tick_sends_batch_to_each_destination() {
        let mock = MockTransport::new();
        let mut app = SamudraApp::new(&test_config(), mock.clone()).unwrap();

        let summary = app.run_tick();

        assert_eq!(summary.sentences, 6);
        assert_eq!(summary.delivered, 12);
        assert_eq!(summary.failed, 0);

        let first = mock.sent_to("127.0.0.1:4950".parse().unwrap());
        let second = mock.sent_to("127.0.0.2:4950".parse().unwrap());
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
        assert!(first[0].starts_with("$IIDPT,"));
        assert!(first[5].starts_with("$GPRMC,080820.000,A,"));
    }

    #[test]
    fn test_run_bounded_ticks() {
        let mock = MockTransport::new();
        let mut app = SamudraApp::new(&test_config(), mock.clone()).unwrap();

        let stats = app.run(Some(3)).unwrap();

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.sentences, 18);
        assert_eq!(stats.delivered, 36);
        assert_eq!(mock.sent().len(), 36);
        assert_eq!(app.stats(), stats);

        // Three position steps along COG 73 from the configured start
        let start = AppConfig::default().vessel;
        let state = app.generator().state();
        assert!(state.latitude > start.start_latitude);
        assert!(state.longitude > start.start_longitude);

        mock.clear_sent();
        app.run_tick();
        assert_eq!(mock.sent().len(), 12);
    }

    #[test]
    fn test_run_stops_when_flag_cleared() {
        let mock = MockTransport::new();
        let mut app = SamudraApp::new(&test_config(), mock.clone()).unwrap();
        app.running_flag().store(false, Ordering::Relaxed);

        let stats = app.run(None).unwrap();

        assert_eq!(stats.ticks, 0);
        assert!(mock.sent().is_empty());
    }

    #[test]
    fn test_failures_counted_not_fatal() {
        let mock = MockTransport::new();
        mock.fail_on("127.0.0.2:4950".parse().unwrap());
        let mut app = SamudraApp::new(&test_config(), mock.clone()).unwrap();

        let stats = app.run(Some(2)).unwrap();

        assert_eq!(stats.delivered, 12);
        assert_eq!(stats.failed, 12);
    }
}
