//! Server and playback configuration.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::playback::SpeedRange;

/// Runtime configuration for the visualization server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// Address the HTTP API listens on.
    pub addr: SocketAddr,
    /// Seed for datasets and dispatch choices. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Initial playback speed.
    pub speed: u32,
    /// Tick period at speed zero. Higher speeds subtract from it.
    pub max_period: Duration,
    pub speed_range: SpeedRange,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            seed: None,
            speed: SpeedRange::DEFAULT.default,
            max_period: Duration::from_millis(300),
            speed_range: SpeedRange::DEFAULT,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables, falling back to the defaults.
    ///
    /// - `ALGOSCOPE_ADDR` (default `0.0.0.0:3000`)
    /// - `ALGOSCOPE_SEED` (optional)
    /// - `ALGOSCOPE_SPEED` (default 150)
    /// - `ALGOSCOPE_MAX_PERIOD_MS` (default 300)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let addr = env_parse("ALGOSCOPE_ADDR")?.unwrap_or(defaults.addr);
        let seed = env_parse("ALGOSCOPE_SEED")?;
        let speed = env_parse("ALGOSCOPE_SPEED")?.unwrap_or(defaults.speed);
        let max_period = env_parse("ALGOSCOPE_MAX_PERIOD_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_period);

        let config = Self {
            addr,
            seed,
            speed,
            max_period,
            speed_range: defaults.speed_range,
        };
        config.validate()?;
        Ok(config)
    }

    /// Override the listening port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Fixed seed, for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The fastest speed must still leave a non-zero tick period.
    pub fn validate(&self) -> Result<()> {
        let fastest = u128::from(self.speed_range.max);
        if self.max_period.as_millis() <= fastest {
            return Err(Error::Config(format!(
                "ALGOSCOPE_MAX_PERIOD_MS must exceed the top speed {fastest}"
            )));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid {key}: {raw}"))),
        Err(_) => Ok(None),
    }
}
