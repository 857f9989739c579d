//! Dashboard settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `POOLWATCH_*` environment variables. The binary applies command
//! line overrides on top.
//!
//! ```toml
//! endpoint = "http://192.168.1.50"
//! gauge_interval_secs = 10
//! control_interval_secs = 60
//! time_zone = "utc"
//! epoch_style = "time"
//! log_file = "poolwatch.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::{EpochStyle, TimeFormatter, Zone};
use crate::scheduler::Cadence;

/// Prefix of environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "POOLWATCH";

/// Runtime configuration for the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Controller base URL; `/getMeasures` is appended.
    pub endpoint: String,
    /// Seconds between gauge polls.
    pub gauge_interval_secs: u64,
    /// Seconds between control polls. Unset means manual refresh only.
    pub control_interval_secs: Option<u64>,
    pub request_timeout_secs: u64,
    pub time_zone: Zone,
    pub epoch_style: EpochStyle,
    /// Log destination while the TUI owns the terminal. Empty disables it.
    pub log_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://192.168.1.50".to_string(),
            gauge_interval_secs: 10,
            control_interval_secs: None,
            request_timeout_secs: 5,
            time_zone: Zone::Local,
            epoch_style: EpochStyle::Iso,
            log_file: Some(PathBuf::from("poolwatch.log")),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Reject intervals and timeouts the scheduler cannot work with.
    ///
    /// Call after command line overrides are applied; loading does not
    /// validate so that a later layer can still correct a bad value.
    pub fn validate(&self) -> Result<()> {
        if self.gauge_interval_secs == 0 {
            bail!("gauge_interval_secs must be greater than zero");
        }
        if self.control_interval_secs == Some(0) {
            bail!("control_interval_secs must be greater than zero when set");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Reject endpoints the HTTP client cannot reach. Only needed when
    /// polling a controller, not when replaying a file.
    pub fn validate_endpoint(&self) -> Result<()> {
        if self.endpoint.starts_with("https://") {
            bail!(
                "endpoint {:?} uses https, but the controller client only speaks plain http",
                self.endpoint
            );
        }
        if !self.endpoint.starts_with("http://") {
            bail!("endpoint must be an http:// URL, got {:?}", self.endpoint);
        }
        Ok(())
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            gauges: Duration::from_secs(self.gauge_interval_secs),
            controls: self.control_interval_secs.map(Duration::from_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn formatter(&self) -> TimeFormatter {
        TimeFormatter::new(self.time_zone, self.epoch_style)
    }

    /// The log file, unless logging to a file is disabled.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}
