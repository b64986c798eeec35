//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;

/// Default interval in seconds between background sweeps
pub const DEFAULT_SWEEP_INTERVAL: u64 = 60;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Background sweep interval in seconds, 0 disables the sweep task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `INMEMCACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            sweep_interval: env::var("INMEMCACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
        }
    }

    /// Returns a copy of this config with the given sweep interval.
    pub fn with_sweep_interval(mut self, seconds: u64) -> Self {
        self.sweep_interval = seconds;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.sweep_interval, 60);
    }

    #[test]
    fn test_config_with_sweep_interval() {
        let config = Config::default().with_sweep_interval(0);
        assert_eq!(config.sweep_interval, 0);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the variable to avoid races between tests
        env::remove_var("INMEMCACHE_SWEEP_INTERVAL");
        assert_eq!(Config::from_env().sweep_interval, DEFAULT_SWEEP_INTERVAL);

        env::set_var("INMEMCACHE_SWEEP_INTERVAL", "5");
        assert_eq!(Config::from_env().sweep_interval, 5);

        env::set_var("INMEMCACHE_SWEEP_INTERVAL", "soon");
        assert_eq!(Config::from_env().sweep_interval, DEFAULT_SWEEP_INTERVAL);

        env::remove_var("INMEMCACHE_SWEEP_INTERVAL");
    }
}
