//! Network configuration.

use std::time::Duration;

/// Ports below this floor are never drawn for game listeners, keeping clear of
/// well-known and commonly squatted ports. Best effort, as the original scheme
/// was.
const DEFAULT_PORT_FLOOR: u16 = 10001;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Knobs for one orchestration session.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Interface the listeners bind and participants connect to.
    pub host: String,
    /// Lowest port the broker will draw for a player.
    pub port_floor: u16,
    /// Interval at which readiness barriers re-check the counters.
    pub poll_interval: Duration,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port_floor: DEFAULT_PORT_FLOOR,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl NetConfig {
    /// Create from environment variables, falling back to defaults for any
    /// that are absent or unparsable.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("TURNWIRE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port_floor = env::var("TURNWIRE_PORT_FLOOR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT_FLOOR);

        let poll_interval = env::var("TURNWIRE_POLL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        Self {
            host,
            port_floor,
            poll_interval,
        }
    }
}
