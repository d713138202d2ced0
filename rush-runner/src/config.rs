//! Widget server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::domain::Coordinates;
use crate::stations::TimetableSource;

/// Runtime configuration for the widget server.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Where `stations.json` is loaded from (path or URL).
    pub stations: String,

    /// Address the HTTP server binds to.
    pub addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: String,

    /// Countdown cadence (milliseconds).
    pub tick_ms: u64,

    /// Fixed user position for server-side rush alerts, if any.
    pub home: Option<Coordinates>,
}

impl WidgetConfig {
    /// Returns the countdown cadence as a Duration.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Returns the parsed timetable location.
    pub fn source(&self) -> TimetableSource {
        TimetableSource::parse(&self.stations)
    }

    /// Build a configuration from `RUSH_RUNNER_*` environment variables.
    ///
    /// Unset variables take their defaults; unparseable ones are logged and
    /// also fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let stations = lookup("RUSH_RUNNER_STATIONS").unwrap_or(defaults.stations);
        let static_dir = lookup("RUSH_RUNNER_STATIC_DIR").unwrap_or(defaults.static_dir);
        let addr = parse_or(&lookup, "RUSH_RUNNER_ADDR", defaults.addr);
        let tick_ms = match parse_or(&lookup, "RUSH_RUNNER_TICK_MS", defaults.tick_ms) {
            0 => {
                warn!("RUSH_RUNNER_TICK_MS must be positive, using default");
                defaults.tick_ms
            }
            ms => ms,
        };

        let lat = lookup("RUSH_RUNNER_HOME_LAT");
        let lon = lookup("RUSH_RUNNER_HOME_LON");
        let home = match (lat, lon) {
            (Some(lat), Some(lon)) => parse_home(&lat, &lon),
            (None, None) => None,
            _ => {
                warn!("RUSH_RUNNER_HOME_LAT and RUSH_RUNNER_HOME_LON must be set together");
                None
            }
        };

        Self {
            stations,
            addr,
            static_dir,
            tick_ms,
            home,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            stations: "stations.json".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: "static".to_string(),
            tick_ms: 1000,
            home: None,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "invalid value, using default");
            default
        }),
        None => default,
    }
}

fn parse_home(lat: &str, lon: &str) -> Option<Coordinates> {
    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        warn!(lat, lon, "home position is not numeric, ignoring");
        return None;
    };
    match Coordinates::new(lat, lon) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %e, "home position out of range, ignoring");
            None
        }
    }
}
