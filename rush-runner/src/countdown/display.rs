//! Remaining-time formatting.

use std::fmt;

use chrono::Duration;
use serde::Serialize;

/// Shown in place of a countdown once service has ended.
pub const ENDED_DISPLAY: &str = "--:--";

/// Time remaining until departure, in display form.
///
/// With an hour or more to go the countdown shows hours and minutes;
/// under an hour it shows minutes and seconds.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use rush_runner::countdown::CountdownDisplay;
///
/// let d = CountdownDisplay::from_remaining(Duration::seconds(3 * 60 + 7));
/// assert_eq!(d.to_string(), "03:07");
///
/// let d = CountdownDisplay::from_remaining(Duration::minutes(125));
/// assert_eq!(d.to_string(), "2h 5m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum CountdownDisplay {
    HoursMinutes { hours: i64, minutes: i64 },
    MinutesSeconds { minutes: i64, seconds: i64 },
}

impl CountdownDisplay {
    /// Build the display for a remaining duration.
    ///
    /// Sub-second remainders are truncated; negative durations show as zero.
    pub fn from_remaining(remaining: Duration) -> Self {
        let total = remaining.num_seconds().max(0);
        let hours = total / 3600;
        let minutes = (total / 60) % 60;
        let seconds = total % 60;

        if hours > 0 {
            CountdownDisplay::HoursMinutes { hours, minutes }
        } else {
            CountdownDisplay::MinutesSeconds { minutes, seconds }
        }
    }
}

impl fmt::Display for CountdownDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownDisplay::HoursMinutes { hours, minutes } => {
                write!(f, "{hours}h {minutes}m")
            }
            CountdownDisplay::MinutesSeconds { minutes, seconds } => {
                write!(f, "{minutes:02}:{seconds:02}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(secs: i64) -> String {
        CountdownDisplay::from_remaining(Duration::seconds(secs)).to_string()
    }

    #[test]
    fn under_an_hour_shows_minutes_seconds() {
        assert_eq!(show(0), "00:00");
        assert_eq!(show(59), "00:59");
        assert_eq!(show(61), "01:01");
        assert_eq!(show(3599), "59:59");
    }

    #[test]
    fn an_hour_or_more_shows_hours_minutes() {
        assert_eq!(show(3600), "1h 0m");
        assert_eq!(show(3600 + 59), "1h 0m");
        assert_eq!(show(5 * 3600 + 42 * 60 + 30), "5h 42m");
    }

    #[test]
    fn truncates_subseconds() {
        let d = CountdownDisplay::from_remaining(Duration::milliseconds(59_999));
        assert_eq!(d, CountdownDisplay::MinutesSeconds { minutes: 0, seconds: 59 });
    }

    #[test]
    fn negative_is_zero() {
        assert_eq!(show(-30), "00:00");
    }

    #[test]
    fn serializes_with_unit_tag() {
        let json = serde_json::to_value(CountdownDisplay::from_remaining(Duration::seconds(90))).unwrap();
        assert_eq!(json["unit"], "minutes_seconds");
        assert_eq!(json["minutes"], 1);
        assert_eq!(json["seconds"], 30);
    }
}
