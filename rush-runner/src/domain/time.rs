//! Scheduled time-of-day for departures.
//!
//! Timetables only carry hour and minute. A `DepartureTime` becomes a
//! concrete instant once it is placed on a calendar date with [`DepartureTime::on`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Error returned when a departure time is out of range or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time: {reason}")]
pub struct InvalidDepartureTime {
    reason: &'static str,
}

impl InvalidDepartureTime {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A scheduled time of day with minute resolution.
///
/// Ordering follows the clock, so a sorted list of `DepartureTime`s is in
/// schedule order.
///
/// # Examples
///
/// ```
/// use rush_runner::domain::DepartureTime;
///
/// let t = DepartureTime::new(6, 5).unwrap();
/// assert_eq!(t.to_string(), "06:05");
///
/// assert!(DepartureTime::new(24, 0).is_err());
/// assert!(DepartureTime::new(12, 60).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Create a time from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidDepartureTime> {
        if hour > 23 {
            return Err(InvalidDepartureTime::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(InvalidDepartureTime::new("minute must be 0-59"));
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| InvalidDepartureTime::new("invalid time"))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use rush_runner::domain::DepartureTime;
    ///
    /// assert!(DepartureTime::parse_hhmm("00:00").is_ok());
    /// assert!(DepartureTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(DepartureTime::parse_hhmm("2359").is_err());
    /// assert!(DepartureTime::parse_hhmm("7:30").is_err());
    /// assert!(DepartureTime::parse_hhmm("25:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, InvalidDepartureTime> {
        if s.len() != 5 {
            return Err(InvalidDepartureTime::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(InvalidDepartureTime::new("expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| InvalidDepartureTime::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| InvalidDepartureTime::new("invalid minute digits"))?;

        Self::new(hour, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Place this time on a calendar date.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl FromStr for DepartureTime {
    type Err = InvalidDepartureTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepartureTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = DepartureTime::parse_hhmm("00:00").unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 0));

        let t = DepartureTime::parse_hhmm("23:59").unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));

        let t: DepartureTime = "07:45".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 45));
    }

    #[test]
    fn reject_out_of_range() {
        assert!(DepartureTime::parse_hhmm("24:00").is_err());
        assert!(DepartureTime::parse_hhmm("12:60").is_err());
        assert!(DepartureTime::new(99, 0).is_err());
    }

    #[test]
    fn reject_malformed() {
        assert!(DepartureTime::parse_hhmm("").is_err());
        assert!(DepartureTime::parse_hhmm("12-30").is_err());
        assert!(DepartureTime::parse_hhmm("ab:cd").is_err());
        assert!(DepartureTime::parse_hhmm("12:3").is_err());
        assert!(DepartureTime::parse_hhmm("12:300").is_err());
    }

    #[test]
    fn error_message() {
        let err = DepartureTime::new(24, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid departure time: hour must be 0-23");
    }

    #[test]
    fn ordering_follows_clock() {
        let early = DepartureTime::new(5, 59).unwrap();
        let late = DepartureTime::new(6, 0).unwrap();
        assert!(early < late);
    }

    #[test]
    fn on_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let t = DepartureTime::new(23, 30).unwrap();
        let dt = t.on(d);
        assert_eq!(dt.date(), d);
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
    }

    #[test]
    fn display_and_debug() {
        let t = DepartureTime::new(9, 5).unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(format!("{t:?}"), "DepartureTime(09:05)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display output always parses back to the same time.
        #[test]
        fn display_parses_back(hour in 0u32..24, minute in 0u32..60) {
            let t = DepartureTime::new(hour, minute).unwrap();
            prop_assert_eq!(DepartureTime::parse_hhmm(&t.to_string()).unwrap(), t);
        }

        /// Out-of-range hours are always rejected.
        #[test]
        fn bad_hours_rejected(hour in 24u32..1000, minute in 0u32..60) {
            prop_assert!(DepartureTime::new(hour, minute).is_err());
        }
    }
}
