//! Schedule variants selected by calendar weekday.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown day-type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day type {0:?}: expected \"weekday\" or \"holiday\"")]
pub struct InvalidDayType(String);

/// Which timetable variant applies on a given day.
///
/// Saturdays and Sundays run the holiday timetable; every other day runs
/// the weekday timetable.
///
/// # Examples
///
/// ```
/// use rush_runner::domain::DayType;
/// use chrono::NaiveDate;
///
/// // 2024-03-16 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
/// assert_eq!(DayType::for_date(saturday), DayType::Holiday);
///
/// let friday = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(DayType::for_date(friday), DayType::Weekday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Holiday,
}

impl DayType {
    /// Both day-types, in display order.
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Holiday];

    /// Derive the day-type of a calendar date.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Holiday,
            _ => DayType::Weekday,
        }
    }

    /// The lowercase name used in timetable files and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Holiday => "holiday",
        }
    }
}

impl FromStr for DayType {
    type Err = InvalidDayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Ok(DayType::Weekday),
            "holiday" => Ok(DayType::Holiday),
            _ => Err(InvalidDayType(s.to_string())),
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A date and the date seven days later always share a day-type.
        #[test]
        fn weekly_period(days in 0i64..100_000) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days);
            let week_later = base + chrono::Duration::days(7);
            prop_assert_eq!(DayType::for_date(base), DayType::for_date(week_later));
        }
    }
}
