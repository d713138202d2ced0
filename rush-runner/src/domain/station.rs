//! Station identity, location and metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Timetable;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Key identifying a station in the timetable data.
///
/// Any non-empty key is accepted; clients percent-encode ids in URL paths.
///
/// # Examples
///
/// ```
/// use rush_runner::domain::StationId;
///
/// let id = StationId::parse("shinjuku").unwrap();
/// assert_eq!(id.as_str(), "shinjuku");
///
/// assert!(StationId::parse("tokyo station").is_ok());
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned for out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinates {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let err = |reason| InvalidCoordinates {
            latitude,
            longitude,
            reason,
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(err("must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(err("latitude must be within -90..=90"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(err("longitude must be within -180..=180"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A station with its timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,

    /// Display name (e.g. "Shinjuku").
    pub name: String,

    /// Line served at this platform (e.g. "Chuo Line").
    pub line: String,

    pub coordinates: Coordinates,

    pub timetable: Timetable,
}
