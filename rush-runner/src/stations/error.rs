//! Timetable loading error types.

use crate::domain::{InvalidCoordinates, InvalidDepartureTime, InvalidStationId};

/// Errors that can occur while loading timetable data.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// Reading the timetable file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request for a remote timetable failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("timetable source returned status {status}")]
    Status { status: u16 },

    /// Failed to parse the timetable JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A station key is not a valid id
    #[error("station {key:?}: {source}")]
    StationId {
        key: String,
        #[source]
        source: InvalidStationId,
    },

    /// A station's coordinates are out of range
    #[error("station {station}: {source}")]
    Coordinates {
        station: String,
        #[source]
        source: InvalidCoordinates,
    },

    /// A departure has an out-of-range hour or minute
    #[error("station {station}, {day_type} departure #{index}: {source}")]
    Departure {
        station: String,
        day_type: String,
        index: usize,
        #[source]
        source: InvalidDepartureTime,
    },
}
