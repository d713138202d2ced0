//! A single scheduled train departure.

use super::DepartureTime;

/// One scheduled departure from a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Train type label (e.g. "Local", "Rapid").
    pub train_type: String,

    /// Destination label shown to the user.
    pub destination: String,

    /// Scheduled time of day.
    pub time: DepartureTime,
}

impl Departure {
    /// Create a new departure.
    pub fn new(
        train_type: impl Into<String>,
        destination: impl Into<String>,
        time: DepartureTime,
    ) -> Self {
        Self {
            train_type: train_type.into(),
            destination: destination.into(),
            time,
        }
    }
}
