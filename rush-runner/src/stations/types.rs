//! Timetable file DTOs.
//!
//! These types map directly to `stations.json`. Hours and minutes are
//! taken as plain integers here and range-checked during conversion.

use serde::Deserialize;

/// One station record, keyed by station id in the enclosing object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    /// Display name.
    pub station_name: String,

    /// Line served.
    pub line_name: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Departures per day-type. Missing day-types mean no service.
    #[serde(default)]
    pub timetable: TimetableDto,
}

/// Departure lists keyed by day-type name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimetableDto {
    #[serde(default)]
    pub weekday: Option<Vec<DepartureDto>>,

    #[serde(default)]
    pub holiday: Option<Vec<DepartureDto>>,
}

/// A single departure as written in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureDto {
    /// Train type label.
    #[serde(rename = "type")]
    pub train_type: String,

    pub destination: String,

    pub hour: u32,

    pub minute: u32,
}
