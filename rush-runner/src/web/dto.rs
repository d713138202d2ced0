//! Data transfer objects for web requests and responses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::countdown::Generation;
use crate::domain::{DayType, Departure};
use crate::resolver::Resolution;
use crate::rush::{Classification, RushAlert};

/// Selection event: either field may be omitted.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub station_id: Option<String>,
    pub day_type: Option<String>,
}

/// A position fix (or failure) reported by the browser.
///
/// Either both coordinates or `error` must be present.
#[derive(Debug, Deserialize)]
pub struct PositionReport {
    /// Generation from the snapshot the request was issued for.
    pub generation: u64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Failure reason, e.g. "denied" or "timeout".
    pub error: Option<String>,
}

/// Result of a position report.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    /// "applied" or "stale".
    pub outcome: &'static str,
    pub generation: Generation,
    pub alert: Option<RushAlert>,
    pub message: Option<String>,
}

/// Station search query.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Timetable query: day-type defaults to today's.
#[derive(Debug, Deserialize)]
pub struct TimetableRequest {
    pub day: Option<String>,
}

/// A departure row.
#[derive(Debug, Clone, Serialize)]
pub struct DepartureResult {
    pub train_type: String,
    pub destination: String,
    /// "HH:MM".
    pub time: String,
}

impl DepartureResult {
    pub fn from_departure(d: &Departure) -> Self {
        Self {
            train_type: d.train_type.clone(),
            destination: d.destination.clone(),
            time: d.time.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub station_id: String,
    pub station_name: String,
    pub line_name: String,
    pub day_type: DayType,
    pub departures: Vec<DepartureResult>,
}

/// Resolver query.
#[derive(Debug, Deserialize)]
pub struct NextDepartureRequest {
    /// Day-type to resolve against; defaults to the day-type of `at`.
    pub day: Option<String>,
    /// Local time as `YYYY-MM-DDTHH:MM:SS`; defaults to now.
    pub at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NextDepartureResponse {
    pub at: NaiveDateTime,
    pub day_type: DayType,
    pub departure: Option<DepartureResult>,
    pub departs_at: Option<NaiveDateTime>,
    pub seconds_until: Option<i64>,
    pub day_type_change: Option<DayType>,
}

impl NextDepartureResponse {
    pub fn from_resolution(resolution: &Resolution<'_>, day_type: DayType, at: NaiveDateTime) -> Self {
        Self {
            at,
            day_type,
            departure: resolution
                .next
                .map(|n| DepartureResult::from_departure(n.departure)),
            departs_at: resolution.next.map(|n| n.departs_at),
            seconds_until: resolution.next.map(|n| (n.departs_at - at).num_seconds()),
            day_type_change: resolution.day_type_change,
        }
    }
}

/// Classifier query.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Distance to the station in metres.
    pub distance: f64,
    /// Seconds until departure.
    pub seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub classification: Classification,
    pub message: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
