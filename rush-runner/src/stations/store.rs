//! In-memory station and timetable lookup.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{
    Coordinates, DayType, Departure, DepartureTime, Station, StationId, Timetable,
};

use super::error::TimetableError;
use super::types::{DepartureDto, StationDto};

/// A station name search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMatch {
    pub id: StationId,
    pub name: String,
}

/// Immutable collection of stations loaded at startup.
///
/// Stations keep the order they appear in the source file; the first one
/// is the widget's initial selection.
#[derive(Debug, Clone, Default)]
pub struct TimetableStore {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
}

impl TimetableStore {
    /// Build a store from stations, in the given order.
    ///
    /// A later station with a duplicate id replaces the earlier one in place.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut store = Self::default();
        for station in stations {
            match store.index.get(&station.id) {
                Some(&idx) => {
                    warn!(station = %station.id, "duplicate station id, keeping last");
                    store.stations[idx] = station;
                }
                None => {
                    store.index.insert(station.id.clone(), store.stations.len());
                    store.stations.push(station);
                }
            }
        }
        store
    }

    /// Parse a store from `stations.json` content.
    ///
    /// # Examples
    ///
    /// ```
    /// use rush_runner::stations::TimetableStore;
    /// use rush_runner::domain::DayType;
    ///
    /// let json = r#"{
    ///     "ueno": {
    ///         "stationName": "Ueno", "lineName": "Yamanote Line",
    ///         "latitude": 35.7138, "longitude": 139.7770,
    ///         "timetable": {
    ///             "weekday": [{"type": "Local", "destination": "Tokyo", "hour": 6, "minute": 0}]
    ///         }
    ///     }
    /// }"#;
    ///
    /// let store = TimetableStore::from_json_str(json).unwrap();
    /// let ueno = store.first().unwrap();
    /// assert_eq!(ueno.name, "Ueno");
    /// assert_eq!(ueno.timetable.departures(DayType::Weekday).len(), 1);
    /// assert!(ueno.timetable.departures(DayType::Holiday).is_empty());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, TimetableError> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut stations = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let dto: StationDto = serde_json::from_value(value)?;
            stations.push(convert_station(&key, dto)?);
        }

        debug!(count = stations.len(), "parsed timetable data");
        Ok(Self::new(stations))
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.index.get(id).map(|&idx| &self.stations[idx])
    }

    /// The first station in source order.
    pub fn first(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// All stations in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Search station names by case-insensitive substring.
    ///
    /// Results are in source order, at most `limit` of them. An empty or
    /// all-whitespace query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StationMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.stations
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .take(limit)
            .map(|s| StationMatch {
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect()
    }
}

/// Convert one station record to the domain type.
fn convert_station(key: &str, dto: StationDto) -> Result<Station, TimetableError> {
    let id = StationId::parse(key).map_err(|source| TimetableError::StationId {
        key: key.to_string(),
        source,
    })?;

    let coordinates = Coordinates::new(dto.latitude, dto.longitude).map_err(|source| {
        TimetableError::Coordinates {
            station: key.to_string(),
            source,
        }
    })?;

    let mut timetable = Timetable::new();
    let lists = [
        (DayType::Weekday, dto.timetable.weekday),
        (DayType::Holiday, dto.timetable.holiday),
    ];
    for (day_type, list) in lists {
        let Some(list) = list else {
            continue;
        };
        let departures = convert_departures(key, day_type, list)?;
        if !timetable.insert(day_type, departures) {
            warn!(
                station = key,
                day_type = %day_type,
                "departures were not in schedule order; sorted on load"
            );
        }
    }

    Ok(Station {
        id,
        name: dto.station_name,
        line: dto.line_name,
        coordinates,
        timetable,
    })
}

fn convert_departures(
    station: &str,
    day_type: DayType,
    list: Vec<DepartureDto>,
) -> Result<Vec<Departure>, TimetableError> {
    list.into_iter()
        .enumerate()
        .map(|(index, d)| {
            let time = DepartureTime::new(d.hour, d.minute).map_err(|source| {
                TimetableError::Departure {
                    station: station.to_string(),
                    day_type: day_type.to_string(),
                    index,
                    source,
                }
            })?;
            Ok(Departure::new(d.train_type, d.destination, time))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "shinjuku": {
            "stationName": "Shinjuku",
            "lineName": "Chuo Line",
            "latitude": 35.6896,
            "longitude": 139.7006,
            "timetable": {
                "weekday": [
                    {"type": "Rapid", "destination": "Tokyo", "hour": 7, "minute": 30},
                    {"type": "Local", "destination": "Mitaka", "hour": 6, "minute": 15}
                ],
                "holiday": [
                    {"type": "Local", "destination": "Tokyo", "hour": 8, "minute": 0}
                ]
            }
        },
        "akihabara": {
            "stationName": "Akihabara",
            "lineName": "Sobu Line",
            "latitude": 35.6984,
            "longitude": 139.7731
        },
        "shin-okubo": {
            "stationName": "Shin-Okubo",
            "lineName": "Yamanote Line",
            "latitude": 35.7012,
            "longitude": 139.7000,
            "timetable": {}
        }
    }"#;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn preserves_source_order() {
        let store = TimetableStore::from_json_str(SAMPLE).unwrap();
        let ids: Vec<_> = store.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["shinjuku", "akihabara", "shin-okubo"]);
        assert_eq!(store.first().unwrap().id, id("shinjuku"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn converts_fields_and_sorts_departures() {
        let store = TimetableStore::from_json_str(SAMPLE).unwrap();
        let shinjuku = store.get(&id("shinjuku")).unwrap();

        assert_eq!(shinjuku.name, "Shinjuku");
        assert_eq!(shinjuku.line, "Chuo Line");
        assert_eq!(shinjuku.coordinates.latitude(), 35.6896);

        let weekday = shinjuku.timetable.departures(DayType::Weekday);
        assert_eq!(weekday.len(), 2);
        assert_eq!(weekday[0].destination, "Mitaka");
        assert_eq!(weekday[0].train_type, "Local");
        assert_eq!(weekday[0].time.to_string(), "06:15");
        assert_eq!(weekday[1].time.to_string(), "07:30");
    }

    #[test]
    fn missing_timetable_is_empty() {
        let store = TimetableStore::from_json_str(SAMPLE).unwrap();
        assert!(store.get(&id("akihabara")).unwrap().timetable.is_empty());
        assert!(store.get(&id("shin-okubo")).unwrap().timetable.is_empty());
        assert!(store.get(&id("nowhere")).is_none());
    }

    #[test]
    fn rejects_bad_departure_time() {
        let json = r#"{"x": {"stationName": "X", "lineName": "L", "latitude": 0, "longitude": 0,
            "timetable": {"holiday": [{"type": "T", "destination": "D", "hour": 24, "minute": 0}]}}}"#;
        let err = TimetableStore::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Departure { index: 0, ref day_type, .. } if day_type == "holiday"
        ));
    }

    #[test]
    fn rejects_bad_coordinates() {
        let json = r#"{"x": {"stationName": "X", "lineName": "L", "latitude": 95, "longitude": 0}}"#;
        let err = TimetableStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, TimetableError::Coordinates { .. }));
    }

    #[test]
    fn rejects_bad_station_key() {
        let json = r#"{"": {"stationName": "X", "lineName": "L", "latitude": 0, "longitude": 0}}"#;
        let err = TimetableStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, TimetableError::StationId { .. }));
    }

    #[test]
    fn accepts_keys_with_spaces_and_slashes() {
        let json = r#"{
            "tokyo station": {"stationName": "Tokyo", "lineName": "L", "latitude": 35.68, "longitude": 139.77,
                "timetable": {"weekday": [{"type": "Local", "destination": "Ueno", "hour": 6, "minute": 0}]}},
            "JY/01": {"stationName": "Tokyo (JY)", "lineName": "L", "latitude": 35.68, "longitude": 139.77}
        }"#;
        let store = TimetableStore::from_json_str(json).unwrap();

        assert_eq!(store.len(), 2);
        let tokyo = store.get(&id("tokyo station")).unwrap();
        assert_eq!(tokyo.name, "Tokyo");
        assert_eq!(tokyo.timetable.departures(DayType::Weekday).len(), 1);
        assert!(store.get(&id("JY/01")).is_some());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            TimetableStore::from_json_str("[1, 2]"),
            Err(TimetableError::Json(_))
        ));
        assert!(matches!(
            TimetableStore::from_json_str(r#"{"x": {"stationName": "X"}}"#),
            Err(TimetableError::Json(_))
        ));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let store = TimetableStore::from_json_str(SAMPLE).unwrap();

        let hits: Vec<_> = store
            .search("SHIN", 10)
            .into_iter()
            .map(|m| m.id.to_string())
            .collect();
        assert_eq!(hits, ["shinjuku", "shin-okubo"]);

        let hits = store.search("habara", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Akihabara");
    }

    #[test]
    fn search_respects_limit_and_empty_query() {
        let store = TimetableStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(store.search("shin", 1).len(), 1);
        assert!(store.search("", 10).is_empty());
        assert!(store.search("   ", 10).is_empty());
        assert!(store.search("osaka", 10).is_empty());
    }

    #[test]
    fn duplicate_ids_keep_last_in_place() {
        let json = r#"{"a": {"stationName": "First", "lineName": "L", "latitude": 0, "longitude": 0}}"#;
        let mut stations: Vec<Station> = TimetableStore::from_json_str(json)
            .unwrap()
            .iter()
            .cloned()
            .collect();
        let mut replacement = stations[0].clone();
        replacement.name = "Second".to_string();
        stations.push(replacement);

        let store = TimetableStore::new(stations);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id("a")).unwrap().name, "Second");
    }
}
