//! Per-station timetable keyed by day-type.

use std::collections::HashMap;

use super::{DayType, Departure};

/// Departures for one station, grouped by day-type.
///
/// Each day-type's departures are kept in schedule order (ascending by
/// time of day). The order is established at construction, so callers may
/// rely on `departures(day)[0]` being the first train of the day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    by_day: HashMap<DayType, Vec<Departure>>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the departures for a day-type, sorting them into schedule order.
    ///
    /// The sort is stable: departures at the same minute keep their input
    /// order. Returns `true` if the input was already in schedule order.
    pub fn insert(&mut self, day_type: DayType, mut departures: Vec<Departure>) -> bool {
        let was_sorted = departures.is_sorted_by_key(|d| d.time);
        if !was_sorted {
            departures.sort_by_key(|d| d.time);
        }
        self.by_day.insert(day_type, departures);
        was_sorted
    }

    /// Builder-style variant of [`Timetable::insert`].
    pub fn with(mut self, day_type: DayType, departures: Vec<Departure>) -> Self {
        self.insert(day_type, departures);
        self
    }

    /// Departures for a day-type in schedule order.
    ///
    /// A day-type with no data yields an empty slice.
    pub fn departures(&self, day_type: DayType) -> &[Departure] {
        self.by_day
            .get(&day_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first departure of the day for a day-type.
    pub fn first(&self, day_type: DayType) -> Option<&Departure> {
        self.departures(day_type).first()
    }

    /// Returns true if no day-type has any departures.
    pub fn is_empty(&self) -> bool {
        self.by_day.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DepartureTime;

    fn dep(hhmm: &str, dest: &str) -> Departure {
        Departure::new("Local", dest, DepartureTime::parse_hhmm(hhmm).unwrap())
    }

    #[test]
    fn missing_day_type_is_empty() {
        let tt = Timetable::new().with(DayType::Weekday, vec![dep("06:00", "A")]);
        assert!(tt.departures(DayType::Holiday).is_empty());
        assert!(tt.first(DayType::Holiday).is_none());
        assert!(!tt.is_empty());
    }

    #[test]
    fn insert_sorts_unsorted_input() {
        let mut tt = Timetable::new();
        let sorted = tt.insert(
            DayType::Weekday,
            vec![dep("08:00", "C"), dep("06:00", "A"), dep("07:00", "B")],
        );
        assert!(!sorted);

        let dests: Vec<_> = tt
            .departures(DayType::Weekday)
            .iter()
            .map(|d| d.destination.as_str())
            .collect();
        assert_eq!(dests, ["A", "B", "C"]);
    }

    #[test]
    fn insert_keeps_order_of_equal_times() {
        let mut tt = Timetable::new();
        let sorted = tt.insert(
            DayType::Holiday,
            vec![dep("06:00", "first"), dep("06:00", "second")],
        );
        assert!(sorted);
        assert_eq!(tt.first(DayType::Holiday).unwrap().destination, "first");
    }

    #[test]
    fn empty_lists_count_as_empty() {
        let tt = Timetable::new()
            .with(DayType::Weekday, vec![])
            .with(DayType::Holiday, vec![]);
        assert!(tt.is_empty());
    }
}
