//! Next-departure resolution.
//!
//! Answers "which train is next?" for a timetable, a selected day-type and
//! a local wall-clock instant. When the last train of the day has gone,
//! resolution looks exactly one day ahead: tomorrow's day-type is derived
//! from tomorrow's weekday and its first departure is taken.

use chrono::NaiveDateTime;

use crate::domain::{DayType, Departure, Timetable};

/// A resolved departure placed on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextDeparture<'a> {
    pub departure: &'a Departure,

    /// Local instant the train leaves; today's date or tomorrow's.
    pub departs_at: NaiveDateTime,
}

/// Outcome of [`resolve_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// The next train, or `None` when no service is reachable.
    pub next: Option<NextDeparture<'a>>,

    /// Set when the next train belongs to tomorrow's day-type and that
    /// day-type differs from the one resolved against.
    pub day_type_change: Option<DayType>,
}

impl<'a> Resolution<'a> {
    fn none() -> Self {
        Self {
            next: None,
            day_type_change: None,
        }
    }

    /// Returns true when resolution switched to a different day-type.
    pub fn changed_day_type(&self) -> bool {
        self.day_type_change.is_some()
    }

    /// The day-type subsequent resolutions should use.
    pub fn active_day_type(&self, current: DayType) -> DayType {
        self.day_type_change.unwrap_or(current)
    }
}

/// Resolve the next departure after `now`.
///
/// A departure whose time equals `now` exactly has already left: only
/// departures strictly later than `now` qualify. Missing data never errors;
/// it yields a resolution with no train.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rush_runner::domain::{DayType, Departure, DepartureTime, Timetable};
/// use rush_runner::resolver::resolve_next;
///
/// let timetable = Timetable::new()
///     .with(DayType::Weekday, vec![
///         Departure::new("Local", "Tokyo", DepartureTime::new(6, 0).unwrap()),
///         Departure::new("Rapid", "Tokyo", DepartureTime::new(23, 30).unwrap()),
///     ])
///     .with(DayType::Holiday, vec![
///         Departure::new("Local", "Tokyo", DepartureTime::new(7, 0).unwrap()),
///     ]);
///
/// // Friday 23:45: the last weekday train has gone, Saturday is a holiday.
/// let now = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(23, 45, 0).unwrap();
/// let resolution = resolve_next(&timetable, DayType::Weekday, now);
///
/// let next = resolution.next.unwrap();
/// assert_eq!(next.departure.time.to_string(), "07:00");
/// assert_eq!(resolution.day_type_change, Some(DayType::Holiday));
/// ```
pub fn resolve_next(timetable: &Timetable, day_type: DayType, now: NaiveDateTime) -> Resolution<'_> {
    let today = now.date();

    let later_today = timetable
        .departures(day_type)
        .iter()
        .map(|departure| NextDeparture {
            departure,
            departs_at: departure.time.on(today),
        })
        .find(|next| next.departs_at > now);

    if let Some(next) = later_today {
        return Resolution {
            next: Some(next),
            day_type_change: None,
        };
    }

    let Some(tomorrow) = today.succ_opt() else {
        return Resolution::none();
    };
    let tomorrow_type = DayType::for_date(tomorrow);

    match timetable.first(tomorrow_type) {
        Some(departure) => Resolution {
            next: Some(NextDeparture {
                departure,
                departs_at: departure.time.on(tomorrow),
            }),
            day_type_change: (tomorrow_type != day_type).then_some(tomorrow_type),
        },
        None => Resolution::none(),
    }
}
