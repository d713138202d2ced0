//! Countdown session state machine.
//!
//! A [`Session`] is the whole selection context of the widget: which
//! station is selected, which day-type is active, whether the countdown is
//! running, and a generation counter that changes on every selection. Each
//! operation takes the session by value and returns the next one, so the
//! transitions below are plain functions that can be tested in isolation:
//!
//! ```text
//! Idle    --select_station-->   Running
//! Running --tick (train)-->     Running
//! Running --tick (no train)-->  Ended
//! Ended   --select_*-->         Running
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{DayType, StationId};
use crate::resolver::resolve_next;
use crate::stations::TimetableStore;

use super::display::{CountdownDisplay, ENDED_DISPLAY};

/// Selection counter used to detect stale asynchronous results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Countdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// No station selected.
    Idle,
    /// Ticking.
    Running,
    /// No further departures; ticking has stopped.
    Ended,
}

/// The train a countdown is running towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingTrain {
    pub train_type: String,
    pub destination: String,

    /// Scheduled time as "HH:MM".
    pub scheduled: String,

    pub departs_at: NaiveDateTime,
}

/// What one tick emits for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CountdownUpdate {
    Departing {
        train: UpcomingTrain,
        remaining_secs: i64,
        display: CountdownDisplay,
    },
    ServiceEnded,
}

impl CountdownUpdate {
    /// Text for the countdown timer.
    pub fn timer_text(&self) -> String {
        match self {
            CountdownUpdate::Departing { display, .. } => display.to_string(),
            CountdownUpdate::ServiceEnded => ENDED_DISPLAY.to_string(),
        }
    }

    pub fn train(&self) -> Option<&UpcomingTrain> {
        match self {
            CountdownUpdate::Departing { train, .. } => Some(train),
            CountdownUpdate::ServiceEnded => None,
        }
    }
}

/// Output of [`Session::tick`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub update: CountdownUpdate,

    /// Day-type in effect after this tick.
    pub day_type: DayType,

    /// The day-type rolled over; the displayed timetable must be redrawn.
    pub refresh_timetable: bool,
}

/// The widget's selection context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    station: Option<StationId>,
    day_type: DayType,
    state: CountdownState,
    generation: Generation,
}

impl Session {
    /// A session with nothing selected.
    pub fn new(day_type: DayType) -> Self {
        Self {
            station: None,
            day_type,
            state: CountdownState::Idle,
            generation: Generation::default(),
        }
    }

    pub fn station(&self) -> Option<&StationId> {
        self.station.as_ref()
    }

    pub fn day_type(&self) -> DayType {
        self.day_type
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Select a station and (re)start the countdown.
    pub fn select_station(self, station: StationId) -> Self {
        debug!(%station, "station selected");
        Self {
            station: Some(station),
            state: CountdownState::Running,
            generation: self.generation.next(),
            ..self
        }
    }

    /// Select a day-type; restarts the countdown if a station is selected.
    pub fn select_day_type(self, day_type: DayType) -> Self {
        debug!(%day_type, "day type selected");
        let state = if self.station.is_some() {
            CountdownState::Running
        } else {
            CountdownState::Idle
        };
        Self {
            day_type,
            state,
            generation: self.generation.next(),
            ..self
        }
    }

    /// Advance the countdown to `now`.
    ///
    /// Returns `None` unless the session is running. A selected station
    /// that is missing from `store` is treated as having no service.
    pub fn tick(mut self, store: &TimetableStore, now: NaiveDateTime) -> (Self, Option<Tick>) {
        if self.state != CountdownState::Running {
            return (self, None);
        }

        let timetable = self
            .station
            .as_ref()
            .and_then(|id| store.get(id))
            .map(|station| &station.timetable);

        let (next, day_type_change) = match timetable {
            Some(timetable) => {
                let resolution = resolve_next(timetable, self.day_type, now);
                (resolution.next, resolution.day_type_change)
            }
            None => (None, None),
        };

        let refresh_timetable = match day_type_change {
            Some(new_type) => {
                info!(from = %self.day_type, to = %new_type, "day type rolled over");
                self.day_type = new_type;
                true
            }
            None => false,
        };

        let update = match next {
            Some(next) => {
                let remaining = (next.departs_at - now).max(chrono::Duration::zero());
                CountdownUpdate::Departing {
                    train: UpcomingTrain {
                        train_type: next.departure.train_type.clone(),
                        destination: next.departure.destination.clone(),
                        scheduled: next.departure.time.to_string(),
                        departs_at: next.departs_at,
                    },
                    remaining_secs: remaining.num_seconds(),
                    display: CountdownDisplay::from_remaining(remaining),
                }
            }
            None => {
                info!(station = ?self.station, "service ended");
                self.state = CountdownState::Ended;
                CountdownUpdate::ServiceEnded
            }
        };

        let tick = Tick {
            update,
            day_type: self.day_type,
            refresh_timetable,
        };
        (self, Some(tick))
    }
}
