//! Widget runtime.
//!
//! Owns the single [`Session`], the single countdown task and the rush-alert
//! state. Every event (tick, selection, position fix) takes the same lock,
//! so events are applied one at a time in arrival order.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::WidgetConfig;
use crate::countdown::{
    CountdownState, CountdownTimer, CountdownUpdate, Generation, Session, Tick,
};
use crate::domain::{Coordinates, DayType, Departure, StationId};
use crate::rush::{
    FixedPosition, PositionError, PositionProvider, PositionRequest, RushAlert, classify,
    distance_m,
};
use crate::stations::{TimetableError, TimetableStore};

/// Source of the current local time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// The system's local wall clock.
pub fn local_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// Errors from selection events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// No station with this id in the timetable data
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// Timetable data failed to load
    #[error("timetable unavailable: {0}")]
    Unavailable(String),
}

/// Result of delivering a position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionOutcome {
    /// The fix matched the current selection and updated the alert.
    Applied(RushAlert),
    /// The selection changed since the request was issued; the fix was dropped.
    Stale,
}

/// Overall widget status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum WidgetStatus {
    /// Timetable data could not be loaded.
    Unavailable { reason: String },
    Idle,
    Running,
    Ended,
}

/// Identity of the selected station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSummary {
    pub id: StationId,
    pub name: String,
    pub line: String,
}

/// Everything a client needs to render the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub status: WidgetStatus,
    pub generation: Generation,
    pub day_type: DayType,
    pub station: Option<StationSummary>,
    pub countdown: Option<Tick>,
    pub timer_text: Option<String>,
    pub alert: RushAlert,
    pub alert_message: Option<String>,
}

/// Mutable state behind the widget lock.
struct WidgetState {
    session: Session,
    last_tick: Option<Tick>,
    alert: RushAlert,
    alert_in_flight: Option<Generation>,
    timer: CountdownTimer,
}

impl WidgetState {
    /// Run one countdown tick. Returns true if the countdown keeps running.
    fn tick(&mut self, store: &TimetableStore, now: NaiveDateTime) -> bool {
        let (session, tick) = self.session.clone().tick(store, now);
        self.session = session;

        if let Some(tick) = tick {
            if tick.update == CountdownUpdate::ServiceEnded {
                self.alert = RushAlert::Hidden;
            }
            self.last_tick = Some(tick);
        }

        self.session.state() == CountdownState::Running
    }
}

/// Handle to the widget runtime. Cheap to clone.
#[derive(Clone)]
pub struct Widget {
    data: Result<Arc<TimetableStore>, String>,
    state: Arc<Mutex<WidgetState>>,
    clock: Clock,
    tick_interval: Duration,
    home: Option<FixedPosition>,
}

impl Widget {
    /// Create a widget over loaded (or failed) timetable data.
    ///
    /// The initial day-type is derived from today's date.
    pub fn new(data: Result<TimetableStore, TimetableError>, config: &WidgetConfig) -> Self {
        Self::with_clock(data, config, local_clock())
    }

    /// Create a widget with a custom clock.
    pub fn with_clock(
        data: Result<TimetableStore, TimetableError>,
        config: &WidgetConfig,
        clock: Clock,
    ) -> Self {
        let data = match data {
            Ok(store) => Ok(Arc::new(store)),
            Err(e) => {
                warn!(error = %e, "timetable data unavailable");
                Err(e.to_string())
            }
        };

        let today = clock().date();
        let state = WidgetState {
            session: Session::new(DayType::for_date(today)),
            last_tick: None,
            alert: RushAlert::Hidden,
            alert_in_flight: None,
            timer: CountdownTimer::new(),
        };

        Self {
            data,
            state: Arc::new(Mutex::new(state)),
            clock,
            tick_interval: config.tick_interval(),
            home: config.home.map(FixedPosition),
        }
    }

    /// The loaded timetable data, if loading succeeded.
    pub fn store(&self) -> Option<&Arc<TimetableStore>> {
        self.data.as_ref().ok()
    }

    /// Select the first station in the timetable data, if any.
    pub async fn start(&self) {
        let first = self.store().and_then(|s| s.first()).map(|s| s.id.clone());
        if let Some(id) = first {
            if let Err(e) = self.select_station(id).await {
                warn!(error = %e, "failed to select initial station");
            }
        }
    }

    /// Switch station and restart the countdown.
    pub async fn select_station(&self, id: StationId) -> Result<WidgetSnapshot, SelectError> {
        let store = self.require_store()?;
        if store.get(&id).is_none() {
            return Err(SelectError::UnknownStation(id));
        }

        let mut state = self.state.lock().await;
        state.session = state.session.clone().select_station(id);
        self.restart(&mut state, &store);
        Ok(self.snapshot_locked(&state))
    }

    /// Switch day-type and restart the countdown.
    pub async fn select_day_type(&self, day_type: DayType) -> Result<WidgetSnapshot, SelectError> {
        let store = self.require_store()?;

        let mut state = self.state.lock().await;
        state.session = state.session.clone().select_day_type(day_type);
        self.restart(&mut state, &store);
        Ok(self.snapshot_locked(&state))
    }

    /// The widget's notion of the current local time.
    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// Current state for rendering.
    pub async fn snapshot(&self) -> WidgetSnapshot {
        let state = self.state.lock().await;
        self.snapshot_locked(&state)
    }

    /// Departures of the selected station for the active day-type.
    pub async fn active_departures(&self) -> Vec<Departure> {
        let Some(store) = self.store() else {
            return Vec::new();
        };
        let state = self.state.lock().await;
        state
            .session
            .station()
            .and_then(|id| store.get(id))
            .map(|s| s.timetable.departures(state.session.day_type()).to_vec())
            .unwrap_or_default()
    }

    /// Whether the countdown task is currently alive.
    pub async fn is_ticking(&self) -> bool {
        self.state.lock().await.timer.is_running()
    }

    /// Start a rush-alert evaluation for the current selection.
    ///
    /// Returns `None` (and hides the alert) when there is no upcoming
    /// train, and `None` without changes while an evaluation for the same
    /// selection is still in flight.
    pub async fn begin_position_request(&self) -> Option<PositionRequest> {
        let store = self.store()?;
        let mut state = self.state.lock().await;

        let has_train = state
            .last_tick
            .as_ref()
            .is_some_and(|t| t.update.train().is_some());
        let station = state.session.station().and_then(|id| store.get(id));
        let (true, Some(station)) = (has_train, station) else {
            state.alert = RushAlert::Hidden;
            return None;
        };

        let generation = state.session.generation();
        if state.alert_in_flight == Some(generation) {
            debug!(%generation, "position request already in flight");
            return None;
        }
        state.alert_in_flight = Some(generation);

        Some(PositionRequest {
            generation,
            station: station.coordinates,
        })
    }

    /// Deliver a position fix (or failure) for the given generation.
    pub async fn apply_position(
        &self,
        generation: Generation,
        fix: Result<Coordinates, PositionError>,
    ) -> PositionOutcome {
        let mut state = self.state.lock().await;
        if state.alert_in_flight == Some(generation) {
            state.alert_in_flight = None;
        }

        let current = state.session.generation();
        if generation != current {
            debug!(%generation, %current, "discarding stale position fix");
            return PositionOutcome::Stale;
        }

        let alert = match fix {
            Err(e) => {
                warn!(error = %e, "position unavailable");
                RushAlert::Unknown
            }
            Ok(user) => self.assess(&state, user),
        };
        state.alert = alert;
        PositionOutcome::Applied(alert)
    }

    /// Request a position from `provider` and apply it.
    ///
    /// Returns `None` if no evaluation was started.
    pub async fn refresh_rush_alert<P: PositionProvider>(
        &self,
        provider: &P,
    ) -> Option<PositionOutcome> {
        let request = self.begin_position_request().await?;
        let fix = provider.locate().await;
        Some(self.apply_position(request.generation, fix).await)
    }

    fn assess(&self, state: &WidgetState, user: Coordinates) -> RushAlert {
        let station = self
            .store()
            .zip(state.session.station())
            .and_then(|(store, id)| store.get(id));
        let train = state.last_tick.as_ref().and_then(|t| t.update.train());

        let (Some(station), Some(train)) = (station, train) else {
            return RushAlert::Hidden;
        };

        let distance_m = distance_m(user, station.coordinates);
        let seconds_until = (train.departs_at - (self.clock)()).num_milliseconds() as f64 / 1000.0;

        RushAlert::Assessed {
            classification: classify(distance_m, seconds_until),
            distance_m,
            seconds_until,
        }
    }

    fn require_store(&self) -> Result<Arc<TimetableStore>, SelectError> {
        self.data.clone().map_err(SelectError::Unavailable)
    }

    /// Tick once now, replace the countdown task, and reset the rush alert.
    fn restart(&self, state: &mut WidgetState, store: &Arc<TimetableStore>) {
        state.alert = RushAlert::Hidden;
        state.alert_in_flight = None;
        state.last_tick = None;

        let generation = state.session.generation();
        info!(
            station = ?state.session.station(),
            day_type = %state.session.day_type(),
            %generation,
            "countdown restarted"
        );

        if state.tick(store, (self.clock)()) {
            state.timer.restart(run_countdown(
                Arc::downgrade(&self.state),
                Arc::clone(store),
                Arc::clone(&self.clock),
                self.tick_interval,
                generation,
            ));
        } else {
            state.timer.stop();
        }

        if let Some(home) = self.home {
            let widget = self.clone();
            tokio::spawn(async move {
                widget.refresh_rush_alert(&home).await;
            });
        }
    }

    fn snapshot_locked(&self, state: &WidgetState) -> WidgetSnapshot {
        let status = match (&self.data, state.session.state()) {
            (Err(reason), _) => WidgetStatus::Unavailable {
                reason: reason.clone(),
            },
            (Ok(_), CountdownState::Idle) => WidgetStatus::Idle,
            (Ok(_), CountdownState::Running) => WidgetStatus::Running,
            (Ok(_), CountdownState::Ended) => WidgetStatus::Ended,
        };

        let station = self
            .store()
            .zip(state.session.station())
            .and_then(|(store, id)| store.get(id))
            .map(|s| StationSummary {
                id: s.id.clone(),
                name: s.name.clone(),
                line: s.line.clone(),
            });

        WidgetSnapshot {
            status,
            generation: state.session.generation(),
            day_type: state.session.day_type(),
            station,
            timer_text: state.last_tick.as_ref().map(|t| t.update.timer_text()),
            countdown: state.last_tick.clone(),
            alert: state.alert,
            alert_message: state.alert.message(),
        }
    }
}

/// Periodic countdown task for one session generation.
///
/// Exits when the widget is dropped, the selection changes, or service ends.
async fn run_countdown(
    weak: Weak<Mutex<WidgetState>>,
    store: Arc<TimetableStore>,
    clock: Clock,
    period: Duration,
    generation: Generation,
) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // First tick is immediate; the caller already ticked

    loop {
        interval.tick().await;

        let Some(shared) = weak.upgrade() else {
            break;
        };
        let mut state = shared.lock().await;
        if state.session.generation() != generation {
            break;
        }
        if !state.tick(&store, clock()) {
            debug!(%generation, "countdown stopped");
            break;
        }
    }
}
