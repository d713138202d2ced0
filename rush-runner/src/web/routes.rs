//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use chrono::NaiveDateTime;
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::countdown::Generation;
use crate::domain::{Coordinates, DayType, Station, StationId};
use crate::resolver::resolve_next;
use crate::rush::{PositionError, RushAlert, classify};
use crate::stations::TimetableStore;
use crate::widget::{PositionOutcome, SelectError, WidgetSnapshot};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/state", get(widget_state))
        .route("/api/select", post(select))
        .route("/api/position", post(report_position))
        .route("/api/stations/search", get(search_stations))
        .route("/api/stations/:id/timetable", get(station_timetable))
        .route("/api/stations/:id/next", get(next_departure))
        .route("/api/classify", get(classify_rush))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The widget page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.widget.snapshot().await;
    let departures = state.widget.active_departures().await;

    let page = IndexTemplate {
        widget: WidgetView::from_snapshot(&snapshot),
        timetable: TimetableTemplate {
            day_type: snapshot.day_type.to_string(),
            rows: departures.iter().map(DepartureRow::from_departure).collect(),
        },
    };
    let html = page.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Current session snapshot.
async fn widget_state(State(state): State<AppState>) -> Json<WidgetSnapshot> {
    Json(state.widget.snapshot().await)
}

/// Apply a station and/or day-type selection.
///
/// When both are given the station is switched first.
async fn select(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<WidgetSnapshot>, AppError> {
    let station = req
        .station_id
        .as_deref()
        .map(parse_station_id)
        .transpose()?;
    let day_type = req.day_type.as_deref().map(parse_day_type).transpose()?;

    if station.is_none() && day_type.is_none() {
        return Err(AppError::BadRequest {
            message: "Expected station_id or day_type".to_string(),
        });
    }

    let mut snapshot = None;
    if let Some(id) = station {
        snapshot = Some(state.widget.select_station(id).await?);
    }
    if let Some(day_type) = day_type {
        snapshot = Some(state.widget.select_day_type(day_type).await?);
    }

    match snapshot {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Ok(Json(state.widget.snapshot().await)),
    }
}

/// Deliver a browser position fix or failure.
async fn report_position(
    State(state): State<AppState>,
    Json(req): Json<PositionReport>,
) -> Result<Json<PositionResponse>, AppError> {
    let fix = match (&req.error, req.latitude, req.longitude) {
        (Some(reason), _, _) => Err(position_error(reason)),
        (None, Some(lat), Some(lon)) => {
            Ok(Coordinates::new(lat, lon).map_err(|e| AppError::BadRequest {
                message: e.to_string(),
            })?)
        }
        _ => {
            return Err(AppError::BadRequest {
                message: "Expected latitude and longitude, or error".to_string(),
            });
        }
    };

    let generation = Generation::new(req.generation);
    let response = match state.widget.apply_position(generation, fix).await {
        PositionOutcome::Applied(alert) => PositionResponse {
            outcome: "applied",
            generation,
            alert: Some(alert),
            message: alert.message(),
        },
        PositionOutcome::Stale => PositionResponse {
            outcome: "stale",
            generation,
            alert: None,
            message: None,
        },
    };

    Ok(Json(response))
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let store = state.widget.store().ok_or_else(unavailable)?;
    let limit = req.limit.unwrap_or(10).min(50);

    let stations = store
        .search(&req.q, limit)
        .into_iter()
        .map(|m| StationSearchResult {
            id: m.id.to_string(),
            name: m.name,
        })
        .collect();

    Ok(Json(StationSearchResponse { stations }))
}

/// A station's departures for one day-type.
async fn station_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<TimetableRequest>,
) -> Result<Json<TimetableResponse>, AppError> {
    let day_type = match req.day.as_deref() {
        Some(day) => parse_day_type(day)?,
        None => DayType::for_date(state.widget.now().date()),
    };
    let store = state.widget.store().ok_or_else(unavailable)?;
    let station = find_station(store, &id)?;

    Ok(Json(TimetableResponse {
        station_id: station.id.to_string(),
        station_name: station.name.clone(),
        line_name: station.line.clone(),
        day_type,
        departures: station
            .timetable
            .departures(day_type)
            .iter()
            .map(DepartureResult::from_departure)
            .collect(),
    }))
}

/// Resolve a station's next departure without touching the session.
async fn next_departure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<NextDepartureRequest>,
) -> Result<Json<NextDepartureResponse>, AppError> {
    let at = match req.at.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<NaiveDateTime>()
            .map_err(|e| AppError::BadRequest {
                message: format!("Invalid time {raw:?}: {e}"),
            })?,
        None => state.widget.now(),
    };
    let day_type = match req.day.as_deref() {
        Some(day) => parse_day_type(day)?,
        None => DayType::for_date(at.date()),
    };
    let store = state.widget.store().ok_or_else(unavailable)?;
    let station = find_station(store, &id)?;

    let resolution = resolve_next(&station.timetable, day_type, at);
    debug!(station = %station.id, %day_type, %at, next = ?resolution.next, "resolved");

    Ok(Json(NextDepartureResponse::from_resolution(
        &resolution,
        day_type,
        at,
    )))
}

/// Classify a distance and time budget.
async fn classify_rush(
    Query(req): Query<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    if !req.distance.is_finite() || req.distance < 0.0 || !req.seconds.is_finite() {
        return Err(AppError::BadRequest {
            message: "distance must be a non-negative number and seconds finite".to_string(),
        });
    }

    let classification = classify(req.distance, req.seconds);
    let alert = RushAlert::Assessed {
        classification,
        distance_m: req.distance,
        seconds_until: req.seconds,
    };

    Ok(Json(ClassifyResponse {
        classification,
        message: alert.message(),
    }))
}

fn parse_station_id(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid station id {raw:?}: {e}"),
    })
}

fn parse_day_type(raw: &str) -> Result<DayType, AppError> {
    raw.parse::<DayType>().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

fn position_error(reason: &str) -> PositionError {
    match reason.parse::<PositionError>() {
        Ok(e) => e,
        Err(never) => match never {},
    }
}

fn find_station<'a>(
    store: &'a TimetableStore,
    raw: &str,
) -> Result<&'a Station, AppError> {
    let id = parse_station_id(raw)?;
    store.get(&id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown station: {id}"),
    })
}

fn unavailable() -> AppError {
    AppError::Unavailable {
        message: "Timetable data unavailable".to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SelectError> for AppError {
    fn from(e: SelectError) -> Self {
        match e {
            SelectError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            SelectError::Unavailable(_) => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
