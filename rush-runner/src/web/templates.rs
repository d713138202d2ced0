//! Askama templates for the widget page.

use askama::Template;

use crate::domain::Departure;
use crate::rush::RushAlert;
use crate::widget::{WidgetSnapshot, WidgetStatus};

// ============================================================================
// Page Templates
// ============================================================================

/// The widget page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub widget: WidgetView,
    pub timetable: TimetableTemplate,
}

// ============================================================================
// Fragment Templates
// ============================================================================

/// Departure table for the active day-type.
#[derive(Template)]
#[template(path = "timetable.html")]
pub struct TimetableTemplate {
    pub day_type: String,
    pub rows: Vec<DepartureRow>,
}

// ============================================================================
// View Models
// ============================================================================

/// Widget header, countdown and alert.
#[derive(Debug, Clone)]
pub struct WidgetView {
    /// Set when timetable data failed to load.
    pub error: Option<String>,
    pub station_name: String,
    pub line_name: String,
    pub day_type: String,
    pub generation: u64,
    pub timer_text: String,
    /// "Rapid" or the first half of the end-of-service notice.
    pub headline: String,
    /// "for Tokyo" or the second half of the end-of-service notice.
    pub subline: String,
    /// CSS class suffix: safe, warning, danger, unknown.
    pub alert_class: Option<String>,
    pub alert_message: Option<String>,
}

impl WidgetView {
    pub fn from_snapshot(snapshot: &WidgetSnapshot) -> Self {
        let error = match &snapshot.status {
            WidgetStatus::Unavailable { reason } => Some(reason.clone()),
            _ => None,
        };

        let (station_name, line_name) = match &snapshot.station {
            Some(s) => (s.name.clone(), s.line.clone()),
            None if error.is_some() => ("Failed to load timetable".to_string(), String::new()),
            None => ("No station selected".to_string(), String::new()),
        };

        let train = snapshot.countdown.as_ref().and_then(|t| t.update.train());
        let (headline, subline) = match (&snapshot.status, train) {
            (_, Some(train)) => (train.train_type.clone(), format!("for {}", train.destination)),
            (WidgetStatus::Ended, None) => (
                "Today's service".to_string(),
                "has ended".to_string(),
            ),
            _ => (String::new(), String::new()),
        };

        Self {
            error,
            station_name,
            line_name,
            day_type: snapshot.day_type.to_string(),
            generation: snapshot.generation.get(),
            timer_text: snapshot
                .timer_text
                .clone()
                .unwrap_or_else(|| crate::countdown::ENDED_DISPLAY.to_string()),
            headline,
            subline,
            alert_class: alert_class(&snapshot.alert),
            alert_message: snapshot.alert_message.clone(),
        }
    }
}

fn alert_class(alert: &RushAlert) -> Option<String> {
    alert.tier().map(|t| t.as_str().to_string())
}

/// One timetable row.
#[derive(Debug, Clone)]
pub struct DepartureRow {
    pub train_type: String,
    pub destination: String,
    pub time: String,
}

impl DepartureRow {
    pub fn from_departure(d: &Departure) -> Self {
        Self {
            train_type: d.train_type.clone(),
            destination: d.destination.clone(),
            time: d.time.to_string(),
        }
    }
}
