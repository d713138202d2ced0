//! Application state for the web layer.

use crate::widget::Widget;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The single widget session served to every client
    pub widget: Widget,
}

impl AppState {
    pub fn new(widget: Widget) -> Self {
        Self { widget }
    }
}
