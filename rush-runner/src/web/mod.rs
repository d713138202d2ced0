//! Web layer for the station timetable widget.
//!
//! Serves the widget page, a JSON snapshot for polling clients, selection
//! and position events, and read-only resolver and classifier endpoints.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
