//! Timetable store: station records loaded once at startup.
//!
//! Data comes from a `stations.json` file (local path or URL) and is
//! treated as immutable for the lifetime of the process.

mod error;
mod source;
mod store;
mod types;

pub use error::TimetableError;
pub use source::TimetableSource;
pub use store::{StationMatch, TimetableStore};
