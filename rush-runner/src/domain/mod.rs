//! Domain types for the station timetable widget.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity: departure times are in range,
//! coordinates are on the globe, and timetables are in schedule order.

mod day_type;
mod departure;
mod station;
mod time;
mod timetable;

pub use day_type::{DayType, InvalidDayType};
pub use departure::Departure;
pub use station::{Coordinates, InvalidCoordinates, InvalidStationId, Station, StationId};
pub use time::{DepartureTime, InvalidDepartureTime};
pub use timetable::Timetable;
