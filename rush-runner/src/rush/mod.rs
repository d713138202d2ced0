//! Rush alert: can the user still make the next train?
//!
//! Distance from the user to the station is converted into walking and
//! running ETAs at fixed average speeds and compared against the time
//! left before departure.

mod alert;
mod classify;
mod distance;
mod position;

pub use alert::RushAlert;
pub use classify::{
    Classification, RUN_BUFFER_SECS, RUN_SPEED_MPS, RushTier, WALK_BUFFER_SECS, WALK_SPEED_MPS,
    classify,
};
pub use distance::distance_m;
pub use position::{FixedPosition, NoPosition, PositionError, PositionProvider, PositionRequest};
