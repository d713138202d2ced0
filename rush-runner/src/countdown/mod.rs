//! Countdown engine.
//!
//! On a fixed cadence the engine re-resolves the next departure for the
//! selected station, rolls the active day-type over at the end of service,
//! and formats the time remaining.

mod display;
mod session;
mod timer;

pub use display::{CountdownDisplay, ENDED_DISPLAY};
pub use session::{CountdownState, CountdownUpdate, Generation, Session, Tick, UpcomingTrain};
pub use timer::CountdownTimer;
