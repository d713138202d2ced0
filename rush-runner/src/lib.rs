//! Station timetable widget server.
//!
//! Counts down to the next train at a chosen station, rolls over to
//! tomorrow's timetable when the day's service has finished, and estimates
//! whether the user can reach the platform in time from their position.

pub mod config;
pub mod countdown;
pub mod domain;
pub mod resolver;
pub mod rush;
pub mod stations;
pub mod web;
pub mod widget;
