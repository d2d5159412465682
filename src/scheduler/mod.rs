//! Schedule building, greedy day filling and coverage evaluation.
//!
//! # Components
//!
//! `ScheduleBuilder` turns per-slot availability samples into per-room
//! free-time intervals. `DayFillScheduler` greedily picks one room per
//! block, longest block first, until the operating day is covered or no
//! room fits. `DayCoverage` summarises the result.
//!
//! The day-fill heuristic is not optimal: it never backtracks and uses
//! each room at most once, favouring few long bookings over many short
//! ones.

mod builder;
mod coverage;
mod day_fill;

pub use builder::ScheduleBuilder;
pub use coverage::DayCoverage;
pub use day_fill::DayFillScheduler;
