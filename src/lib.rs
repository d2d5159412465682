//! Room availability aggregation and greedy day-fill booking.
//!
//! Books shared rooms so that one group holds a room continuously from
//! opening to closing time. Availability is sampled per half-hour slot,
//! folded into per-room free-time windows, and then covered greedily with
//! the longest bookings that fit.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `HalfHour`, `TimeInterval`, `Room`,
//!   `RoomSchedule`, `ScheduledRoom`, `BookingAssignment`, `DayPlan`
//! - **`scheduler`**: `ScheduleBuilder`, `DayFillScheduler`, `DayCoverage`
//! - **`service`**: Collaborator traits and the async `BookingService`
//! - **`config`**: Operating hours and booking limits
//! - **`validation`**: Input checks run before any remote call
//!
//! # Architecture
//!
//! Authentication, transport and the remote API's wire format stay behind
//! the `AvailabilityQuery` and `BookingSubmitter` traits. This crate holds
//! only the scheduling logic and its orchestration.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod validation;

pub use config::BookingConfig;
pub use error::{Error, Result};
