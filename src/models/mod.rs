//! Booking domain models.
//!
//! Provides the data types shared by the schedule builder and the day-fill
//! scheduler: half-hour clock values, free-time intervals, rooms with their
//! per-day schedules, and the resulting booking plan.
//!
//! | Type | Role |
//! |------|------|
//! | `HalfHour` | Clock value or span on the half-hour grid |
//! | `TimeInterval` | Free or booked block `[from, to)` |
//! | `RoomSchedule` | A room's free windows for one day |
//! | `ScheduledRoom` | Room annotated with its schedule |
//! | `DayPlan` | Ordered assignments covering the operating day |

mod booking;
mod room;
mod time;

pub use booking::{BookingAssignment, DayPlan, SubmissionOutcome, SubmissionReport};
pub use room::{Room, RoomSchedule, ScheduledRoom};
pub use time::{HalfHour, TimeInterval};
