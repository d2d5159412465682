//! Input validation for booking requests.
//!
//! Checks booking inputs before any collaborator is contacted.
//! Detects:
//! - Attendee counts outside the configured bounds
//! - Booking dates outside the allowed booking window
//! - Room schedules that do not describe the planning day
//! - The same room listed more than once
//!
//! Time alignment and interval invariants are checked where the values are
//! constructed ([`HalfHour::from_hours`](crate::models::HalfHour::from_hours),
//! [`TimeInterval::new`](crate::models::TimeInterval::new)) and report the
//! same [`ValidationError`] type.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use thiserror::Error;

use crate::config::BookingConfig;
use crate::models::ScheduledRoom;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Attendee count outside `[min_attendees, max_attendees]`.
    InvalidAttendees,
    /// A clock value is not a half-hour multiple within the day.
    InvalidTime,
    /// An interval does not satisfy `from < to`.
    InvalidInterval,
    /// Requested date lies outside the booking window.
    DateOutOfWindow,
    /// Schedules that must share one calendar day do not.
    DateMismatch,
    /// Two rooms share the same ID.
    DuplicateRoom,
    /// Configuration values are inconsistent.
    InvalidConfig,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidAttendees => "invalid attendees",
            Self::InvalidTime => "invalid time",
            Self::InvalidInterval => "invalid interval",
            Self::DateOutOfWindow => "date out of window",
            Self::DateMismatch => "date mismatch",
            Self::DuplicateRoom => "duplicate room",
            Self::InvalidConfig => "invalid config",
        };
        f.write_str(name)
    }
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks that `attendees` lies within the configured bounds (inclusive).
pub fn validate_attendees(attendees: u32, config: &BookingConfig) -> Result<(), ValidationError> {
    if attendees < config.min_attendees || attendees > config.max_attendees {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidAttendees,
            format!(
                "Attendee count {} outside allowed range {}..={}",
                attendees, config.min_attendees, config.max_attendees
            ),
        ));
    }
    Ok(())
}

/// Checks that `date` falls in `[today, today + booking_window_days]`.
pub fn validate_booking_date(
    date: NaiveDate,
    today: NaiveDate,
    config: &BookingConfig,
) -> Result<(), ValidationError> {
    let last = today + Duration::days(i64::from(config.booking_window_days));
    if date < today || date > last {
        return Err(ValidationError::new(
            ValidationErrorKind::DateOutOfWindow,
            format!("Date {date} outside booking window {today}..={last}"),
        ));
    }
    Ok(())
}

/// Validates a schedule-building request.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(
    attendees: u32,
    date: NaiveDate,
    today: NaiveDate,
    config: &BookingConfig,
) -> ValidationResult {
    let errors: Vec<ValidationError> = [
        validate_attendees(attendees, config),
        validate_booking_date(date, today, config),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks the rooms handed to the day-fill scheduler.
///
/// Checks:
/// 1. Every room's schedule describes `date`
/// 2. No room id appears twice (one room can hold only one booking per day)
///
/// An empty slice is valid.
pub fn validate_day_rooms(date: NaiveDate, rooms: &[ScheduledRoom]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut room_ids = HashSet::new();

    for r in rooms {
        if r.date() != date {
            errors.push(ValidationError::new(
                ValidationErrorKind::DateMismatch,
                format!(
                    "Room '{}' scheduled for {}, expected {}",
                    r.room.id,
                    r.date(),
                    date
                ),
            ));
        }

        if !room_ids.insert(r.room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoom,
                format!("Duplicate room ID: {}", r.room.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
