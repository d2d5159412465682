//! Booking configuration.
//!
//! Operating hours, booking length limit, attendee bounds and the booking
//! window are carried in one immutable [`BookingConfig`] value that every
//! component receives explicitly. Values deserialize from hour numbers
//! (`"min_hour": 9.0`); missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::models::{HalfHour, TimeInterval};
use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Booking configuration.
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `min_hour` | 09:00 |
/// | `max_hour` | 22:00 |
/// | `max_booking_duration` | 3 hours |
/// | `min_attendees` | 1 |
/// | `max_attendees` | 10 |
/// | `booking_window_days` | 14 |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Opening time of the operating day.
    pub min_hour: HalfHour,
    /// Closing time of the operating day (exclusive).
    pub max_hour: HalfHour,
    /// Longest single booking.
    pub max_booking_duration: HalfHour,
    /// Fewest attendees a booking may name.
    pub min_attendees: u32,
    /// Most attendees a booking may name.
    pub max_attendees: u32,
    /// How many days ahead of today a booking may be placed.
    pub booking_window_days: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            min_hour: HalfHour::from_steps(18),
            max_hour: HalfHour::from_steps(44),
            max_booking_duration: HalfHour::from_steps(6),
            min_attendees: 1,
            max_attendees: 10,
            booking_window_days: 14,
        }
    }
}

impl BookingConfig {
    /// Sets the operating day.
    pub fn with_operating_hours(mut self, min_hour: HalfHour, max_hour: HalfHour) -> Self {
        self.min_hour = min_hour;
        self.max_hour = max_hour;
        self
    }

    /// Sets the longest single booking.
    pub fn with_max_booking_duration(mut self, duration: HalfHour) -> Self {
        self.max_booking_duration = duration;
        self
    }

    /// Sets the attendee bounds (inclusive).
    pub fn with_attendee_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_attendees = min;
        self.max_attendees = max;
        self
    }

    /// Sets the booking window length.
    pub fn with_booking_window_days(mut self, days: u32) -> Self {
        self.booking_window_days = days;
        self
    }

    /// Checks internal consistency.
    ///
    /// Checks:
    /// 1. `min_hour < max_hour`
    /// 2. `max_booking_duration` is at least one slot
    /// 3. `1 <= min_attendees <= max_attendees`
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.min_hour >= self.max_hour {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!(
                    "Opening time {} is not before closing time {}",
                    self.min_hour, self.max_hour
                ),
            ));
        }

        if self.max_booking_duration < HalfHour::STEP {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                "Maximum booking duration must be at least one slot",
            ));
        }

        if self.min_attendees == 0 || self.min_attendees > self.max_attendees {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!(
                    "Attendee bounds {}..={} are not a valid range",
                    self.min_attendees, self.max_attendees
                ),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The operating day as an interval, if `min_hour < max_hour`.
    pub fn operating_day(&self) -> Option<TimeInterval> {
        TimeInterval::new(self.min_hour, self.max_hour).ok()
    }

    /// Every half-hour slot of the operating day, in ascending order.
    pub fn slots(&self) -> Vec<TimeInterval> {
        self.operating_day()
            .map(|day| {
                day.slot_starts()
                    .filter_map(|start| TimeInterval::slot(start).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
