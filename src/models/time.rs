//! Half-hour clock values and time intervals.
//!
//! # Time Model
//! All times are hour-of-day values on a half-hour grid. Internally a
//! [`HalfHour`] counts half-hour steps since midnight, so `9.5` hours is
//! stored as `19`. The same type is used for points and spans, the way a
//! millisecond count would be.
//!
//! Valid clock values lie in `[00:00, 24:00]`; 24:00 is only meaningful as
//! the exclusive end of an interval.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::validation::{ValidationError, ValidationErrorKind};

const STEPS_PER_HOUR: u8 = 2;
const STEPS_PER_DAY: u8 = 24 * STEPS_PER_HOUR;

/// A half-hour-granular clock value or span.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct HalfHour(u8);

impl HalfHour {
    /// Midnight, or an empty span.
    pub const ZERO: Self = Self(0);
    /// One slot (0.5 hours).
    pub const STEP: Self = Self(1);
    /// 24:00, the exclusive end of the day.
    pub const END_OF_DAY: Self = Self(STEPS_PER_DAY);

    /// Creates a value from a raw step count, clamped to the end of the day.
    pub const fn from_steps(steps: u8) -> Self {
        if steps > STEPS_PER_DAY {
            Self(STEPS_PER_DAY)
        } else {
            Self(steps)
        }
    }

    /// Parses an hour-of-day value such as `9.0` or `13.5`.
    ///
    /// Fails if the value is not finite, lies outside `[0, 24]`, or is not
    /// a multiple of 0.5.
    pub fn from_hours(hours: f64) -> Result<Self, ValidationError> {
        let steps = hours * f64::from(STEPS_PER_HOUR);
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) || steps.fract() != 0.0 {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidTime,
                format!("{hours} is not a half-hour value within the day"),
            ));
        }
        Ok(Self(steps as u8))
    }

    /// Hour-of-day value (e.g. `9.5`).
    #[inline]
    pub fn hours(self) -> f64 {
        f64::from(self.0) / f64::from(STEPS_PER_HOUR)
    }

    /// Number of half-hour steps.
    #[inline]
    pub fn steps(self) -> u8 {
        self.0
    }

    /// Subtraction floored at zero.
    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Wall-clock time, or `None` for 24:00.
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        let minutes = u32::from(self.0) * 30;
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
    }
}

impl Add for HalfHour {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_steps(self.0.saturating_add(rhs.0))
    }
}

impl Sub for HalfHour {
    type Output = Self;

    /// Floors at zero; callers compare before subtracting.
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl TryFrom<f64> for HalfHour {
    type Error = ValidationError;

    fn try_from(hours: f64) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
    }
}

impl From<HalfHour> for f64 {
    fn from(value: HalfHour) -> Self {
        value.hours()
    }
}

impl std::fmt::Display for HalfHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = u32::from(self.0) * 30;
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// A time interval `[from, to)` within one day.
///
/// Invariant: `from < to <= 24:00`. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    from: HalfHour,
    to: HalfHour,
}

#[derive(Deserialize)]
struct RawInterval {
    from: HalfHour,
    to: HalfHour,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.from, raw.to)
    }
}

impl TimeInterval {
    /// Creates a new interval, checking `from < to`.
    pub fn new(from: HalfHour, to: HalfHour) -> Result<Self, ValidationError> {
        if from >= to {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!("Interval start {from} is not before end {to}"),
            ));
        }
        Ok(Self { from, to })
    }

    /// Creates an interval from hour-of-day values.
    pub fn from_hours(from: f64, to: f64) -> Result<Self, ValidationError> {
        Self::new(HalfHour::from_hours(from)?, HalfHour::from_hours(to)?)
    }

    /// A single slot starting at `start`.
    pub fn slot(start: HalfHour) -> Result<Self, ValidationError> {
        Self::new(start, start + HalfHour::STEP)
    }

    /// Interval start (inclusive).
    #[inline]
    pub fn from(&self) -> HalfHour {
        self.from
    }

    /// Interval end (exclusive).
    #[inline]
    pub fn to(&self) -> HalfHour {
        self.to
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> HalfHour {
        self.to - self.from
    }

    /// Whether `point` lies in `[from, to]` (both ends inclusive).
    #[inline]
    pub fn contains(&self, point: HalfHour) -> bool {
        self.from <= point && point <= self.to
    }

    /// Whether both `from` and `to` lie within this interval.
    #[inline]
    pub fn contains_block(&self, from: HalfHour, to: HalfHour) -> bool {
        self.contains(from) && self.contains(to)
    }

    /// Whether two intervals share some time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from < other.to && other.from < self.to
    }

    /// Whether two intervals overlap or meet end to start.
    pub fn touches(&self, other: &Self) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Start of every half-hour slot in `[from, to)`.
    pub fn slot_starts(&self) -> impl Iterator<Item = HalfHour> {
        (self.from.steps()..self.to.steps()).map(HalfHour::from_steps)
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
