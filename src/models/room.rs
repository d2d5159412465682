//! Room and room schedule models.
//!
//! A [`Room`] is a bookable space looked up from an external directory.
//! Its free time for one calendar day is described by a [`RoomSchedule`].
//! The pairing of the two is a [`ScheduledRoom`]; a plain `Room` carries no
//! schedule at all, so the scheduler can only ever see annotated rooms.
//!
//! # Free-time queries
//! A block is free only if it fits inside a single stored interval.
//! Stored intervals that happen to meet end to start are not joined;
//! use [`RoomSchedule::coalesced`] to get merged windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{HalfHour, TimeInterval};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Directory identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum number of attendees.
    pub capacity: u32,
}

impl Room {
    /// Creates a room with no name and zero capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: 0,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether the room seats `attendees`.
    #[inline]
    pub fn fits(&self, attendees: u32) -> bool {
        self.capacity >= attendees
    }
}

/// Free-time windows of one room on one calendar day.
///
/// Intervals are non-overlapping. The builder produces them in ascending
/// order, but queries do not depend on ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSchedule {
    /// Calendar day the intervals refer to.
    pub date: NaiveDate,
    free_times: Vec<TimeInterval>,
}

impl RoomSchedule {
    /// Creates an empty schedule (no free time).
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            free_times: Vec::new(),
        }
    }

    /// Adds a free-time interval.
    pub fn with_free_time(mut self, interval: TimeInterval) -> Self {
        self.free_times.push(interval);
        self
    }

    /// Appends a free-time interval.
    pub fn add_free_time(&mut self, interval: TimeInterval) {
        self.free_times.push(interval);
    }

    /// Appends every interval of `other`, which must describe the same day.
    pub fn merge(&mut self, other: &RoomSchedule) -> Result<(), ValidationError> {
        if other.date != self.date {
            return Err(ValidationError::new(
                ValidationErrorKind::DateMismatch,
                format!(
                    "Cannot merge schedule for {} into schedule for {}",
                    other.date, self.date
                ),
            ));
        }
        self.free_times.extend_from_slice(&other.free_times);
        Ok(())
    }

    /// Stored free-time intervals, in insertion order.
    pub fn free_times(&self) -> &[TimeInterval] {
        &self.free_times
    }

    /// Whether `point` lies within some stored interval (ends inclusive).
    pub fn is_free_at(&self, point: HalfHour) -> bool {
        self.free_times.iter().any(|i| i.contains(point))
    }

    /// Whether a single stored interval contains both `from` and `to`.
    pub fn is_free_between(&self, from: HalfHour, to: HalfHour) -> bool {
        self.free_times.iter().any(|i| i.contains_block(from, to))
    }

    /// Sorted copy of the intervals with touching or overlapping ones merged.
    pub fn coalesced(&self) -> Vec<TimeInterval> {
        let mut sorted = self.free_times.clone();
        sorted.sort_by_key(|i| (i.from(), i.to()));

        let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
        for interval in sorted {
            match merged.last_mut() {
                Some(last) if last.touches(&interval) => {
                    if interval.to() > last.to() {
                        // from < to holds since last.from <= interval.from < interval.to
                        *last = TimeInterval::new(last.from(), interval.to())
                            .unwrap_or(*last);
                    }
                }
                _ => merged.push(interval),
            }
        }
        merged
    }

    /// Total free time across all stored intervals.
    pub fn total_free(&self) -> HalfHour {
        self.free_times
            .iter()
            .fold(HalfHour::ZERO, |acc, i| acc + i.duration())
    }
}

/// A room annotated with its schedule for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRoom {
    /// The directory entry.
    pub room: Room,
    /// Free time on the scheduling day.
    pub schedule: RoomSchedule,
}

impl ScheduledRoom {
    /// Pairs a room with its schedule.
    pub fn new(room: Room, schedule: RoomSchedule) -> Self {
        Self { room, schedule }
    }

    /// Calendar day of the schedule.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.schedule.date
    }

    /// Whether the room is free for the whole block `[from, to]`.
    #[inline]
    pub fn is_free_between(&self, from: HalfHour, to: HalfHour) -> bool {
        self.schedule.is_free_between(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(hours: f64) -> HalfHour {
        HalfHour::from_hours(hours).unwrap()
    }

    fn iv(from: f64, to: f64) -> TimeInterval {
        TimeInterval::from_hours(from, to).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_room_builder() {
        let r = Room::new("R101").with_name("Group room 101").with_capacity(6);
        assert_eq!(r.id, "R101");
        assert_eq!(r.name, "Group room 101");
        assert!(r.fits(6));
        assert!(!r.fits(7));
    }

    #[test]
    fn test_is_free_at_inclusive() {
        let s = RoomSchedule::new(date())
            .with_free_time(iv(9.0, 10.5))
            .with_free_time(iv(11.0, 12.0));

        assert!(s.is_free_at(h(9.0)));
        assert!(s.is_free_at(h(10.5))); // end inclusive
        assert!(!s.is_free_at(h(8.5)));
        assert!(s.is_free_at(h(12.0)));
        assert!(!s.is_free_at(h(12.5)));
    }

    #[test]
    fn test_is_free_between_single_interval() {
        let s = RoomSchedule::new(date()).with_free_time(iv(9.0, 12.0));
        assert!(s.is_free_between(h(9.0), h(12.0)));
        assert!(s.is_free_between(h(10.0), h(11.0)));
        assert!(!s.is_free_between(h(11.0), h(12.5)));
    }

    #[test]
    fn test_is_free_between_rejects_adjacent_intervals() {
        // Numerically contiguous, but recorded separately
        let s = RoomSchedule::new(date())
            .with_free_time(iv(9.0, 10.0))
            .with_free_time(iv(10.0, 11.0));

        assert!(s.is_free_between(h(9.0), h(10.0)));
        assert!(s.is_free_between(h(10.0), h(11.0)));
        assert!(!s.is_free_between(h(9.0), h(11.0)));
    }

    #[test]
    fn test_unordered_intervals_query() {
        let s = RoomSchedule::new(date())
            .with_free_time(iv(15.0, 18.0))
            .with_free_time(iv(9.0, 10.0));
        assert!(s.is_free_between(h(15.5), h(17.0)));
        assert!(s.is_free_at(h(9.5)));
    }

    #[test]
    fn test_coalesced() {
        let s = RoomSchedule::new(date())
            .with_free_time(iv(10.0, 11.0))
            .with_free_time(iv(14.0, 15.0))
            .with_free_time(iv(9.0, 10.0))
            .with_free_time(iv(10.5, 12.0));

        assert_eq!(s.coalesced(), vec![iv(9.0, 12.0), iv(14.0, 15.0)]);
        // The stored intervals are untouched
        assert_eq!(s.free_times().len(), 4);
    }

    #[test]
    fn test_merge_same_day() {
        let mut a = RoomSchedule::new(date()).with_free_time(iv(9.0, 10.0));
        let b = RoomSchedule::new(date()).with_free_time(iv(13.0, 14.5));
        a.merge(&b).unwrap();
        assert_eq!(a.free_times(), &[iv(9.0, 10.0), iv(13.0, 14.5)]);
        assert_eq!(a.total_free(), h(2.5));
    }

    #[test]
    fn test_merge_rejects_other_day() {
        let mut a = RoomSchedule::new(date());
        let b = RoomSchedule::new(date().succ_opt().unwrap()).with_free_time(iv(9.0, 10.0));
        let err = a.merge(&b).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DateMismatch);
        assert!(a.free_times().is_empty());
    }
}
