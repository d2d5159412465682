//! Schedule builder: availability samples to free-time intervals.
//!
//! # Algorithm
//!
//! 1. Collect, per slot start, the rooms reported free (slots may be
//!    recorded in any order; a `BTreeMap` keeps them ascending).
//! 2. For each room, gather the ascending slot starts at which it was free.
//! 3. Walk that list pairwise. A gap larger than one step closes the
//!    current run as `[run_start, last_slot + 0.5)`; the next slot opens a
//!    new run. The end of the list always closes the final run.
//!
//! A single missed slot splits a run. Rooms never reported free are absent
//! from the output.
//!
//! # Complexity
//! O(s * r + n log n) where s=slots, r=rooms per slot, n=room sightings.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{HalfHour, Room, RoomSchedule, ScheduledRoom, TimeInterval};
use crate::validation::ValidationError;

/// Aggregates per-slot availability into per-room schedules.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use room_booking::models::{HalfHour, Room, TimeInterval};
/// use room_booking::scheduler::ScheduleBuilder;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let room = Room::new("A").with_capacity(4);
///
/// let mut builder = ScheduleBuilder::new(date);
/// for hours in [9.0, 9.5, 11.0] {
///     builder.record(HalfHour::from_hours(hours).unwrap(), vec![room.clone()]);
/// }
///
/// let rooms = builder.build().unwrap();
/// assert_eq!(
///     rooms[0].schedule.free_times(),
///     &[
///         TimeInterval::from_hours(9.0, 10.0).unwrap(),
///         TimeInterval::from_hours(11.0, 11.5).unwrap(),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    date: NaiveDate,
    slots: BTreeMap<HalfHour, Vec<Room>>,
}

impl ScheduleBuilder {
    /// Creates a builder for one calendar day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: BTreeMap::new(),
        }
    }

    /// Records the rooms reported free for the slot starting at `slot`.
    ///
    /// Recording the same slot twice adds to its room set.
    pub fn record(&mut self, slot: HalfHour, rooms: Vec<Room>) -> &mut Self {
        self.slots.entry(slot).or_default().extend(rooms);
        self
    }

    /// Adds a slot's rooms and returns the builder.
    pub fn with_slot(mut self, slot: HalfHour, rooms: Vec<Room>) -> Self {
        self.record(slot, rooms);
        self
    }

    /// Builds one scheduled room per room id seen.
    ///
    /// Rooms appear in first-seen order across ascending slots. Fails only
    /// if a recorded slot starts at 24:00, which leaves no room for a slot.
    pub fn build(&self) -> Result<Vec<ScheduledRoom>, ValidationError> {
        let mut order: Vec<&Room> = Vec::new();
        let mut free_slots: HashMap<&str, Vec<HalfHour>> = HashMap::new();

        for (&slot, rooms) in &self.slots {
            for room in rooms {
                let seen = free_slots.entry(room.id.as_str()).or_insert_with(|| {
                    order.push(room);
                    Vec::new()
                });
                // The same room listed twice for one slot counts once
                if seen.last() != Some(&slot) {
                    seen.push(slot);
                }
            }
        }

        let mut result = Vec::with_capacity(order.len());
        for room in order {
            let slots = free_slots
                .get(room.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut schedule = RoomSchedule::new(self.date);
            for interval in free_runs(slots)? {
                schedule.add_free_time(interval);
            }
            debug!(
                room = %room.id,
                intervals = schedule.free_times().len(),
                "built room schedule"
            );
            result.push(ScheduledRoom::new(room.clone(), schedule));
        }

        Ok(result)
    }
}

/// Splits ascending slot starts into maximal runs of consecutive slots.
fn free_runs(slots: &[HalfHour]) -> Result<Vec<TimeInterval>, ValidationError> {
    let mut runs = Vec::new();
    let Some(&first) = slots.first() else {
        return Ok(runs);
    };

    let mut run_start = first;
    for (i, &current) in slots.iter().enumerate() {
        match slots.get(i + 1) {
            Some(&next) if next - current <= HalfHour::STEP => {}
            next => {
                runs.push(TimeInterval::new(run_start, current + HalfHour::STEP)?);
                if let Some(&next) = next {
                    run_start = next;
                }
            }
        }
    }

    Ok(runs)
}
