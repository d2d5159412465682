//! Booking plan (solution) model.
//!
//! A [`DayPlan`] is the ordered list of room/time-block assignments the
//! day-fill scheduler produced for one calendar day. It may cover only part
//! of the operating day; `covered_to` records how far coverage reached.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{HalfHour, Room, TimeInterval};

/// One room reserved for one contiguous block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAssignment {
    /// Reserved room.
    pub room: Room,
    /// Reserved block.
    pub interval: TimeInterval,
}

impl BookingAssignment {
    /// Creates a new assignment.
    pub fn new(room: Room, interval: TimeInterval) -> Self {
        Self { room, interval }
    }

    /// Start of every half-hour slot in the block, on `date`.
    ///
    /// This is the form the booking service expects on submission.
    pub fn timestamps(&self, date: NaiveDate) -> Vec<NaiveDateTime> {
        self.interval
            .slot_starts()
            .filter_map(HalfHour::to_naive_time)
            .map(|t| date.and_time(t))
            .collect()
    }
}

/// Result of the day-fill scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Scheduling day.
    pub date: NaiveDate,
    /// Assignments in scheduling order (ascending time).
    pub assignments: Vec<BookingAssignment>,
    /// End of the covered range; `ZERO` when nothing was assigned.
    pub covered_to: HalfHour,
}

impl DayPlan {
    /// Creates an empty plan.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            assignments: Vec::new(),
            covered_to: HalfHour::ZERO,
        }
    }

    /// Records an assignment and advances coverage to its end.
    pub fn add_assignment(&mut self, assignment: BookingAssignment) {
        self.covered_to = assignment.interval.to();
        self.assignments.push(assignment);
    }

    /// Whether coverage reaches `closing`.
    pub fn covers_until(&self, closing: HalfHour) -> bool {
        self.covered_to == closing
    }

    /// The assignment covering `point`, if any.
    ///
    /// Blocks are half-open here: a boundary point belongs to the block
    /// that starts there.
    pub fn assignment_at(&self, point: HalfHour) -> Option<&BookingAssignment> {
        self.assignments
            .iter()
            .find(|a| a.interval.from() <= point && point < a.interval.to())
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the plan holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Outcome of submitting one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// The booking service accepted the reservation.
    Submitted,
    /// The booking service rejected it or could not be reached.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl SubmissionOutcome {
    /// Whether the submission succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}

/// An assignment paired with its submission outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// The scheduled block.
    pub assignment: BookingAssignment,
    /// What happened when it was submitted.
    pub outcome: SubmissionOutcome,
}
