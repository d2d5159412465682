//! Day-fill coverage metrics.
//!
//! Summarises how much of the operating day a plan covers and, once the
//! plan was submitted, how many bookings the service accepted.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Covered hours | `covered_to - min_hour` (0 for an empty plan) |
//! | Coverage rate | Covered hours / operating day length |
//! | Uncovered | `[covered_to, max_hour)` when coverage stops short |
//! | Longest block | Largest single assignment |
//! | Submitted / failed | Submission outcome tallies |

use crate::config::BookingConfig;
use crate::models::{DayPlan, HalfHour, SubmissionReport, TimeInterval};

/// Coverage indicators for one planned day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCoverage {
    /// Hours between opening time and the end of coverage.
    pub covered_hours: f64,
    /// Fraction of the operating day covered (0.0..1.0).
    pub coverage_rate: f64,
    /// Remainder of the day left without a booking.
    pub uncovered: Option<TimeInterval>,
    /// Number of assignments (one per distinct room).
    pub booking_count: usize,
    /// Longest single block, in hours.
    pub longest_block_hours: f64,
    /// Assignments the booking service accepted.
    pub submitted: usize,
    /// Assignments the booking service rejected.
    pub failed: usize,
}

impl DayCoverage {
    /// Computes coverage of `plan` against the configured operating day.
    pub fn calculate(plan: &DayPlan, config: &BookingConfig) -> Self {
        let opening = config.min_hour;
        let closing = config.max_hour;

        let covered = if plan.is_empty() {
            HalfHour::ZERO
        } else {
            plan.covered_to.saturating_sub(opening)
        };
        let day_length = closing.saturating_sub(opening);

        let coverage_rate = if day_length == HalfHour::ZERO {
            0.0
        } else {
            covered.hours() / day_length.hours()
        };

        let uncovered_from = if plan.is_empty() {
            opening
        } else {
            plan.covered_to
        };

        let longest_block_hours = plan
            .assignments
            .iter()
            .map(|a| a.interval.duration())
            .max()
            .unwrap_or(HalfHour::ZERO)
            .hours();

        Self {
            covered_hours: covered.hours(),
            coverage_rate,
            uncovered: TimeInterval::new(uncovered_from, closing).ok(),
            booking_count: plan.assignment_count(),
            longest_block_hours,
            submitted: 0,
            failed: 0,
        }
    }

    /// Adds submission tallies from `reports`.
    pub fn with_outcomes(mut self, reports: &[SubmissionReport]) -> Self {
        self.submitted = reports.iter().filter(|r| r.outcome.is_success()).count();
        self.failed = reports.len() - self.submitted;
        self
    }

    /// Whether the whole operating day is covered.
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_none()
    }
}
