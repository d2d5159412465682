//! Greedy day-fill scheduler.
//!
//! # Algorithm
//!
//! 1. Start at opening time with the longest allowed block.
//! 2. Scan the pool of unassigned rooms in input order for the first room
//!    free for the whole block `[current, current + duration]`.
//! 3. On a hit, record the assignment, remove the room from the pool,
//!    advance to the block end and reset the duration to
//!    `min(closing - current, max_booking_duration)`.
//! 4. On a miss, shrink the duration by one slot and retry at the same
//!    time. When the duration reaches zero the loop stops and the rest of
//!    the day stays uncovered.
//!
//! Each room is used at most once per run. No backtracking: a committed
//! room is never reconsidered.
//!
//! # Complexity
//! O(d * r * f) where d=duration steps tried, r=rooms, f=free intervals.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::BookingConfig;
use crate::models::{BookingAssignment, DayPlan, HalfHour, ScheduledRoom, TimeInterval};

/// Greedy scheduler that covers one operating day with room bookings.
///
/// Rooms are assumed to describe the planned date, to appear once each and
/// to seat the attendees. Callers check the first two with
/// [`validate_day_rooms`](crate::validation::validate_day_rooms).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use room_booking::config::BookingConfig;
/// use room_booking::models::{Room, RoomSchedule, ScheduledRoom, TimeInterval};
/// use room_booking::scheduler::DayFillScheduler;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let free_all_day = RoomSchedule::new(date)
///     .with_free_time(TimeInterval::from_hours(9.0, 22.0).unwrap());
/// let rooms: Vec<ScheduledRoom> = ["A", "B", "C", "D", "E"]
///     .iter()
///     .map(|id| ScheduledRoom::new(Room::new(*id).with_capacity(4), free_all_day.clone()))
///     .collect();
///
/// let plan = DayFillScheduler::new(BookingConfig::default()).plan(date, &rooms);
/// assert_eq!(plan.assignment_count(), 5);
/// assert_eq!(plan.assignments[4].interval, TimeInterval::from_hours(21.0, 22.0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct DayFillScheduler {
    config: BookingConfig,
}

impl DayFillScheduler {
    /// Creates a scheduler for the given operating day and limits.
    pub fn new(config: BookingConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Plans bookings covering `[min_hour, max_hour)` on `date`.
    ///
    /// Never fails; a day that cannot be fully covered yields a plan whose
    /// `covered_to` stops short of closing time. Room schedules are not
    /// checked against `date` here.
    pub fn plan(&self, date: NaiveDate, rooms: &[ScheduledRoom]) -> DayPlan {
        let mut plan = DayPlan::new(date);

        let opening = self.config.min_hour;
        let closing = self.config.max_hour;
        let max_duration = self.config.max_booking_duration;
        if opening >= closing {
            return plan;
        }

        // Indices into `rooms`, in input order
        let mut pool: Vec<usize> = (0..rooms.len()).collect();
        let mut current = opening;
        let mut duration = max_duration.min(closing - current);

        while plan.covered_to != closing {
            if duration == HalfHour::ZERO {
                debug!(at = %current, "no room free for any block length, stopping");
                break;
            }

            let end = current + duration;
            let hit = pool
                .iter()
                .position(|&idx| rooms[idx].is_free_between(current, end));

            match hit {
                Some(pos) => {
                    let room = &rooms[pool.remove(pos)];
                    // current < end holds because duration > 0 and end <= closing
                    let Ok(interval) = TimeInterval::new(current, end) else {
                        break;
                    };
                    debug!(room = %room.room.id, block = %interval, "assigned block");
                    plan.add_assignment(BookingAssignment::new(room.room.clone(), interval));

                    current = end;
                    duration = max_duration.min(closing - current);
                }
                None => {
                    duration = duration - HalfHour::STEP;
                }
            }
        }

        info!(
            date = %plan.date,
            assignments = plan.assignment_count(),
            covered_to = %plan.covered_to,
            complete = plan.covers_until(closing),
            "planned day"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, RoomSchedule};

    fn h(hours: f64) -> HalfHour {
        HalfHour::from_hours(hours).unwrap()
    }

    fn iv(from: f64, to: f64) -> TimeInterval {
        TimeInterval::from_hours(from, to).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn room_free(id: &str, windows: &[(f64, f64)]) -> ScheduledRoom {
        let schedule = windows
            .iter()
            .fold(RoomSchedule::new(date()), |s, &(from, to)| {
                s.with_free_time(iv(from, to))
            });
        ScheduledRoom::new(Room::new(id).with_capacity(4), schedule)
    }

    fn scheduler() -> DayFillScheduler {
        DayFillScheduler::new(BookingConfig::default())
    }

    fn summary(plan: &DayPlan) -> Vec<(String, TimeInterval)> {
        plan.assignments
            .iter()
            .map(|a| (a.room.id.clone(), a.interval))
            .collect()
    }

    #[test]
    fn test_full_day_with_five_rooms() {
        let rooms: Vec<ScheduledRoom> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|id| room_free(id, &[(9.0, 22.0)]))
            .collect();

        let plan = scheduler().plan(date(), &rooms);
        assert_eq!(
            summary(&plan),
            vec![
                ("A".to_string(), iv(9.0, 12.0)),
                ("B".to_string(), iv(12.0, 15.0)),
                ("C".to_string(), iv(15.0, 18.0)),
                ("D".to_string(), iv(18.0, 21.0)),
                ("E".to_string(), iv(21.0, 22.0)),
            ]
        );
        assert!(plan.covers_until(h(22.0)));
        assert_eq!(plan.date, date());
    }

    #[test]
    fn test_single_room_used_once() {
        let rooms = vec![room_free("A", &[(9.0, 22.0)])];
        let plan = scheduler().plan(date(), &rooms);
        assert_eq!(summary(&plan), vec![("A".to_string(), iv(9.0, 12.0))]);
        assert_eq!(plan.covered_to, h(12.0));
        assert!(!plan.covers_until(h(22.0)));
    }

    #[test]
    fn test_nothing_free_at_opening() {
        let rooms = vec![room_free("A", &[(10.0, 22.0)]), room_free("B", &[(9.5, 12.0)])];
        let plan = scheduler().plan(date(), &rooms);
        assert!(plan.is_empty());
        assert_eq!(plan.covered_to, HalfHour::ZERO);
    }

    #[test]
    fn test_tie_break_prefers_input_order() {
        let first = vec![room_free("A", &[(9.0, 12.0)]), room_free("B", &[(9.0, 12.0)])];
        let config = BookingConfig::default().with_operating_hours(h(9.0), h(12.0));
        let plan = DayFillScheduler::new(config.clone()).plan(date(), &first);
        assert_eq!(summary(&plan), vec![("A".to_string(), iv(9.0, 12.0))]);

        let swapped: Vec<ScheduledRoom> = first.into_iter().rev().collect();
        let plan = DayFillScheduler::new(config).plan(date(), &swapped);
        assert_eq!(summary(&plan), vec![("B".to_string(), iv(9.0, 12.0))]);
    }

    #[test]
    fn test_shrinks_duration_to_fit_free_window() {
        // A is free only 9-10:30, B covers the rest
        let rooms = vec![
            room_free("A", &[(9.0, 10.5)]),
            room_free("B", &[(10.5, 13.5)]),
        ];
        let config = BookingConfig::default().with_operating_hours(h(9.0), h(13.5));
        let plan = DayFillScheduler::new(config).plan(date(), &rooms);
        assert_eq!(
            summary(&plan),
            vec![
                ("A".to_string(), iv(9.0, 10.5)),
                ("B".to_string(), iv(10.5, 13.5)),
            ]
        );
        assert!(plan.covers_until(h(13.5)));
    }

    #[test]
    fn test_longer_block_beats_pool_order() {
        // A fits only 1h; B fits the full 3h, so B wins at the longest length
        let rooms = vec![
            room_free("A", &[(9.0, 10.0)]),
            room_free("B", &[(9.0, 12.0)]),
        ];
        let config = BookingConfig::default().with_operating_hours(h(9.0), h(12.0));
        let plan = DayFillScheduler::new(config).plan(date(), &rooms);
        assert_eq!(summary(&plan), vec![("B".to_string(), iv(9.0, 12.0))]);
    }

    #[test]
    fn test_adjacent_recorded_windows_not_joined() {
        // A's 9-10 and 10-12 are separate windows; a 3h block does not fit
        let rooms = vec![room_free("A", &[(9.0, 10.0), (10.0, 12.0)])];
        let config = BookingConfig::default().with_operating_hours(h(9.0), h(12.0));
        let plan = DayFillScheduler::new(config).plan(date(), &rooms);
        assert_eq!(summary(&plan), vec![("A".to_string(), iv(9.0, 10.0))]);
        assert_eq!(plan.covered_to, h(10.0));
    }

    #[test]
    fn test_partial_coverage_stops_at_gap() {
        let rooms = vec![
            room_free("A", &[(9.0, 12.0)]),
            room_free("B", &[(13.0, 16.0)]),
        ];
        let plan = scheduler().plan(date(), &rooms);
        assert_eq!(summary(&plan), vec![("A".to_string(), iv(9.0, 12.0))]);
        assert_eq!(plan.covered_to, h(12.0));
    }

    #[test]
    fn test_short_operating_day_caps_first_block() {
        let rooms = vec![room_free("A", &[(9.0, 22.0)])];
        let config = BookingConfig::default().with_operating_hours(h(9.0), h(10.0));
        let plan = DayFillScheduler::new(config).plan(date(), &rooms);
        assert_eq!(summary(&plan), vec![("A".to_string(), iv(9.0, 10.0))]);
        assert!(plan.covers_until(h(10.0)));
    }

    #[test]
    fn test_no_overlap_and_distinct_rooms() {
        let rooms = vec![
            room_free("A", &[(9.0, 11.0), (15.0, 22.0)]),
            room_free("B", &[(9.0, 14.0)]),
            room_free("C", &[(11.0, 22.0)]),
            room_free("D", &[(9.0, 22.0)]),
            room_free("E", &[(12.0, 22.0)]),
        ];
        let plan = scheduler().plan(date(), &rooms);

        for pair in plan.assignments.windows(2) {
            assert_eq!(pair[0].interval.to(), pair[1].interval.from());
        }
        let mut ids: Vec<&str> = plan.assignments.iter().map(|a| a.room.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), plan.assignment_count());
        assert!(plan
            .assignments
            .iter()
            .all(|a| a.interval.duration() <= h(3.0)));
    }

    #[test]
    fn test_empty_pool() {
        let plan = scheduler().plan(date(), &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.covered_to, HalfHour::ZERO);
        assert_eq!(plan.date, date());
    }

    #[test]
    fn test_plan_dated_by_caller() {
        let rooms = vec![room_free("A", &[(9.0, 22.0)])];
        let other_day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        assert_eq!(scheduler().plan(other_day, &[]).date, other_day);
        assert_eq!(scheduler().plan(other_day, &rooms).date, other_day);
    }
}
