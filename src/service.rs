//! Booking orchestration over external collaborators.
//!
//! The remote booking service is reached through two traits:
//! - [`AvailabilityQuery`]: which rooms are free for one slot
//! - [`BookingSubmitter`]: reserve one room for one block
//!
//! [`BookingService`] validates requests up front, fans slot queries and
//! submissions out concurrently, and keeps the greedy planning step in
//! between strictly sequential.
//!
//! # Failure handling
//! - Invalid input fails the call before any collaborator is contacted.
//! - A failed slot query counts as "no rooms free" for that slot.
//! - A failed submission is reported next to the successful ones.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::BookingConfig;
use crate::error::Result;
use crate::models::{
    DayPlan, Room, ScheduledRoom, SubmissionOutcome, SubmissionReport, TimeInterval,
};
use crate::scheduler::{DayFillScheduler, ScheduleBuilder};
use crate::validation::{validate_attendees, validate_day_rooms, validate_request};

/// Room availability lookup for a single slot.
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    /// Rooms seating `attendees` that are free for `slot` on `date`.
    async fn query_free(
        &self,
        attendees: u32,
        date: NaiveDate,
        slot: TimeInterval,
    ) -> anyhow::Result<Vec<Room>>;
}

/// Reservation of one room for one block.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    /// Books `room_id` for every half-hour slot starting at `timestamps`.
    async fn submit(
        &self,
        room_id: &str,
        attendees: u32,
        timestamps: &[NaiveDateTime],
    ) -> anyhow::Result<()>;
}

/// Builds room schedules, plans the day and submits the bookings.
pub struct BookingService<Q, S> {
    scheduler: DayFillScheduler,
    query: Q,
    submitter: S,
    reference_date: Option<NaiveDate>,
}

impl<Q: AvailabilityQuery, S: BookingSubmitter> BookingService<Q, S> {
    /// Creates a service, rejecting inconsistent configuration.
    pub fn new(config: BookingConfig, query: Q, submitter: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scheduler: DayFillScheduler::new(config),
            query,
            submitter,
            reference_date: None,
        })
    }

    /// Pins "today" for booking-window checks (defaults to the local date).
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &BookingConfig {
        self.scheduler.config()
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Queries every slot of the operating day and builds room schedules.
    ///
    /// All slot queries run concurrently and are awaited to completion;
    /// failed ones are logged and treated as having no free rooms.
    pub async fn build_schedules(
        &self,
        attendees: u32,
        date: NaiveDate,
    ) -> Result<Vec<ScheduledRoom>> {
        validate_request(attendees, date, self.today(), self.config())?;

        let slots = self.config().slots();
        let queries = slots.iter().map(|&slot| async move {
            let result = self.query.query_free(attendees, date, slot).await;
            (slot, result)
        });
        let results = join_all(queries).await;

        let mut builder = ScheduleBuilder::new(date);
        let mut failed_slots = 0usize;
        for (slot, result) in results {
            match result {
                Ok(rooms) => {
                    debug!(slot = %slot, free = rooms.len(), "slot queried");
                    builder.record(slot.from(), rooms);
                }
                Err(err) => {
                    failed_slots += 1;
                    warn!(slot = %slot, error = %err, "slot query failed, treating as no rooms free");
                }
            }
        }

        let rooms = builder.build()?;
        info!(
            %date,
            slots = slots.len(),
            failed_slots,
            rooms = rooms.len(),
            "built room schedules"
        );
        Ok(rooms)
    }

    /// Plans `date` over `rooms` without submitting anything.
    ///
    /// Every room must be scheduled for `date` and listed once. Rooms too
    /// small for `attendees` are left out of the pool.
    pub fn plan_day(
        &self,
        date: NaiveDate,
        mut rooms: Vec<ScheduledRoom>,
        attendees: u32,
    ) -> Result<DayPlan> {
        validate_attendees(attendees, self.config())?;
        validate_day_rooms(date, &rooms)?;

        let before = rooms.len();
        rooms.retain(|r| r.room.fits(attendees));
        if rooms.len() < before {
            debug!(
                dropped = before - rooms.len(),
                attendees, "left out rooms below capacity"
            );
        }

        Ok(self.scheduler.plan(date, &rooms))
    }

    /// Plans `date` over `rooms` and submits every assignment.
    ///
    /// Returns one report per assignment, in scheduling order.
    pub async fn fill_day(
        &self,
        date: NaiveDate,
        rooms: Vec<ScheduledRoom>,
        attendees: u32,
    ) -> Result<Vec<SubmissionReport>> {
        let plan = self.plan_day(date, rooms, attendees)?;
        Ok(self.submit_plan(&plan, attendees).await)
    }

    /// Builds schedules for `date` and fills the day from them.
    pub async fn book_day(
        &self,
        attendees: u32,
        date: NaiveDate,
    ) -> Result<Vec<SubmissionReport>> {
        let rooms = self.build_schedules(attendees, date).await?;
        self.fill_day(date, rooms, attendees).await
    }

    /// Submits all assignments of `plan` concurrently.
    ///
    /// Every submission is awaited; one failure does not cancel the others.
    pub async fn submit_plan(&self, plan: &DayPlan, attendees: u32) -> Vec<SubmissionReport> {
        let submissions = plan.assignments.iter().map(|assignment| async move {
            let timestamps = assignment.timestamps(plan.date);
            let outcome = match self
                .submitter
                .submit(&assignment.room.id, attendees, &timestamps)
                .await
            {
                Ok(()) => SubmissionOutcome::Submitted,
                Err(err) => {
                    warn!(
                        room = %assignment.room.id,
                        block = %assignment.interval,
                        error = %err,
                        "booking submission failed"
                    );
                    SubmissionOutcome::Failed {
                        reason: format!("{err:#}"),
                    }
                }
            };
            SubmissionReport {
                assignment: assignment.clone(),
                outcome,
            }
        });

        let reports = join_all(submissions).await;
        let submitted = reports.iter().filter(|r| r.outcome.is_success()).count();
        info!(
            date = %plan.date,
            submitted,
            failed = reports.len() - submitted,
            "submitted day plan"
        );
        reports
    }
}
