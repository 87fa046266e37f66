//! Next-day reminder batch.
//!
//! One run emails every registrant of every event dated the day after
//! `today`, once each. A failed delivery is counted and logged; it never
//! stops the rest of the batch.

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

use crate::config::REMINDER_SEND_CONCURRENCY;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::jobs::{EmailJob, Mailer};
use crate::utils::templates;

/// Outcome of one reminder run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderReport {
    pub target_date: NaiveDate,
    /// Events found on the target date
    pub events: usize,
    pub sent: usize,
    pub failed: usize,
}

#[async_trait]
pub trait ReminderService: Send + Sync {
    /// Remind registrants of events dated `today + 1`.
    async fn send_reminders(&self, today: NaiveDate) -> AppResult<ReminderReport>;
}

pub struct ReminderDispatcher<U: UnitOfWork> {
    uow: Arc<U>,
    mailer: Arc<dyn Mailer>,
}

impl<U: UnitOfWork> ReminderDispatcher<U> {
    pub fn new(uow: Arc<U>, mailer: Arc<dyn Mailer>) -> Self {
        Self { uow, mailer }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReminderService for ReminderDispatcher<U> {
    async fn send_reminders(&self, today: NaiveDate) -> AppResult<ReminderReport> {
        let target_date = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::validation("date out of range"))?;

        let events = self.uow.events().list_on_date(target_date).await?;
        let mut report = ReminderReport {
            target_date,
            events: events.len(),
            sent: 0,
            failed: 0,
        };

        let mut outbox = Vec::new();
        for event in &events {
            match self.uow.registrations().registrants_for_event(event.id).await {
                Ok(registrants) => {
                    outbox.extend(registrants.into_iter().map(|registrant| {
                        let email = templates::event_reminder(&registrant.name, event);
                        (event.id, EmailJob::rendered(registrant.email, email))
                    }));
                }
                Err(e) => {
                    tracing::error!(event_id = %event.id, error = %e, "Could not load registrants");
                }
            }
        }

        let mailer = &self.mailer;
        let mut deliveries = stream::iter(outbox)
            .map(|(event_id, job)| async move {
                let to = job.to.clone();
                (event_id, to, mailer.send(job).await)
            })
            .buffer_unordered(REMINDER_SEND_CONCURRENCY);

        while let Some((event_id, to, outcome)) = deliveries.next().await {
            match outcome {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(event_id = %event_id, to = %to, error = %e, "Reminder not delivered");
                }
            }
        }

        tracing::info!(
            target_date = %report.target_date,
            events = report.events,
            sent = report.sent,
            failed = report.failed,
            "Reminder run finished"
        );
        Ok(report)
    }
}
