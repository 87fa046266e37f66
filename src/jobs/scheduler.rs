//! Daily reminder schedule.
//!
//! Runs the reminder batch once a day at a fixed UTC wall-clock time.

use chrono::{DateTime, Days, NaiveTime, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::services::ReminderService;

/// First instant strictly after `now` whose UTC time of day is `at`.
pub fn next_run_after(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        return today;
    }
    now.date_naive()
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.and_time(at).and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Spawn the background loop. Each tick targets the day after the tick's
/// UTC date.
pub fn spawn_reminder_scheduler(
    reminders: Arc<dyn ReminderService>,
    at: NaiveTime,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_run_after(now, at);
            tracing::info!(next_run = %next, "Reminder run scheduled");

            let wait = (next - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            let today = Utc::now().date_naive();
            if let Err(e) = reminders.send_reminders(today).await {
                tracing::error!(error = %e, "Reminder run failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_next_run_later_today() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap();
        assert_eq!(
            next_run_after(now, nine()),
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        assert_eq!(
            next_run_after(now, nine()),
            Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_run_crosses_month_end() {
        let now = Utc.with_ymd_and_hms(2026, 10, 31, 23, 59, 0).unwrap();
        assert_eq!(
            next_run_after(now, nine()),
            Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap()
        );
    }
}
