//! Background work: outbound email and the daily reminder schedule.

mod email_job;
mod mailer;
pub mod scheduler;

pub use email_job::{email_job_handler, EmailJob};
pub use mailer::{connect_email_storage, connect_mailer, DirectMailer, Mailer, QueueMailer};
pub use scheduler::{next_run_after, spawn_reminder_scheduler};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
