//! Jobs command - Email queue management and manual reminder runs.
//!
//! ```bash
//! campus-events jobs work                     # drain the email queue
//! campus-events jobs list                     # queue status
//! campus-events jobs clear                    # drop failed jobs
//! campus-events jobs remind --date 2026-10-19 # remind for 2026-10-20
//! ```

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::{Config, JOB_NAME_EMAIL};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::jobs::{connect_email_storage, connect_mailer, email_job_handler};
use crate::services::{ReminderDispatcher, ReminderService};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
        JobsAction::Remind { date } => {
            run_reminders(&config, date.unwrap_or_else(|| Utc::now().date_naive())).await
        }
    }
}

/// Process queued emails until Ctrl+C.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;

    let email_storage = connect_email_storage(config).await?;

    let worker = WorkerBuilder::new(JOB_NAME_EMAIL)
        .backend(email_storage)
        .build_fn(email_job_handler);

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    tokio::select! {
        result = Monitor::new().register(worker).run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}

/// Run one reminder batch for the day after `today` and print the report.
async fn run_reminders(config: &Config, today: chrono::NaiveDate) -> AppResult<()> {
    let db = Database::connect_without_migrations(config).await?;
    let mailer = connect_mailer(config).await?;
    let reminders = ReminderDispatcher::new(Arc::new(Persistence::new(db.get_connection())), mailer);

    let report = reminders.send_reminders(today).await?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::internal(format!("Failed to render report: {}", e)))?;
    println!("{}", json);

    Ok(())
}

/// Whether `jobs work` has created the apalis schema yet.
async fn queue_initialized(db: &DatabaseConnection) -> AppResult<bool> {
    let row = db
        .query_one(Statement::from_string(
            DbBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') AS exists",
        ))
        .await?;

    Ok(row
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false))
}

async fn list_jobs(config: &Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(config).await?;
    let conn = db.connection();

    if !queue_initialized(conn).await? {
        println!("Job queue not initialized. Run 'jobs work' first to create the queue tables.");
        return Ok(());
    }

    let rows = conn
        .query_all(Statement::from_string(
            DbBackend::Postgres,
            "SELECT status::text AS status, COUNT(*)::bigint AS count FROM apalis.jobs GROUP BY status",
        ))
        .await?;

    let (mut pending, mut running, mut failed, mut done) = (0i64, 0i64, 0i64, 0i64);
    for row in rows {
        if let (Ok(status), Ok(count)) = (
            row.try_get::<String>("", "status"),
            row.try_get::<i64>("", "count"),
        ) {
            match status.as_str() {
                "Pending" => pending = count,
                "Running" => running = count,
                "Failed" => failed = count,
                "Done" => done = count,
                _ => {}
            }
        }
    }

    println!("\n=== Job Queue Status ===");
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    println!("========================\n");

    Ok(())
}

async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(config).await?;
    let conn = db.connection();

    if !queue_initialized(conn).await? {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    }

    let result = conn
        .execute(Statement::from_string(
            DbBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed'",
        ))
        .await?;

    println!("Cleared {} failed job(s) from the queue.", result.rows_affected());
    Ok(())
}
