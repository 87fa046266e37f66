//! Outbound mail seam.
//!
//! Services hand finished `EmailJob`s to a `Mailer`; whether they are
//! delivered inline or through the PostgreSQL queue is a deployment choice.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::PgPoolOptions;
use async_trait::async_trait;
use std::sync::Arc;

use super::email_job::{email_job_handler, EmailJob};
use crate::config::{Config, MailDelivery};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, job: EmailJob) -> AppResult<()>;
}

/// Runs the email handler in the calling task.
#[derive(Debug, Clone, Default)]
pub struct DirectMailer;

#[async_trait]
impl Mailer for DirectMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        email_job_handler(job).await
    }
}

/// Enqueues onto the apalis PostgreSQL queue drained by `jobs work`.
#[derive(Clone)]
pub struct QueueMailer {
    storage: PostgresStorage<EmailJob>,
}

impl QueueMailer {
    pub fn new(storage: PostgresStorage<EmailJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Mailer for QueueMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        let to = job.to.clone();
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::dependency(format!("Failed to enqueue email: {}", e)))?;

        tracing::debug!(to = %to, "Email enqueued");
        Ok(())
    }
}

/// Build the mailer selected by `MAIL_DELIVERY`.
pub async fn connect_mailer(config: &Config) -> AppResult<Arc<dyn Mailer>> {
    match config.mail_delivery {
        MailDelivery::Direct => Ok(Arc::new(DirectMailer)),
        MailDelivery::Queue => Ok(Arc::new(QueueMailer::new(
            connect_email_storage(config).await?,
        ))),
    }
}

/// Open the apalis email queue, creating its tables if needed.
pub async fn connect_email_storage(config: &Config) -> AppResult<PostgresStorage<EmailJob>> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::dependency(format!("Failed to connect job queue: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::dependency(format!("Failed to set up job storage: {}", e)))?;

    Ok(PostgresStorage::new(pool))
}
