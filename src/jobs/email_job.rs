//! Email background job.
//!
//! The payload is shared by direct delivery and the apalis queue. Without
//! SMTP settings the handler logs the message; with a relay configured it
//! fails the job, because no SMTP transport is built in.

use serde::{Deserialize, Serialize};
use std::env;

use crate::config::DEFAULT_MAIL_FROM;
use crate::errors::AppError;
use crate::utils::templates::RenderedEmail;

/// Email job payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    pub fn rendered(to: impl Into<String>, email: RenderedEmail) -> Self {
        Self::new(to, email.subject, email.body)
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// SMTP settings read at delivery time.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_port: u16,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string()),
        }
    }
}

/// Deliver one email using the SMTP settings from the environment.
///
/// # Errors
/// `Dependency` when the recipient address is unusable, or when an SMTP
/// relay is configured, since no SMTP transport is compiled in.
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    deliver(job, &EmailConfig::from_env())
}

fn deliver(job: EmailJob, config: &EmailConfig) -> Result<(), AppError> {
    let from = job.from.as_deref().unwrap_or(&config.smtp_from);

    if !is_deliverable(&job.to) {
        tracing::warn!(to = %job.to, subject = %job.subject, "Rejected undeliverable recipient");
        return Err(AppError::dependency(format!(
            "undeliverable recipient '{}'",
            job.to
        )));
    }

    if let Some(host) = &config.smtp_host {
        tracing::error!(
            to = %job.to,
            subject = %job.subject,
            relay = %format!("{}:{}", host, config.smtp_port),
            "SMTP relay configured but this build has no SMTP transport; email not sent"
        );
        return Err(AppError::dependency(format!(
            "no SMTP transport available for relay {}",
            host
        )));
    }

    tracing::info!(
        "=== EMAIL (SMTP not configured) ===\n\
         From: {}\n\
         To: {}\n\
         Subject: {}\n\
         Body:\n{}\n\
         ===================================",
        from,
        job.to,
        job.subject,
        job.body
    );
    Ok(())
}

fn is_deliverable(address: &str) -> bool {
    match address.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_only() -> EmailConfig {
        EmailConfig {
            smtp_host: None,
            smtp_port: 587,
            smtp_from: DEFAULT_MAIL_FROM.to_string(),
        }
    }

    #[test]
    fn test_deliverable_addresses() {
        assert!(is_deliverable("bob@campus.edu"));
        assert!(!is_deliverable("bob"));
        assert!(!is_deliverable("@campus.edu"));
        assert!(!is_deliverable("bob@localhost"));
    }

    #[test]
    fn test_rejects_bad_recipient() {
        let result = deliver(EmailJob::new("nobody", "Hi", "Body"), &log_only());
        assert!(matches!(result, Err(AppError::Dependency(_))));
    }

    #[test]
    fn test_logs_without_smtp() {
        let job = EmailJob::new("bob@campus.edu", "Hi", "Body").with_from("club@campus.edu");
        assert!(deliver(job, &log_only()).is_ok());
    }

    #[test]
    fn test_configured_relay_is_not_reported_as_sent() {
        let config = EmailConfig {
            smtp_host: Some("smtp.invalid.example".to_string()),
            ..log_only()
        };

        let result = deliver(EmailJob::new("bob@campus.edu", "Hi", "Body"), &config);

        assert!(matches!(result, Err(AppError::Dependency(_))));
    }
}
