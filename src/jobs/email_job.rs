//! Email background job.
//!
//! Emails are queued by producers and delivered by the `jobs work`
//! worker. Without `SMTP_HOST`, emails are logged instead of sent.

use apalis::prelude::Data;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

use crate::config::MailConfig;
use crate::errors::{AppError, AppResult};

/// Email job payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Plain text body
    pub body: String,
}

impl EmailJob {
    /// Create a new email job
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// SMTP delivery shared by the email worker.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    default_from: String,
}

impl Mailer {
    /// Build from mail settings. No relay configured means log-only delivery.
    pub fn from_config(config: &MailConfig) -> AppResult<Self> {
        let transport = match &config.smtp_host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| AppError::mail(format!("Invalid SMTP relay {}: {}", host, e)))?
                    .port(config.smtp_port);

                if let (Some(user), Some(pass)) = (&config.smtp_user, config.smtp_password()) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.to_string()));
                }

                Some(builder.build())
            }
            None => None,
        };

        Ok(Self {
            transport,
            default_from: config.smtp_from.clone(),
        })
    }

    /// Mailer that only logs
    pub fn log_only(default_from: impl Into<String>) -> Self {
        Self {
            transport: None,
            default_from: default_from.into(),
        }
    }

    /// Build the RFC 5322 message for a job
    pub fn build_message(&self, job: &EmailJob) -> AppResult<Message> {
        let from: Mailbox = self.default_from.parse().map_err(|_| {
            AppError::mail(format!("Invalid sender address: {}", self.default_from))
        })?;
        let to: Mailbox = job
            .to
            .parse()
            .map_err(|_| AppError::mail(format!("Invalid recipient address: {}", job.to)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(job.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(job.body.clone())
            .map_err(|e| AppError::mail(e.to_string()))
    }

    /// Deliver one email
    pub async fn send(&self, job: &EmailJob) -> AppResult<()> {
        let from = &self.default_from;

        tracing::info!(
            to = %job.to,
            from = %from,
            subject = %job.subject,
            "Processing email job"
        );

        let Some(transport) = &self.transport else {
            tracing::warn!("SMTP not configured - logging email instead of sending");
            tracing::info!(
                "=== EMAIL (not sent) ===\n\
                 From: {}\n\
                 To: {}\n\
                 Subject: {}\n\
                 Body:\n{}\n\
                 ========================",
                from,
                job.to,
                job.subject,
                job.body
            );
            return Ok(());
        };

        let message = self.build_message(job)?;
        transport
            .send(message)
            .await
            .map_err(|e| AppError::mail(e.to_string()))?;

        tracing::info!(to = %job.to, "Email sent successfully");
        Ok(())
    }
}

/// Email job handler - processes email sending jobs.
///
/// Errors are logged here and handed back to the queue, which owns retries.
pub async fn email_job_handler(job: EmailJob, mailer: Data<Mailer>) -> Result<(), AppError> {
    if let Err(e) = mailer.send(&job).await {
        tracing::error!(to = %job.to, subject = %job.subject, error = %e, "Email delivery failed");
        return Err(e);
    }
    Ok(())
}
