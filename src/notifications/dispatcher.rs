//! Notification dispatch.
//!
//! Dispatchers only enqueue; delivery and its retry policy belong to the
//! email worker.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use apalis_sql::sqlx::postgres::{PgPool, PgPoolOptions};
use async_trait::async_trait;

use super::cancellation::CancellationEmail;
use crate::domain::CancellationNotice;
use crate::errors::{AppError, AppResult};
use crate::jobs::EmailJob;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sends cancellation notices to their recipients.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Enqueue one notice for asynchronous delivery
    async fn send(&self, notice: CancellationNotice) -> AppResult<()>;
}

/// Dispatcher backed by the durable apalis mail queue in PostgreSQL.
#[derive(Clone)]
pub struct MailQueueDispatcher {
    storage: PostgresStorage<EmailJob>,
    queue: String,
}

impl MailQueueDispatcher {
    /// Wrap an existing pool; jobs land in the `queue` namespace.
    pub fn new(pool: PgPool, queue: &str) -> Self {
        let storage = PostgresStorage::new_with_config(pool, apalis_sql::Config::new(queue));
        Self {
            storage,
            queue: queue.to_string(),
        }
    }

    /// Connect, make sure the queue tables exist, and build the dispatcher.
    pub async fn connect(database_url: &str, queue: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| AppError::queue(format!("Failed to connect to mail queue: {}", e)))?;

        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| AppError::queue(format!("Failed to setup job storage: {}", e)))?;

        Ok(Self::new(pool, queue))
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }
}

#[async_trait]
impl NotificationDispatcher for MailQueueDispatcher {
    async fn send(&self, notice: CancellationNotice) -> AppResult<()> {
        let job = CancellationEmail::render(&notice).into_job();

        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::queue(e.to_string()))?;

        tracing::info!(
            queue = %self.queue,
            recipient = %notice.recipient.account_id,
            appointment = %notice.appointment_id,
            canceled_by = %notice.canceled_by,
            "Cancellation email queued"
        );
        Ok(())
    }
}
