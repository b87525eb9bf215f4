//! Jobs command - Mail queue management.
//!
//! Provides CLI commands to manage the outbound mail queue:
//! - `work`: Start the email worker
//! - `list`: Show job counts per status
//! - `clear`: Remove failed jobs from the queue
//!
//! ## Usage
//!
//! ```bash
//! clinic-api jobs work
//! clinic-api jobs list
//! clinic-api jobs clear
//! ```

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

use crate::cli::args::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
        JobsAction::List => list_jobs(&config).await,
        JobsAction::Clear => clear_failed_jobs(&config).await,
    }
}

/// Start the email worker on the configured queue.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;
    use apalis_sql::postgres::PostgresStorage;
    use apalis_sql::sqlx::postgres::PgPoolOptions;

    use crate::jobs::{email_job_handler, EmailJob, Mailer};

    tracing::info!("Connecting to database for job worker...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::queue(format!("Failed to connect to database: {}", e)))?;

    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::queue(format!("Failed to setup job storage: {}", e)))?;

    let email_storage: PostgresStorage<EmailJob> =
        PostgresStorage::new_with_config(pool, apalis_sql::Config::new(&config.mail.queue));

    let mailer = Mailer::from_config(&config.mail)?;
    if !config.mail.is_smtp_configured() {
        tracing::warn!("SMTP_HOST not set, emails will be logged instead of sent");
    }

    tracing::info!(queue = %config.mail.queue, "Email worker started. Press Ctrl+C to stop.");

    let worker = WorkerBuilder::new("email-worker")
        .data(mailer)
        .backend(email_storage)
        .build_fn(email_job_handler);

    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::queue(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Email worker stopped.");
    Ok(())
}

/// Connect and report whether the apalis schema exists yet.
async fn connect_queue_db(config: &Config) -> AppResult<Option<DatabaseConnection>> {
    tracing::info!("Connecting to database...");

    let db = Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::queue(format!("Failed to connect to database: {}", e)))?;

    let result = db
        .query_one(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM information_schema.schemata WHERE schema_name = 'apalis') as exists".to_string(),
        ))
        .await?;

    let schema_exists = result
        .and_then(|r| r.try_get::<bool>("", "exists").ok())
        .unwrap_or(false);

    Ok(schema_exists.then_some(db))
}

/// Job counts per status for the configured queue
async fn list_jobs(config: &Config) -> AppResult<()> {
    let Some(db) = connect_queue_db(config).await? else {
        println!("\n=== Mail Queue Status ===");
        println!("Job queue not initialized.");
        println!("Run 'jobs work' or 'serve' first to create the queue tables.");
        println!("=========================\n");
        return Ok(());
    };

    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT status::text as status, COUNT(*)::bigint as count FROM apalis.jobs WHERE job_type = $1 GROUP BY status",
            [config.mail.queue.clone().into()],
        ))
        .await?;

    let mut pending = 0i64;
    let mut running = 0i64;
    let mut failed = 0i64;
    let mut done = 0i64;

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

    println!("\n=== Mail Queue Status ({}) ===", config.mail.queue);
    println!("Pending:  {}", pending);
    println!("Running:  {}", running);
    println!("Failed:   {}", failed);
    println!("Done:     {}", done);
    println!("=========================\n");

    Ok(())
}

/// Clear failed jobs from the configured queue
async fn clear_failed_jobs(config: &Config) -> AppResult<()> {
    let Some(db) = connect_queue_db(config).await? else {
        println!("Job queue not initialized. Nothing to clear.");
        return Ok(());
    };

    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "DELETE FROM apalis.jobs WHERE status = 'Failed' AND job_type = $1",
            [config.mail.queue.clone().into()],
        ))
        .await?;

    println!(
        "Cleared {} failed job(s) from {}.",
        result.rows_affected(),
        config.mail.queue
    );

    Ok(())
}
