//! Offboard command - Runs the offboarding workflow from the shell.
//!
//! ```bash
//! clinic-api offboard patient <PROFILE_ID> --actor <ADMIN_ID> [--include-past]
//! ```

use std::sync::Arc;

use crate::cli::args::OffboardArgs;
use crate::config::Config;
use crate::domain::{Actor, ProfileRef};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::notifications::MailQueueDispatcher;
use crate::services::{ServiceContainer, Services};

/// Execute the offboard command
pub async fn execute(args: OffboardArgs, config: Config) -> AppResult<()> {
    let profile = ProfileRef {
        kind: args.kind.into(),
        id: args.id,
    };

    let db = Database::connect(&config).await?;
    let dispatcher =
        Arc::new(MailQueueDispatcher::connect(&config.database_url, &config.mail.queue).await?);

    let services = Services::from_connection(db.get_connection(), config, dispatcher);
    let report = services
        .offboarding()
        .offboard(profile, Actor::new(args.actor), args.include_past)
        .await?;

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::internal(format!("Failed to render report: {}", e)))?;
    println!("{}", rendered);

    Ok(())
}
