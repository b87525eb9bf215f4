//! Token command - Issues a bearer token for an existing account.
//!
//! Admin tokens are how operators reach the `/admin` routes.

use std::sync::Arc;

use crate::cli::args::TokenArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator, Directory, DirectoryService};

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let directory = Directory::new(Arc::new(Persistence::new(db.get_connection())));

    let account = directory.get_account(args.account_id).await?.account;
    let token = Authenticator::new(config).issue_token(&account)?;

    tracing::info!(account = %account.id, role = %account.role, "Token issued");
    println!("{}", token);

    Ok(())
}
