//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::domain::ProfileKind;

/// Clinic API - staff administration for the clinic
#[derive(Parser, Debug)]
#[command(name = "clinic-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage the mail queue
    Jobs(JobsArgs),

    /// Offboard a patient or specialist
    Offboard(OffboardArgs),

    /// Issue an access token for an account
    Token(TokenArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the jobs command
#[derive(Parser, Debug)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub action: JobsAction,
}

/// Mail queue actions
#[derive(Subcommand, Debug)]
pub enum JobsAction {
    /// Start the email worker
    Work,
    /// Show queue status counts
    List,
    /// Clear failed jobs
    Clear,
}

/// Which kind of profile to offboard
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKindArg {
    Patient,
    Specialist,
}

impl From<ProfileKindArg> for ProfileKind {
    fn from(kind: ProfileKindArg) -> Self {
        match kind {
            ProfileKindArg::Patient => ProfileKind::Patient,
            ProfileKindArg::Specialist => ProfileKind::Specialist,
        }
    }
}

/// Arguments for the offboard command
#[derive(Parser, Debug)]
pub struct OffboardArgs {
    /// Profile kind
    #[arg(value_enum)]
    pub kind: ProfileKindArg,

    /// Profile ID
    pub id: Uuid,

    /// Administrator performing the offboarding
    #[arg(long, env = "CLINIC_ACTOR_ID")]
    pub actor: Uuid,

    /// Also remove appointments scheduled in the past
    #[arg(long)]
    pub include_past: bool,
}

/// Arguments for the token command
#[derive(Parser, Debug)]
pub struct TokenArgs {
    /// Account ID
    pub account_id: Uuid,
}
