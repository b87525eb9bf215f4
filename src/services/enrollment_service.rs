//! Enrollment service - Attaches a clinical profile to an account.
//!
//! The profile row and the account role are written in one serializable
//! transaction, so a patient or specialist role never exists without its
//! profile and two concurrent enrollments cannot both pass the duplicate check.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, Profile, ProfileDetails, ProfileRef, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::{RoleStore, TransactionContext, UnitOfWork};

/// Enrollment service trait for dependency injection.
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Enroll an active account as a patient or specialist.
    ///
    /// Fails with `NotFound` for unknown or deleted accounts and with
    /// `Conflict` when the account already has a profile of that kind.
    async fn enroll(
        &self,
        account_id: Uuid,
        details: ProfileDetails,
        actor: Actor,
    ) -> AppResult<Profile>;
}

/// Concrete implementation of EnrollmentService using Unit of Work.
pub struct Registrar<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Registrar<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EnrollmentService for Registrar<U> {
    async fn enroll(
        &self,
        account_id: Uuid,
        details: ProfileDetails,
        actor: Actor,
    ) -> AppResult<Profile> {
        let kind = details.kind();

        let profile = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move { enroll_in_transaction(&ctx, account_id, details).await })
            })
            .await?;

        tracing::info!(
            actor = %actor.id,
            account = %account_id,
            profile = %profile.reference(),
            "Account enrolled as {}",
            kind
        );

        Ok(profile)
    }
}

async fn enroll_in_transaction(
    ctx: &TransactionContext<'_>,
    account_id: Uuid,
    details: ProfileDetails,
) -> AppResult<Profile> {
    let kind = details.kind();
    let accounts = ctx.accounts();

    let account = accounts
        .find_active(account_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if ctx.profiles().find_for_account(account_id, kind).await?.is_some() {
        return Err(AppError::conflict(format!("{} profile", capitalize(kind.as_str()))));
    }

    // One role per account: an admin or the other clinical role cannot be overwritten.
    if account.role != Role::Basic {
        return Err(AppError::validation(format!(
            "Account already holds the {} role",
            account.role
        )));
    }

    if let ProfileDetails::Patient {
        specialist_id: Some(specialist_id),
    } = &details
    {
        let assigned = ctx
            .profiles()
            .find(ProfileRef::specialist(*specialist_id))
            .await?;
        if assigned.is_none() {
            return Err(AppError::validation("Assigned specialist does not exist"));
        }
    }

    let profile = ctx
        .profiles()
        .create(account_id, details, Utc::now().date_naive())
        .await?;

    accounts.set_role(account_id, kind.role()).await?;

    Ok(profile)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
