//! Offboarding service - Retires a patient or specialist profile.
//!
//! One transaction demotes the linked account, removes the profile's
//! appointments and the profile itself. Counterparts of the removed
//! appointments are notified only once that transaction has committed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Account, Actor, Appointment, CancellationNotice, OffboardingReport, ProfileKind, ProfileRef,
    Role,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{RoleStore, RoleUpdate, TransactionContext, UnitOfWork};
use crate::notifications::NotificationDispatcher;

/// Offboarding service trait for dependency injection.
#[async_trait]
pub trait OffboardingService: Send + Sync {
    /// Offboard a profile.
    ///
    /// Only appointments scheduled from now on are removed unless
    /// `include_past_appointments` is set. Fails with `NotFound` when the
    /// profile does not exist (including when it was already offboarded).
    async fn offboard(
        &self,
        profile: ProfileRef,
        actor: Actor,
        include_past_appointments: bool,
    ) -> AppResult<OffboardingReport>;
}

/// Concrete implementation of OffboardingService using Unit of Work.
pub struct Offboarder<U: UnitOfWork> {
    uow: Arc<U>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<U: UnitOfWork> Offboarder<U> {
    pub fn new(uow: Arc<U>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { uow, dispatcher }
    }
}

/// Committed changes plus the notices still owed.
struct StagedOffboarding {
    account_demoted: bool,
    appointments_deleted: usize,
    notices: Vec<CancellationNotice>,
    skipped: usize,
}

#[async_trait]
impl<U: UnitOfWork> OffboardingService for Offboarder<U> {
    async fn offboard(
        &self,
        profile: ProfileRef,
        actor: Actor,
        include_past_appointments: bool,
    ) -> AppResult<OffboardingReport> {
        let since = (!include_past_appointments).then(Utc::now);

        tracing::info!(
            actor = %actor.id,
            profile = %profile,
            include_past_appointments,
            "Offboarding started"
        );

        let staged = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move { offboard_in_transaction(&ctx, profile, since).await })
            })
            .await
            .inspect_err(|e| {
                tracing::warn!(actor = %actor.id, profile = %profile, error = %e, "Offboarding aborted");
            })?;

        let mut queued = 0;
        let mut failed = 0;
        for notice in staged.notices {
            let recipient = notice.recipient.account_id;
            let appointment = notice.appointment_id;
            match self.dispatcher.send(notice).await {
                Ok(()) => queued += 1,
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        profile = %profile,
                        recipient = %recipient,
                        appointment = %appointment,
                        error = %e,
                        "Failed to queue cancellation notice"
                    );
                }
            }
        }

        let report = OffboardingReport {
            profile,
            account_demoted: staged.account_demoted,
            appointments_deleted: staged.appointments_deleted,
            notifications_queued: queued,
            notifications_skipped: staged.skipped,
            notifications_failed: failed,
        };

        tracing::info!(
            actor = %actor.id,
            profile = %profile,
            account_demoted = report.account_demoted,
            appointments_deleted = report.appointments_deleted,
            notifications_queued = report.notifications_queued,
            notifications_skipped = report.notifications_skipped,
            notifications_failed = report.notifications_failed,
            "Profile offboarded"
        );

        Ok(report)
    }
}

async fn offboard_in_transaction(
    ctx: &TransactionContext<'_>,
    profile: ProfileRef,
    since: Option<DateTime<Utc>>,
) -> AppResult<StagedOffboarding> {
    let record = ctx.profiles().lock(profile).await?.ok_or(AppError::NotFound)?;

    let accounts = ctx.accounts();
    let account_demoted = demote(&accounts, record.account_id).await?;

    let appointments = ctx.appointments().for_profile(profile, since).await?;

    let mut notices = Vec::with_capacity(appointments.len());
    let mut skipped = 0;
    for appointment in &appointments {
        match resolve_counterpart(ctx, appointment, profile.kind).await? {
            Some(recipient) => notices.push(CancellationNotice::for_offboarding(
                appointment,
                profile.kind,
                &recipient,
            )),
            None => {
                skipped += 1;
                tracing::debug!(
                    appointment = %appointment.id,
                    "Counterpart account unresolved, no cancellation notice"
                );
            }
        }
    }

    let ids: Vec<Uuid> = appointments.iter().map(|a| a.id).collect();
    let deleted = ctx.appointments().hard_delete_many(&ids).await?;

    ctx.profiles().hard_delete(profile).await?;

    Ok(StagedOffboarding {
        account_demoted,
        appointments_deleted: deleted as usize,
        notices,
        skipped,
    })
}

/// Lower the linked account to the basic role. A missing account is skipped.
async fn demote<S: RoleStore + ?Sized>(store: &S, account_id: Option<Uuid>) -> AppResult<bool> {
    let Some(account_id) = account_id else {
        tracing::debug!("Profile has no linked account, skipping role demotion");
        return Ok(false);
    };

    match store.set_role(account_id, Role::Basic).await? {
        RoleUpdate::Changed => Ok(true),
        RoleUpdate::Unchanged => Ok(false),
        RoleUpdate::Unresolved => {
            tracing::debug!(account = %account_id, "Linked account unresolved, skipping role demotion");
            Ok(false)
        }
    }
}

/// Active account of the other party on `appointment`, if every link resolves.
async fn resolve_counterpart(
    ctx: &TransactionContext<'_>,
    appointment: &Appointment,
    offboarded: ProfileKind,
) -> AppResult<Option<Account>> {
    let Some(counterpart_id) = appointment.counterpart_of(offboarded) else {
        return Ok(None);
    };

    let counterpart = ProfileRef {
        kind: offboarded.counterpart(),
        id: counterpart_id,
    };
    let Some(profile) = ctx.profiles().find(counterpart).await? else {
        return Ok(None);
    };
    let Some(account_id) = profile.account_id else {
        return Ok(None);
    };

    ctx.accounts().find_active(account_id).await
}
