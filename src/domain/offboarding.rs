//! Offboarding value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;
use super::appointment::{Appointment, AppointmentKind, CanceledBy};
use super::profile::{ProfileKind, ProfileRef};

/// Identity performing an administrative action.
///
/// Passed explicitly to every audited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
}

impl Actor {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

/// Account that receives a cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&Account> for Recipient {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Cancellation message owed to the counterpart of a removed appointment.
///
/// Carries a snapshot of the appointment, since the row itself is gone by
/// the time the notice is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationNotice {
    pub recipient: Recipient,
    pub appointment_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_kind: AppointmentKind,
    pub reason: String,
    pub canceled_by: CanceledBy,
}

impl CancellationNotice {
    /// Notice for `appointment`, canceled because a profile of `offboarded` kind left.
    pub fn for_offboarding(
        appointment: &Appointment,
        offboarded: ProfileKind,
        recipient: &Account,
    ) -> Self {
        Self {
            recipient: Recipient::from(recipient),
            appointment_id: appointment.id,
            scheduled_at: appointment.scheduled_at,
            appointment_kind: appointment.kind,
            reason: offboarded.offboarding_reason().to_string(),
            canceled_by: offboarded.canceled_by(),
        }
    }
}

/// Outcome of one offboarding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffboardingReport {
    pub profile: ProfileRef,
    /// Whether the linked account had its role lowered
    pub account_demoted: bool,
    pub appointments_deleted: usize,
    pub notifications_queued: usize,
    /// Appointments whose counterpart could not be resolved
    pub notifications_skipped: usize,
    /// Notices that could not be handed to the mail queue after commit
    pub notifications_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AppointmentStatus;

    #[test]
    fn test_notice_snapshot() {
        let specialist = Account::new(
            Uuid::new_v4(),
            "dr.lee@example.com".to_string(),
            "Dr. Lee".to_string(),
        );
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: Some(Uuid::new_v4()),
            specialist_id: Some(Uuid::new_v4()),
            scheduled_at: Utc::now(),
            kind: AppointmentKind::InPerson,
            status: AppointmentStatus::Pending,
            comment: Some("follow-up".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        let notice =
            CancellationNotice::for_offboarding(&appointment, ProfileKind::Patient, &specialist);

        assert_eq!(notice.recipient.email, "dr.lee@example.com");
        assert_eq!(notice.appointment_id, appointment.id);
        assert_eq!(notice.reason, "the patient has been offboarded");
        assert_eq!(notice.canceled_by, CanceledBy::Patient);
    }
}
