//! Appointment domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::ProfileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    InPerson,
    Remote,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::InPerson => "in_person",
            AppointmentKind::Remote => "remote",
        }
    }
}

impl From<&str> for AppointmentKind {
    fn from(s: &str) -> Self {
        match s {
            "remote" => AppointmentKind::Remote,
            _ => AppointmentKind::InPerson,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Canceled => "canceled",
        }
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s {
            "completed" => AppointmentStatus::Completed,
            "canceled" => AppointmentStatus::Canceled,
            _ => AppointmentStatus::Pending,
        }
    }
}

/// Which side caused a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanceledBy {
    Patient,
    Specialist,
}

impl std::fmt::Display for CanceledBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanceledBy::Patient => f.write_str("patient"),
            CanceledBy::Specialist => f.write_str("specialist"),
        }
    }
}

/// Appointment between one patient and one specialist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub specialist_id: Option<Uuid>,
    pub scheduled_at: DateTime<Utc>,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// New pending appointment between a patient and a specialist
    pub fn schedule(
        patient_id: Uuid,
        specialist_id: Uuid,
        scheduled_at: DateTime<Utc>,
        kind: AppointmentKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            patient_id: Some(patient_id),
            specialist_id: Some(specialist_id),
            scheduled_at,
            kind,
            status: AppointmentStatus::Pending,
            comment: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Profile id of the given side, if still linked.
    pub fn party(&self, kind: ProfileKind) -> Option<Uuid> {
        match kind {
            ProfileKind::Patient => self.patient_id,
            ProfileKind::Specialist => self.specialist_id,
        }
    }

    /// Profile id of the side opposite to `kind`.
    pub fn counterpart_of(&self, kind: ProfileKind) -> Option<Uuid> {
        self.party(kind.counterpart())
    }
}
