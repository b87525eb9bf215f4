//! Clinical profiles: the patient or specialist record attached to an account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;
use super::appointment::CanceledBy;
use crate::config::{REASON_PATIENT_OFFBOARDED, REASON_SPECIALIST_OFFBOARDED};

/// Which side of the clinic a profile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Patient,
    Specialist,
}

impl ProfileKind {
    /// The other party on an appointment.
    pub fn counterpart(&self) -> ProfileKind {
        match self {
            ProfileKind::Patient => ProfileKind::Specialist,
            ProfileKind::Specialist => ProfileKind::Patient,
        }
    }

    /// Role held by the account while a live profile of this kind exists.
    pub fn role(&self) -> Role {
        match self {
            ProfileKind::Patient => Role::Patient,
            ProfileKind::Specialist => Role::Specialist,
        }
    }

    /// Reason given to the counterpart when a profile of this kind is offboarded.
    pub fn offboarding_reason(&self) -> &'static str {
        match self {
            ProfileKind::Patient => REASON_PATIENT_OFFBOARDED,
            ProfileKind::Specialist => REASON_SPECIALIST_OFFBOARDED,
        }
    }

    /// Tag recorded on cancellations triggered from this side.
    pub fn canceled_by(&self) -> CanceledBy {
        match self {
            ProfileKind::Patient => CanceledBy::Patient,
            ProfileKind::Specialist => CanceledBy::Specialist,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Patient => "patient",
            ProfileKind::Specialist => "specialist",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed reference to a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileRef {
    pub kind: ProfileKind,
    pub id: Uuid,
}

impl ProfileRef {
    pub fn patient(id: Uuid) -> Self {
        Self {
            kind: ProfileKind::Patient,
            id,
        }
    }

    pub fn specialist(id: Uuid) -> Self {
        Self {
            kind: ProfileKind::Specialist,
            id,
        }
    }
}

impl std::fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Active,
    Inactive,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
        }
    }
}

impl From<&str> for ProfileStatus {
    fn from(s: &str) -> Self {
        match s {
            "inactive" => ProfileStatus::Inactive,
            _ => ProfileStatus::Active,
        }
    }
}

/// Kind-specific profile fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileDetails {
    Patient {
        /// Assigned specialist
        specialist_id: Option<Uuid>,
    },
    Specialist {
        specialty: Option<String>,
    },
}

impl ProfileDetails {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileDetails::Patient { .. } => ProfileKind::Patient,
            ProfileDetails::Specialist { .. } => ProfileKind::Specialist,
        }
    }
}

/// Patient or specialist profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Linked login account; `None` once the account row is gone
    pub account_id: Option<Uuid>,
    pub admitted_on: NaiveDate,
    pub discharged_on: Option<NaiveDate>,
    pub status: ProfileStatus,
    pub details: ProfileDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn kind(&self) -> ProfileKind {
        self.details.kind()
    }

    pub fn reference(&self) -> ProfileRef {
        ProfileRef {
            kind: self.kind(),
            id: self.id,
        }
    }
}
