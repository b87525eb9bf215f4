//! Shared fixtures: an in-memory SQLite clinic and a recording dispatcher.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use clinic_api::domain::{
    Account, Actor, Appointment, AppointmentKind, CancellationNotice, Profile, ProfileDetails,
    ProfileRef, Role,
};
use clinic_api::errors::{AppError, AppResult};
use clinic_api::infra::{Database, Persistence, RoleStore, UnitOfWork};
use clinic_api::notifications::NotificationDispatcher;
use clinic_api::services::{EnrollmentService, Registrar};

/// Migrated in-memory database with seeding helpers
pub struct Clinic {
    pub db: Database,
    pub uow: Arc<Persistence>,
}

pub async fn clinic() -> Clinic {
    let db = Database::connect_url("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    let uow = Arc::new(Persistence::new(db.get_connection()));
    Clinic { db, uow }
}

pub fn system_actor() -> Actor {
    Actor::new(Uuid::new_v4())
}

impl Clinic {
    pub async fn account(&self, email: &str, name: &str) -> Account {
        let (email, name) = (email.to_string(), name.to_string());
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.accounts().create(email, name).await })
            })
            .await
            .expect("create account")
    }

    pub async fn admin(&self) -> Account {
        let account = self.account("admin@clinic.test", "Admin").await;
        let id = account.id;
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.accounts().set_role(id, Role::Admin).await })
            })
            .await
            .expect("promote admin");
        self.fetch_account(id).await
    }

    pub async fn patient(&self, email: &str, name: &str) -> (Account, Profile) {
        self.enroll(email, name, ProfileDetails::Patient { specialist_id: None })
            .await
    }

    pub async fn specialist(&self, email: &str, name: &str) -> (Account, Profile) {
        self.enroll(
            email,
            name,
            ProfileDetails::Specialist {
                specialty: Some("General medicine".to_string()),
            },
        )
        .await
    }

    async fn enroll(&self, email: &str, name: &str, details: ProfileDetails) -> (Account, Profile) {
        let account = self.account(email, name).await;
        let profile = Registrar::new(self.uow.clone())
            .enroll(account.id, details, system_actor())
            .await
            .expect("enroll");
        (self.fetch_account(account.id).await, profile)
    }

    /// Appointment `offset` away from now
    pub async fn appointment(
        &self,
        patient: &Profile,
        specialist: &Profile,
        offset: Duration,
    ) -> Appointment {
        let appointment = Appointment::schedule(
            patient.id,
            specialist.id,
            Utc::now() + offset,
            AppointmentKind::InPerson,
        );
        self.insert_appointment(appointment).await
    }

    pub async fn insert_appointment(&self, appointment: Appointment) -> Appointment {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move { ctx.appointments().create(&appointment).await })
            })
            .await
            .expect("create appointment")
    }

    pub async fn delete_account(&self, id: Uuid) {
        self.uow
            .transaction(move |ctx| Box::pin(async move { ctx.accounts().delete(id).await }))
            .await
            .expect("soft delete account");
    }

    pub async fn fetch_account(&self, id: Uuid) -> Account {
        self.uow
            .accounts()
            .find_by_id_with_deleted(id)
            .await
            .expect("query account")
            .expect("account exists")
    }

    pub async fn role_of(&self, id: Uuid) -> Role {
        self.fetch_account(id).await.role
    }

    pub async fn find_appointment(&self, id: Uuid) -> Option<Appointment> {
        self.uow
            .appointments()
            .find_by_id_with_deleted(id)
            .await
            .expect("query appointment")
    }

    pub async fn profile_exists(&self, profile: ProfileRef) -> bool {
        self.uow
            .profiles()
            .find(profile)
            .await
            .expect("query profile")
            .is_some()
    }
}

/// Dispatcher that keeps every notice it is handed
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<CancellationNotice>>,
    unreachable: Mutex<Vec<Uuid>>,
}

impl RecordingDispatcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make sends to this account fail
    pub fn refuse(&self, account_id: Uuid) {
        self.unreachable.lock().unwrap().push(account_id);
    }

    pub fn sent(&self) -> Vec<CancellationNotice> {
        self.sent.lock().unwrap().clone()
    }

    pub fn recipients(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.sent().iter().map(|n| n.recipient.account_id).collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn send(&self, notice: CancellationNotice) -> AppResult<()> {
        if self
            .unreachable
            .lock()
            .unwrap()
            .contains(&notice.recipient.account_id)
        {
            return Err(AppError::queue("mail queue unavailable"));
        }
        self.sent.lock().unwrap().push(notice);
        Ok(())
    }
}

pub fn sorted(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort();
    ids
}
