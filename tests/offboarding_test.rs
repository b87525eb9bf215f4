//! Offboarding workflow against an in-memory SQLite clinic.

mod common;

use chrono::{Duration, Utc};
use sea_orm::ConnectionTrait;

use clinic_api::domain::{
    Appointment, AppointmentKind, CanceledBy, ProfileKind, ProfileRef, Role,
};
use clinic_api::errors::AppError;
use clinic_api::services::{Offboarder, OffboardingService};
use common::{clinic, sorted, system_actor, RecordingDispatcher};

#[tokio::test]
async fn test_patient_offboarding_cancels_upcoming_appointments() {
    let clinic = clinic().await;
    let (patient_account, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    let (a_account, a) = clinic.specialist("ada@clinic.test", "Ada").await;
    let (b_account, b) = clinic.specialist("ben@clinic.test", "Ben").await;

    let with_a = clinic.appointment(&patient, &a, Duration::days(2)).await;
    let with_b = clinic.appointment(&patient, &b, Duration::days(3)).await;
    let past = clinic.appointment(&patient, &a, -Duration::days(2)).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::patient(patient.id), system_actor(), false)
        .await
        .unwrap();

    assert!(report.account_demoted);
    assert_eq!(report.appointments_deleted, 2);
    assert_eq!(report.notifications_queued, 2);
    assert_eq!(report.notifications_skipped, 0);
    assert_eq!(report.notifications_failed, 0);

    assert_eq!(clinic.role_of(patient_account.id).await, Role::Basic);
    assert!(!clinic.profile_exists(ProfileRef::patient(patient.id)).await);
    assert!(clinic.find_appointment(with_a.id).await.is_none());
    assert!(clinic.find_appointment(with_b.id).await.is_none());

    // The past appointment survives, detached from the removed patient
    let past = clinic.find_appointment(past.id).await.unwrap();
    assert_eq!(past.patient_id, None);
    assert_eq!(past.specialist_id, Some(a.id));

    assert_eq!(
        dispatcher.recipients(),
        sorted(vec![a_account.id, b_account.id])
    );
    for notice in dispatcher.sent() {
        assert_eq!(notice.reason, "the patient has been offboarded");
        assert_eq!(notice.canceled_by, CanceledBy::Patient);
        assert_eq!(notice.appointment_kind, AppointmentKind::InPerson);
    }

    // Counterparts keep their roles and profiles
    assert_eq!(clinic.role_of(a_account.id).await, Role::Specialist);
    assert!(clinic.profile_exists(ProfileRef::specialist(b.id)).await);
}

#[tokio::test]
async fn test_specialist_offboarding_skips_deleted_patient_accounts() {
    let clinic = clinic().await;
    let (specialist_account, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;
    let (p1_account, p1) = clinic.patient("p1@clinic.test", "Pat One").await;
    let (p2_account, p2) = clinic.patient("p2@clinic.test", "Pat Two").await;
    let (p3_account, p3) = clinic.patient("p3@clinic.test", "Pat Three").await;

    for patient in [&p1, &p2, &p3] {
        clinic.appointment(patient, &specialist, Duration::days(1)).await;
    }
    clinic.delete_account(p3_account.id).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::specialist(specialist.id), system_actor(), false)
        .await
        .unwrap();

    assert_eq!(report.appointments_deleted, 3);
    assert_eq!(report.notifications_queued, 2);
    assert_eq!(report.notifications_skipped, 1);
    assert_eq!(clinic.role_of(specialist_account.id).await, Role::Basic);
    assert_eq!(
        dispatcher.recipients(),
        sorted(vec![p1_account.id, p2_account.id])
    );
    for notice in dispatcher.sent() {
        assert_eq!(notice.reason, "the specialist has been offboarded");
        assert_eq!(notice.canceled_by, CanceledBy::Specialist);
    }
}

#[tokio::test]
async fn test_include_past_appointments_removes_history() {
    let clinic = clinic().await;
    let (_, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;
    let (_, patient) = clinic.patient("pia@clinic.test", "Pia").await;

    let past = clinic.appointment(&patient, &specialist, -Duration::days(30)).await;
    let upcoming = clinic.appointment(&patient, &specialist, Duration::days(30)).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::specialist(specialist.id), system_actor(), true)
        .await
        .unwrap();

    assert_eq!(report.appointments_deleted, 2);
    assert_eq!(report.notifications_queued, 2);
    assert!(clinic.find_appointment(past.id).await.is_none());
    assert!(clinic.find_appointment(upcoming.id).await.is_none());
}

#[tokio::test]
async fn test_second_offboarding_is_not_found_and_sends_nothing() {
    let clinic = clinic().await;
    let (_, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;
    let (_, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    clinic.appointment(&patient, &specialist, Duration::days(1)).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());
    let profile = ProfileRef::patient(patient.id);

    service.offboard(profile, system_actor(), false).await.unwrap();
    assert_eq!(dispatcher.sent().len(), 1);

    let again = service.offboard(profile, system_actor(), false).await;
    assert!(matches!(again, Err(AppError::NotFound)));
    assert_eq!(dispatcher.sent().len(), 1);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let clinic = clinic().await;
    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let result = service
        .offboard(ProfileRef::specialist(uuid::Uuid::new_v4()), system_actor(), true)
        .await;

    assert!(matches!(result, Err(AppError::NotFound)));
    assert!(dispatcher.sent().is_empty());
}

#[tokio::test]
async fn test_failure_before_profile_removal_rolls_everything_back() {
    let clinic = clinic().await;
    let (patient_account, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    let (_, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;
    let upcoming = clinic.appointment(&patient, &specialist, Duration::days(1)).await;

    clinic
        .db
        .connection()
        .execute_unprepared(
            "CREATE TRIGGER refuse_patient_delete BEFORE DELETE ON patients \
             BEGIN SELECT RAISE(ABORT, 'patient rows are frozen'); END;",
        )
        .await
        .unwrap();

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let result = service
        .offboard(ProfileRef::patient(patient.id), system_actor(), false)
        .await;

    assert!(matches!(result, Err(AppError::Database(_))));
    assert_eq!(clinic.role_of(patient_account.id).await, Role::Patient);
    assert!(clinic.profile_exists(ProfileRef::patient(patient.id)).await);
    assert!(clinic.find_appointment(upcoming.id).await.is_some());
    assert!(dispatcher.sent().is_empty());
}

#[tokio::test]
async fn test_dispatch_failure_is_counted_not_propagated() {
    let clinic = clinic().await;
    let (_, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    let (a_account, a) = clinic.specialist("ada@clinic.test", "Ada").await;
    let (b_account, b) = clinic.specialist("ben@clinic.test", "Ben").await;
    clinic.appointment(&patient, &a, Duration::days(1)).await;
    clinic.appointment(&patient, &b, Duration::days(2)).await;

    let dispatcher = RecordingDispatcher::new();
    dispatcher.refuse(a_account.id);
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::patient(patient.id), system_actor(), false)
        .await
        .unwrap();

    assert_eq!(report.appointments_deleted, 2);
    assert_eq!(report.notifications_queued, 1);
    assert_eq!(report.notifications_failed, 1);
    assert_eq!(dispatcher.recipients(), vec![b_account.id]);
    assert!(!clinic.profile_exists(ProfileRef::patient(patient.id)).await);
}

#[tokio::test]
async fn test_soft_deleted_appointments_are_left_alone() {
    let clinic = clinic().await;
    let (_, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    let (_, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;

    let mut archived = Appointment::schedule(
        patient.id,
        specialist.id,
        Utc::now() + Duration::days(5),
        AppointmentKind::Remote,
    );
    archived.deleted_at = Some(Utc::now());
    let archived = clinic.insert_appointment(archived).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::patient(patient.id), system_actor(), true)
        .await
        .unwrap();

    assert_eq!(report.appointments_deleted, 0);
    assert!(dispatcher.sent().is_empty());
    assert!(clinic.find_appointment(archived.id).await.is_some());
}

#[tokio::test]
async fn test_profile_without_appointments_is_still_offboarded() {
    let clinic = clinic().await;
    let (account, specialist) = clinic.specialist("sam@clinic.test", "Sam").await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::specialist(specialist.id), system_actor(), false)
        .await
        .unwrap();

    assert_eq!(report.profile.kind, ProfileKind::Specialist);
    assert!(report.account_demoted);
    assert_eq!(report.appointments_deleted, 0);
    assert_eq!(clinic.role_of(account.id).await, Role::Basic);
}

#[tokio::test]
async fn test_deleted_account_is_not_demoted() {
    let clinic = clinic().await;
    let (account, patient) = clinic.patient("pia@clinic.test", "Pia").await;
    clinic.delete_account(account.id).await;

    let dispatcher = RecordingDispatcher::new();
    let service = Offboarder::new(clinic.uow.clone(), dispatcher.clone());

    let report = service
        .offboard(ProfileRef::patient(patient.id), system_actor(), false)
        .await
        .unwrap();

    assert!(!report.account_demoted);
    assert!(!clinic.profile_exists(ProfileRef::patient(patient.id)).await);
}
