//! Offboarding handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::OptionalJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Appointment, OffboardingReport, ProfileRef};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Offboarding options. The body may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct OffboardRequest {
    /// Also remove appointments scheduled before now
    #[serde(default)]
    pub include_past_appointments: bool,
}

/// Create offboarding routes (mounted under `/admin`)
pub fn offboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/patients/:id/offboard", post(offboard_patient))
        .route("/specialists/:id/offboard", post(offboard_specialist))
        .route("/patients/:id/appointments", get(patient_appointments))
        .route("/specialists/:id/appointments", get(specialist_appointments))
}

/// Offboard a patient
pub async fn offboard_patient(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    OptionalJson(payload): OptionalJson<OffboardRequest>,
) -> AppResult<ApiResponse<OffboardingReport>> {
    offboard(&state, &user, ProfileRef::patient(id), payload).await
}

/// Offboard a specialist
pub async fn offboard_specialist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    OptionalJson(payload): OptionalJson<OffboardRequest>,
) -> AppResult<ApiResponse<OffboardingReport>> {
    offboard(&state, &user, ProfileRef::specialist(id), payload).await
}

async fn offboard(
    state: &AppState,
    user: &CurrentUser,
    profile: ProfileRef,
    payload: OffboardRequest,
) -> AppResult<ApiResponse<OffboardingReport>> {
    let actor = require_admin(user)?;

    let report = state
        .offboarding_service
        .offboard(profile, actor, payload.include_past_appointments)
        .await?;

    Ok(ApiResponse::with_message(report, format!("{} offboarded", profile.kind)))
}

/// Appointments of a patient
pub async fn patient_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Vec<Appointment>>> {
    require_admin(&user)?;
    let appointments = state
        .directory_service
        .appointments_of(ProfileRef::patient(id))
        .await?;
    Ok(ApiResponse::success(appointments))
}

/// Appointments of a specialist
pub async fn specialist_appointments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Vec<Appointment>>> {
    require_admin(&user)?;
    let appointments = state
        .directory_service
        .appointments_of(ProfileRef::specialist(id))
        .await?;
    Ok(ApiResponse::success(appointments))
}
