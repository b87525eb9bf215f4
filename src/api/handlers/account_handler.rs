//! Account handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{Profile, ProfileDetails};
use crate::errors::AppResult;
use crate::services::AccountOverview;
use crate::types::{ApiResponse, Created};

const MAX_SPECIALTY_LENGTH: usize = 100;

/// Enrollment request, e.g. `{"kind": "specialist", "specialty": "Cardiology"}`
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[serde(flatten)]
    #[validate(custom(function = "validate_details"))]
    pub details: ProfileDetails,
}

fn validate_details(details: &ProfileDetails) -> Result<(), ValidationError> {
    if let ProfileDetails::Specialist {
        specialty: Some(specialty),
    } = details
    {
        let len = specialty.trim().chars().count();
        if len == 0 || len > MAX_SPECIALTY_LENGTH {
            let mut error = ValidationError::new("specialty");
            error.message = Some("Specialty must be between 1 and 100 characters".into());
            return Err(error);
        }
    }
    Ok(())
}

/// Create account routes (mounted under `/admin`)
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/:id", get(get_account))
        .route("/accounts/:id/enroll", post(enroll))
}

/// Get an account with its profiles
pub async fn get_account(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<AccountOverview>> {
    require_admin(&user)?;
    let overview = state.directory_service.get_account(id).await?;
    Ok(ApiResponse::success(overview))
}

/// Enroll an account as patient or specialist
pub async fn enroll(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> AppResult<Created<Profile>> {
    let actor = require_admin(&user)?;
    let profile = state
        .enrollment_service
        .enroll(id, payload.details, actor)
        .await?;
    Ok(Created(profile))
}
