//! Optional JSON extractor - Request options with defaults.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::errors::AppError;

/// JSON body that may be omitted.
///
/// A missing or blank body yields `T::default()`. Anything else must parse
/// as `T`; failures surface as `AppError::Validation` without serde details.
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| AppError::validation(describe(&e)))
    }
}

fn describe(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Data => format!("Request body has an invalid field (column {})", error.column()),
        Category::Syntax | Category::Eof | Category::Io => {
            "Request body is not valid JSON".to_string()
        }
    }
}
