use auth::Principal;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

/// Identity carried by the caller's access token.
pub async fn me(
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&principal).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub email: String,
    pub authorities: Vec<String>,
}

impl From<&Principal> for MeResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            email: principal.subject().to_string(),
            authorities: principal.authorities().to_vec(),
        }
    }
}
