use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;

pub const SERVICE_NAME: &str = "account-service";

pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "UP".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}
