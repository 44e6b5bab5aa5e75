use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub stage: String,
    pub admin_path: String,
}

/// Body returned by the admin service
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: Option<String>,
}

/// Body returned when the gateway itself denies a request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DenyResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

