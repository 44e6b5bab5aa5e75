use thiserror::Error;

/// Faults raised while assembling an admin service response.
///
/// None of these escape [`crate::AdminService::handle`]; they are converted to
/// a 500 response there.
#[derive(Error, Debug)]
pub enum AdminServiceError {
    #[error("Request carries no authorizer context")]
    MissingAuthorizerContext,

    #[error("Malformed proxy event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    #[error("Failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdminServiceError>;
