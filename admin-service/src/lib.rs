//! The admin service: a protected handler behind the request authorizer.
//!
//! The platform only invokes this handler after the authorizer allowed the
//! request, and it attaches the authorizer's decision context to the event.
//! The handler re-reads that context and applies its own, finer gate: only
//! principals ranked at [`ADMIN_LEVEL`] or above see the content.

pub mod error;
pub mod event;

use authz::types::{AuthorizerContext, PermissionLevel};
use error::{AdminServiceError, Result};
use event::{MessageBody, ProxyRequest, ProxyResponse};
use tracing::{debug, error, info, warn};

/// Minimum level required to see admin content.
pub const ADMIN_LEVEL: PermissionLevel = PermissionLevel::new(10);

/// The permission-gated handler.
#[derive(Debug, Clone, Copy)]
pub struct AdminService {
    required_level: PermissionLevel,
}

impl AdminService {
    pub fn new() -> Self {
        Self::with_required_level(ADMIN_LEVEL)
    }

    pub fn with_required_level(required_level: PermissionLevel) -> Self {
        Self { required_level }
    }

    pub fn required_level(&self) -> PermissionLevel {
        self.required_level
    }

    /// Handles one invocation.
    ///
    /// Never fails: internal faults are logged and returned as a 500 response
    /// whose `message` carries the fault description.
    pub fn handle(&self, event: &ProxyRequest) -> ProxyResponse {
        match self.try_handle(event) {
            Ok(response) => response,
            Err(e) => {
                error!("ADMIN SERVICE: internal fault: {}", e);
                fault_response(&e)
            }
        }
    }

    /// Decodes a JSON proxy event and handles it.
    ///
    /// An undecodable event is reported the same way as any other fault.
    pub fn handle_json(&self, payload: &str) -> ProxyResponse {
        match serde_json::from_str::<ProxyRequest>(payload) {
            Ok(event) => self.handle(&event),
            Err(e) => {
                let e = AdminServiceError::MalformedEvent(e);
                error!("ADMIN SERVICE: internal fault: {}", e);
                fault_response(&e)
            }
        }
    }

    fn try_handle(&self, event: &ProxyRequest) -> Result<ProxyResponse> {
        let authorizer = event
            .request_context
            .authorizer
            .as_ref()
            .ok_or(AdminServiceError::MissingAuthorizerContext)?;

        debug!(
            "ADMIN SERVICE: principal={} level={} required={}",
            authorizer.principal_id,
            authorizer.permission_level(),
            self.required_level
        );

        if authorizer.permission_level() < self.required_level {
            warn!(
                "ADMIN SERVICE: {} below required level, responding 403",
                authorizer.principal_id
            );
            return respond(403, forbidden_message(authorizer));
        }

        info!("ADMIN SERVICE: serving content to {}", authorizer.principal_id);
        respond(200, welcome_message(authorizer))
    }
}

impl Default for AdminService {
    fn default() -> Self {
        Self::new()
    }
}

fn forbidden_message(authorizer: &AuthorizerContext) -> String {
    format!(
        "Hello {} you are not allowed to see this resource.",
        authorizer.principal_id
    )
}

fn welcome_message(authorizer: &AuthorizerContext) -> String {
    format!("hello world from admin service {}", authorizer.principal_id)
}

fn respond(status_code: u16, message: String) -> Result<ProxyResponse> {
    let body = serde_json::to_string(&MessageBody {
        message: Some(message),
    })?;
    Ok(ProxyResponse::new(status_code, body))
}

// Built by hand so that a serializer failure cannot recurse into another fault.
fn fault_response(err: &AdminServiceError) -> ProxyResponse {
    let message = serde_json::Value::String(err.to_string());
    ProxyResponse::new(500, format!("{{\"message\":{}}}", message))
}
