use authz::{
    event::AuthorizerEvent,
    types::{AuthorizerContext, Effect, INVOKE_ACTION},
};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::{
    error::GatewayError,
    handlers::admin::{header_map, query_map},
    server::GatewayConfig,
    AppState,
};

/// Header carrying the per-request id on every response
pub const REQUEST_ID_HEADER: &str = "x-gateway-request-id";

/// Per-request id, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }
}

/// Runs the request authorizer in front of a protected route.
///
/// # Authorization Flow
///
/// 1. Build an authorizer event from the query string, headers and method ARN
/// 2. Authorizer error -> 500, the caller learns nothing about why
/// 3. Evaluate the returned policy for `execute-api:Invoke` on the method ARN:
///    explicit deny -> 403, no matching statement -> 403
/// 4. Allow -> attach the decision context to the request and continue
pub async fn authorizer_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, GatewayError> {
    let event = build_authorizer_event(&state.config, &request);

    debug!("AUTHZ MIDDLEWARE: authorizing {}", event.method_arn);

    let response = state.authorizer.handle_event(&event).map_err(|e| {
        warn!("AUTHZ MIDDLEWARE: authorizer failed for {}: {}", event.method_arn, e);
        GatewayError::from(e)
    })?;

    match response
        .policy_document
        .evaluate(INVOKE_ACTION, &event.method_arn)
    {
        Some(Effect::Allow) => {
            info!(
                "AUTHZ MIDDLEWARE: Access ALLOWED for {} on {}",
                response.principal_id, event.method_arn
            );
        }
        Some(Effect::Deny) => {
            warn!(
                "AUTHZ MIDDLEWARE: Access DENIED for {} on {}",
                response.principal_id, event.method_arn
            );
            return Err(GatewayError::ExplicitDeny);
        }
        None => {
            warn!(
                "AUTHZ MIDDLEWARE: no statement covers {} for {}",
                event.method_arn, response.principal_id
            );
            return Err(GatewayError::ImplicitDeny);
        }
    }

    request.extensions_mut().insert(AuthorizerContext {
        principal_id: response.principal_id,
        context: response.context,
    });

    Ok(next.run(request).await)
}

/// Builds the REQUEST authorizer event for an incoming HTTP request
pub fn build_authorizer_event(config: &GatewayConfig, request: &Request<Body>) -> AuthorizerEvent {
    let method = request.method().as_str();
    let path = request.uri().path();

    // An unparsable query string is treated as absent; the authorizer then
    // rejects the request for lack of a token.
    let query = query_map(request.uri());

    AuthorizerEvent {
        resource: Some(config.admin_path.clone()),
        path: Some(path.to_string()),
        http_method: Some(method.to_string()),
        headers: Some(header_map(request.headers())),
        ..AuthorizerEvent::request(config.method_arn(method, path), query)
    }
}

/// Request processing middleware hook
///
/// Assigns the request id and logs latency.
pub async fn request_middleware(
    State(_state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = RequestId::generate();
    request.extensions_mut().insert(request_id.clone());

    info!(
        "REQUEST MIDDLEWARE: {} {} (request {})",
        method, uri, request_id.0
    );

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    debug!(
        "REQUEST MIDDLEWARE: {} {} -> {} in {:?}",
        method,
        uri,
        response.status(),
        start.elapsed()
    );

    response
}

/// Response processing middleware hook
///
/// Stamps the deployment stage on outgoing responses.
pub async fn response_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if let Ok(stage) = HeaderValue::from_str(&state.config.stage) {
        response.headers_mut().insert("x-gateway-stage", stage);
    }

    response
}
