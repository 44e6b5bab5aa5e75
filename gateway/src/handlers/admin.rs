//! Proxy integration for the admin service.

use admin_service::event::{ProxyRequest, ProxyResponse, RequestContext};
use authz::types::AuthorizerContext;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension,
};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::{
    middleware_hooks::RequestId,
    models::{DenyResponse, MessageResponse},
    AppState,
};

/// Invoke the admin service
///
/// GET /admin
#[utoipa::path(
    get,
    path = "/admin",
    params(
        ("auth" = String, Query, description = "Caller token: admin, user or deny (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Content for admin-level principals", body = MessageResponse),
        (status = 403, description = "Denied by the authorizer or below the admin level", body = DenyResponse),
        (status = 500, description = "Authorizer rejected the token", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn admin_service(
    State(state): State<AppState>,
    Extension(authorizer): Extension<AuthorizerContext>,
    request_id: Option<Extension<RequestId>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id
        .map(|Extension(id)| id)
        .unwrap_or_else(RequestId::generate);

    let event = ProxyRequest {
        resource: Some(state.config.admin_path.clone()),
        path: Some(uri.path().to_string()),
        http_method: Some(method.to_string()),
        headers: Some(header_map(&headers)),
        query_string_parameters: Some(query_map(&uri)),
        request_context: RequestContext {
            request_id: Some(request_id.0),
            stage: Some(state.config.stage.clone()),
            authorizer: Some(authorizer),
        },
        ..Default::default()
    };

    debug!("Invoking admin service with {:?}", event.request_context);

    into_http_response(state.admin.handle(&event))
}

/// Parses the query string, treating an unparsable one as empty.
pub fn query_map(uri: &Uri) -> HashMap<String, String> {
    Query::try_from_uri(uri)
        .map(|Query(query)| query)
        .unwrap_or_default()
}

/// Flattens a header map, dropping values that are not visible ASCII.
pub fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Converts a proxy integration response into an HTTP response.
pub fn into_http_response(proxy: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(proxy.status_code).unwrap_or_else(|_| {
        error!("Admin service returned invalid status {}", proxy.status_code);
        StatusCode::BAD_GATEWAY
    });

    let mut builder = Response::builder().status(status);
    for (name, value) in &proxy.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.body(Body::from(proxy.body)).unwrap_or_else(|e| {
        error!("Failed to build response from admin service output: {}", e);
        StatusCode::BAD_GATEWAY.into_response()
    })
}
