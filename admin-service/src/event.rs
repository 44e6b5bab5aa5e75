//! Proxy integration event and response shapes.

use authz::types::AuthorizerContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An invocation forwarded by the platform after the authorizer allowed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub stage_variables: Option<HashMap<String, String>>,

    #[serde(default)]
    pub request_context: RequestContext,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    /// A bare request carrying only an authorizer context.
    pub fn authorized(authorizer: AuthorizerContext) -> Self {
        Self {
            request_context: RequestContext {
                authorizer: Some(authorizer),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    /// Populated by the platform from the authorizer's decision.
    #[serde(default)]
    pub authorizer: Option<AuthorizerContext>,
}

/// The handler's answer, in proxy integration format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// JSON text with a `message` field.
    pub body: String,
}

impl ProxyResponse {
    pub fn new(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Extracts `message` from the body, if the body is a JSON object carrying one.
    pub fn message(&self) -> Option<String> {
        let body: MessageBody = serde_json::from_str(&self.body).ok()?;
        body.message
    }
}

/// Body of every admin service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: Option<String>,
}
