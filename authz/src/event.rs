//! Wire shapes for REQUEST authorizer invocations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{AuthorizationRequest, Decision, DecisionContext, PolicyDocument};

/// The event the platform hands to a REQUEST authorizer.
///
/// Only `methodArn` is mandatory on the wire; the platform sends `null` for
/// absent maps, which deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default)]
    pub method_arn: String,

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

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<serde_json::Value>,
}

impl AuthorizerEvent {
    /// A minimal REQUEST event for one resource and a query map.
    pub fn request(method_arn: impl Into<String>, query: HashMap<String, String>) -> Self {
        Self {
            event_type: Some("REQUEST".to_string()),
            method_arn: method_arn.into(),
            query_string_parameters: Some(query),
            ..Default::default()
        }
    }
}

impl From<&AuthorizerEvent> for AuthorizationRequest {
    fn from(event: &AuthorizerEvent) -> Self {
        Self {
            resource: event.method_arn.clone(),
            attributes: event.query_string_parameters.clone().unwrap_or_default(),
        }
    }
}

/// The authorizer's answer as the platform expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub context: DecisionContext,
    pub policy_document: PolicyDocument,
}

impl From<&Decision> for AuthorizerResponse {
    fn from(decision: &Decision) -> Self {
        Self {
            principal_id: decision.principal.as_str().to_string(),
            context: decision.context,
            policy_document: decision.policy_document(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Effect, PermissionLevel, Principal};
    use serde_json::json;

    #[test]
    fn test_event_from_platform_json() {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "type": "REQUEST",
            "methodArn": "arn:aws:execute-api:us-east-1:123456789012:abc/dev/GET/admin",
            "resource": "/admin",
            "path": "/admin",
            "httpMethod": "GET",
            "headers": { "Host": "localhost" },
            "queryStringParameters": { "auth": "admin" },
            "pathParameters": null,
            "stageVariables": null,
            "requestContext": { "stage": "dev" }
        }))
        .unwrap();

        assert_eq!(event.event_type.as_deref(), Some("REQUEST"));
        assert!(event.path_parameters.is_none());

        let request = AuthorizationRequest::from(&event);
        assert_eq!(request.attribute("auth"), Some("admin"));
        assert!(request.resource.ends_with("/dev/GET/admin"));
    }

    #[test]
    fn test_null_query_yields_no_attributes() {
        let event: AuthorizerEvent = serde_json::from_value(json!({
            "methodArn": "arn:test:123",
            "queryStringParameters": null
        }))
        .unwrap();
        assert!(AuthorizationRequest::from(&event).attributes.is_empty());
    }

    #[test]
    fn test_response_wire_shape() {
        let decision = Decision {
            principal: Principal::User,
            effect: Effect::Deny,
            context: DecisionContext {
                permission_level: PermissionLevel::new(5),
            },
            resource: "arn:test:123".to_string(),
        };

        let value = serde_json::to_value(AuthorizerResponse::from(&decision)).unwrap();
        assert_eq!(
            value,
            json!({
                "principalId": "user",
                "context": { "permissionLevel": 5 },
                "policyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": "execute-api:Invoke",
                        "Effect": "Deny",
                        "Resource": "arn:test:123"
                    }]
                }
            })
        );
    }
}
