//! Request authorizer for the admin service.
//!
//! The authorizer reads the `auth` query attribute of an incoming request and
//! turns it into a [`Decision`]: who the caller is, whether they may invoke the
//! requested resource, and the permission level the downstream handler will
//! see in its request context.
//!
//! # Authorization Flow
//!
//! 1. **Request arrives** at the platform, which builds an [`event::AuthorizerEvent`]
//! 2. **Normalization** lowercases the `auth` attribute
//! 3. **Lookup** resolves the token through a static table to a principal and effect
//! 4. **Decision** attaches the principal's permission level and a policy scoped
//!    to exactly the requested resource
//! 5. **Propagation** is the platform's job: it copies the decision context onto
//!    the protected handler's invocation as an [`types::AuthorizerContext`]
//!
//! An unrecognized token is an error, not a deny. The platform reports it as a
//! server-side failure.

pub mod error;
pub mod event;
pub mod types;

use error::{AuthzError, Result};
use event::{AuthorizerEvent, AuthorizerResponse};
use tracing::{debug, info, warn};
use types::{AuthorizationRequest, Decision, DecisionContext, Effect, Principal, AUTH_ATTRIBUTE};

/// One row of the token dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRule {
    /// Lowercased token value.
    pub token: &'static str,
    pub principal: Principal,
    pub effect: Effect,
}

/// The token table the authorizer uses unless told otherwise.
pub static DEFAULT_TOKEN_RULES: &[TokenRule] = &[
    TokenRule {
        token: "admin",
        principal: Principal::Admin,
        effect: Effect::Allow,
    },
    TokenRule {
        token: "user",
        principal: Principal::User,
        effect: Effect::Allow,
    },
    TokenRule {
        token: "deny",
        principal: Principal::User,
        effect: Effect::Deny,
    },
];

/// Turns authorization requests into decisions.
///
/// The authorizer holds no mutable state; one instance can serve any number of
/// concurrent requests.
///
/// # Example
///
/// ```rust
/// use authz::{Authorizer, types::{AuthorizationRequest, Effect, Principal}};
///
/// let authorizer = Authorizer::new();
/// let request = AuthorizationRequest::new("arn:test:123").with_attribute("auth", "Admin");
///
/// let decision = authorizer.authorize(&request).unwrap();
/// assert_eq!(decision.principal, Principal::Admin);
/// assert_eq!(decision.effect, Effect::Allow);
/// assert_eq!(decision.context.permission_level.value(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Authorizer {
    rules: &'static [TokenRule],
}

impl Authorizer {
    /// Creates an authorizer over [`DEFAULT_TOKEN_RULES`].
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_TOKEN_RULES)
    }

    /// Creates an authorizer over a custom token table.
    ///
    /// Tokens in the table must already be lowercase.
    pub fn with_rules(rules: &'static [TokenRule]) -> Self {
        Self { rules }
    }

    /// Decides a single request.
    ///
    /// # Errors
    ///
    /// - [`AuthzError::InvalidToken`] if `auth` is absent or unknown
    /// - [`AuthzError::MissingResource`] if the resource identifier is empty
    pub fn authorize(&self, request: &AuthorizationRequest) -> Result<Decision> {
        let token = request
            .attribute(AUTH_ATTRIBUTE)
            .map(normalize_token)
            .ok_or(AuthzError::InvalidToken)?;

        let rule = self.lookup(&token).ok_or_else(|| {
            debug!("AUTHORIZER: no rule for presented token");
            AuthzError::InvalidToken
        })?;

        if request.resource.is_empty() {
            return Err(AuthzError::MissingResource);
        }

        let decision = Decision {
            principal: rule.principal,
            effect: rule.effect,
            context: DecisionContext {
                permission_level: rule.principal.permission_level(),
            },
            resource: request.resource.clone(),
        };

        match decision.effect {
            Effect::Allow => info!(
                "AUTHORIZER: Allow {} (level {}) on {}",
                decision.principal, decision.context.permission_level, decision.resource
            ),
            Effect::Deny => warn!(
                "AUTHORIZER: Deny {} (level {}) on {}",
                decision.principal, decision.context.permission_level, decision.resource
            ),
        }

        Ok(decision)
    }

    /// Handles a raw authorizer event and builds the platform response.
    pub fn handle_event(&self, event: &AuthorizerEvent) -> Result<AuthorizerResponse> {
        let request = AuthorizationRequest::from(event);
        match self.authorize(&request) {
            Ok(decision) => Ok(AuthorizerResponse::from(&decision)),
            Err(e) => {
                warn!("AUTHORIZER: rejecting {}: {}", event.method_arn, e);
                Err(e)
            }
        }
    }

    /// Decodes a JSON authorizer event and handles it.
    pub fn handle_json(&self, payload: &str) -> Result<AuthorizerResponse> {
        let event: AuthorizerEvent = serde_json::from_str(payload)?;
        self.handle_event(&event)
    }

    fn lookup(&self, token: &str) -> Option<&TokenRule> {
        self.rules.iter().find(|rule| rule.token == token)
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokens compare case-insensitively.
pub fn normalize_token(raw: &str) -> String {
    raw.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::PermissionLevel;

    const RESOURCE: &str = "arn:test:123";

    fn request(token: &str) -> AuthorizationRequest {
        AuthorizationRequest::new(RESOURCE).with_attribute("auth", token)
    }

    #[test]
    fn test_admin_any_case() {
        let authorizer = Authorizer::new();
        for token in ["admin", "ADMIN", "Admin"] {
            let decision = authorizer.authorize(&request(token)).unwrap();
            assert_eq!(decision.principal, Principal::Admin);
            assert_eq!(decision.effect, Effect::Allow);
            assert_eq!(decision.context.permission_level, PermissionLevel::new(10));
        }
    }

    #[test]
    fn test_user_any_case() {
        let authorizer = Authorizer::new();
        for token in ["user", "USER"] {
            let decision = authorizer.authorize(&request(token)).unwrap();
            assert_eq!(decision.principal, Principal::User);
            assert_eq!(decision.effect, Effect::Allow);
            assert_eq!(decision.context.permission_level, PermissionLevel::new(5));
        }
    }

    #[test]
    fn test_deny_keeps_user_level() {
        let decision = Authorizer::new().authorize(&request("deny")).unwrap();
        assert_eq!(decision.principal, Principal::User);
        assert_eq!(decision.effect, Effect::Deny);
        assert_eq!(decision.context.permission_level, PermissionLevel::new(5));
        assert!(!decision.is_allowed());
    }

    #[test]
    fn test_unknown_tokens_are_invalid() {
        let authorizer = Authorizer::new();
        for token in ["guest", "", "admin ", "root"] {
            let result = authorizer.authorize(&request(token));
            assert!(
                matches!(result, Err(AuthzError::InvalidToken)),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_missing_auth_is_invalid() {
        let request = AuthorizationRequest::new(RESOURCE).with_attribute("other", "admin");
        assert!(matches!(
            Authorizer::new().authorize(&request),
            Err(AuthzError::InvalidToken)
        ));
    }

    #[test]
    fn test_empty_resource_produces_no_decision() {
        let request = AuthorizationRequest::new("").with_attribute("auth", "admin");
        assert!(matches!(
            Authorizer::new().authorize(&request),
            Err(AuthzError::MissingResource)
        ));
    }

    #[test]
    fn test_token_checked_before_resource() {
        let request = AuthorizationRequest::new("").with_attribute("auth", "guest");
        assert!(matches!(
            Authorizer::new().authorize(&request),
            Err(AuthzError::InvalidToken)
        ));
    }

    #[test]
    fn test_policy_scoped_to_request_resource() {
        let decision = Authorizer::new().authorize(&request("admin")).unwrap();
        let policy = decision.policy_document();
        assert_eq!(policy.statement.len(), 1);
        assert_eq!(policy.statement[0].resource, RESOURCE);
        assert_eq!(policy.statement[0].effect, Effect::Allow);
    }

    #[test]
    fn test_idempotent() {
        let authorizer = Authorizer::new();
        let first = authorizer.authorize(&request("User")).unwrap();
        let second = authorizer.authorize(&request("User")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_rules() {
        static ADMIN_ONLY: &[TokenRule] = &[TokenRule {
            token: "root",
            principal: Principal::Admin,
            effect: Effect::Allow,
        }];

        let authorizer = Authorizer::with_rules(ADMIN_ONLY);
        assert!(authorizer.authorize(&request("ROOT")).unwrap().is_allowed());
        assert!(matches!(
            authorizer.authorize(&request("admin")),
            Err(AuthzError::InvalidToken)
        ));
    }

    #[test]
    fn test_handle_json() {
        let payload = r#"{
            "type": "REQUEST",
            "methodArn": "arn:test:123",
            "queryStringParameters": { "auth": "Deny" }
        }"#;

        let response = Authorizer::new().handle_json(payload).unwrap();
        assert_eq!(response.principal_id, "user");
        assert_eq!(response.context.permission_level, PermissionLevel::new(5));
        assert_eq!(response.policy_document.statement[0].effect, Effect::Deny);
    }

    #[test]
    fn test_handle_json_without_query() {
        let payload = r#"{ "methodArn": "arn:test:123", "queryStringParameters": null }"#;
        assert!(matches!(
            Authorizer::new().handle_json(payload),
            Err(AuthzError::InvalidToken)
        ));
    }

    #[test]
    fn test_handle_json_malformed() {
        assert!(matches!(
            Authorizer::new().handle_json("not json"),
            Err(AuthzError::MalformedEvent(_))
        ));
    }
}
