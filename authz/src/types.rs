//! Core authorization types shared by the authorizer and its downstream consumers.
//!
//! The decision context produced here is the only channel between the
//! authorizer and the protected handler. The platform copies it from the
//! authorizer response onto the next invocation, and [`AuthorizerContext`] is the
//! typed shape both sides agree on.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Policy language version emitted in every policy document.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single action every generated statement is scoped to.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// The query attribute carrying the caller's token.
pub const AUTH_ATTRIBUTE: &str = "auth";

/// Static principal to permission level table.
///
/// Principal ids missing from this table rank at [`PermissionLevel::NONE`].
pub static PERMISSION_LEVELS: &[(&str, PermissionLevel)] = &[
    ("admin", PermissionLevel::new(10)),
    ("user", PermissionLevel::new(5)),
];

/// A known identity a request can be authorized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Principal {
    Admin,
    User,
}

impl Principal {
    /// The wire id of this principal (`principalId`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Principal::Admin => "admin",
            Principal::User => "user",
        }
    }

    /// Resolves a wire id back to a known principal.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "admin" => Some(Principal::Admin),
            "user" => Some(Principal::User),
            _ => None,
        }
    }

    /// The tier this principal ranks at, independent of any single decision.
    pub fn permission_level(&self) -> PermissionLevel {
        PermissionLevel::for_principal_id(self.as_str())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Allow => f.write_str("Allow"),
            Effect::Deny => f.write_str("Deny"),
        }
    }
}

/// Integer access tier. Higher ranks see more.
///
/// Deserializes from a JSON integer or from a numeric string, since the
/// platform stringifies context values when it forwards them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PermissionLevel(u32);

impl PermissionLevel {
    /// The level of an unknown or unauthenticated principal.
    pub const NONE: PermissionLevel = PermissionLevel(0);

    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Looks a principal id up in [`PERMISSION_LEVELS`].
    pub fn for_principal_id(principal_id: &str) -> Self {
        PERMISSION_LEVELS
            .iter()
            .find(|(id, _)| *id == principal_id)
            .map(|(_, level)| *level)
            .unwrap_or(Self::NONE)
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for PermissionLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(level) => Ok(Self(level)),
            Repr::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("invalid permission level: {:?}", text))),
        }
    }
}

/// Context attached to a decision and passed verbatim to the next hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    pub permission_level: PermissionLevel,
}

/// What the protected handler sees under `requestContext.authorizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerContext {
    pub principal_id: String,

    #[serde(flatten)]
    pub context: DecisionContext,
}

impl AuthorizerContext {
    pub fn new(principal_id: impl Into<String>, permission_level: PermissionLevel) -> Self {
        Self {
            principal_id: principal_id.into(),
            context: DecisionContext { permission_level },
        }
    }

    pub fn permission_level(&self) -> PermissionLevel {
        self.context.permission_level
    }
}

impl From<&Decision> for AuthorizerContext {
    fn from(decision: &Decision) -> Self {
        Self {
            principal_id: decision.principal.as_str().to_string(),
            context: decision.context,
        }
    }
}

/// Input to the authorizer: the resource being invoked plus request attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorizationRequest {
    /// The target being invoked (a method ARN).
    pub resource: String,

    /// Query string attributes.
    pub attributes: HashMap<String, String>,
}

impl AuthorizationRequest {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// The authorizer's verdict for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub principal: Principal,
    pub effect: Effect,
    pub context: DecisionContext,
    pub resource: String,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        self.effect == Effect::Allow
    }

    pub fn policy_document(&self) -> PolicyDocument {
        PolicyDocument::for_invoke(self.effect, &self.resource)
    }
}

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

impl Statement {
    fn matches(&self, action: &str, resource: &str) -> bool {
        self.action == action && self.resource == resource
    }
}

/// IAM-style policy document returned by the authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    /// A single-statement policy for invoking exactly one resource.
    pub fn for_invoke(effect: Effect, resource: impl Into<String>) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![Statement {
                action: INVOKE_ACTION.to_string(),
                effect,
                resource: resource.into(),
            }],
        }
    }

    /// Evaluates the policy for an action on a resource.
    ///
    /// Matching is exact. An explicit `Deny` wins over any `Allow`; `None` means
    /// no statement applies, which callers must treat as a deny.
    pub fn evaluate(&self, action: &str, resource: &str) -> Option<Effect> {
        let mut verdict = None;
        for statement in self.statement.iter().filter(|s| s.matches(action, resource)) {
            match statement.effect {
                Effect::Deny => return Some(Effect::Deny),
                Effect::Allow => verdict = Some(Effect::Allow),
            }
        }
        verdict
    }

    pub fn is_allowed(&self, action: &str, resource: &str) -> bool {
        self.evaluate(action, resource) == Some(Effect::Allow)
    }
}
