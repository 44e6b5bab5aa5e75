use crate::{create_router, error::GatewayError, error::GatewayResult, AppState};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Region, account and API id are only used to build method ARNs
    pub region: String,
    pub account_id: String,
    pub api_id: String,
    /// Deployment stage, the first path segment of every method ARN
    pub stage: String,
    /// Route the admin service is mounted on
    pub admin_path: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
            region: "us-east-1".to_string(),
            account_id: "123456789012".to_string(),
            api_id: "local".to_string(),
            stage: "dev".to_string(),
            admin_path: "/admin".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a new gateway configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from `GATEWAY_*` environment variables over the defaults
    pub fn from_env() -> GatewayResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("GATEWAY_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            config.port = port.parse().map_err(|_| {
                GatewayError::Config(format!("GATEWAY_PORT is not a port: {}", port))
            })?;
        }
        if let Some(region) = lookup("GATEWAY_REGION") {
            config.region = region;
        }
        if let Some(account_id) = lookup("GATEWAY_ACCOUNT_ID") {
            config.account_id = account_id;
        }
        if let Some(api_id) = lookup("GATEWAY_API_ID") {
            config.api_id = api_id;
        }
        if let Some(stage) = lookup("GATEWAY_STAGE") {
            config.stage = stage;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the stage
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Set the admin route
    pub fn with_admin_path(mut self, path: impl Into<String>) -> Self {
        self.admin_path = path.into();
        self
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if !self.admin_path.starts_with('/') {
            return Err(GatewayError::Config(format!(
                "admin path must start with '/': {}",
                self.admin_path
            )));
        }
        if self.stage.is_empty() || self.stage.contains('/') {
            return Err(GatewayError::Config(format!("invalid stage: {:?}", self.stage)));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The resource identifier handed to the authorizer for a request
    pub fn method_arn(&self, method: &str, path: &str) -> String {
        format!(
            "arn:aws:execute-api:{}:{}:{}/{}/{}{}",
            self.region, self.account_id, self.api_id, self.stage, method, path
        )
    }
}

/// Start the gateway with the given configuration
pub async fn start_server(config: GatewayConfig) -> GatewayResult<()> {
    config.validate()?;

    let addr = config.bind_addr();
    let admin_path = config.admin_path.clone();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gateway listening on {}", addr);
    info!("Admin service mounted at http://{}{}?auth=<token>", addr, admin_path);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Start the gateway in a background task
pub fn spawn_server(config: GatewayConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            tracing::error!("Gateway error: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:3030");
    }

    #[test]
    fn test_env_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("GATEWAY_PORT", "8080"),
            ("GATEWAY_STAGE", "prod"),
            ("GATEWAY_API_ID", "a1b2c3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.stage, "prod");
        assert_eq!(config.api_id, "a1b2c3");
    }

    #[test]
    fn test_bad_port() {
        let result = GatewayConfig::from_lookup(lookup(&[("GATEWAY_PORT", "eighty")]));
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_validate() {
        assert!(GatewayConfig::new().with_admin_path("admin").validate().is_err());
        assert!(GatewayConfig::new().with_stage("").validate().is_err());
        assert!(GatewayConfig::new().with_stage("a/b").validate().is_err());
        assert!(GatewayConfig::new().validate().is_ok());
    }

    #[test]
    fn test_method_arn() {
        let config = GatewayConfig::new();
        assert_eq!(
            config.method_arn("GET", "/admin"),
            "arn:aws:execute-api:us-east-1:123456789012:local/dev/GET/admin"
        );
    }
}
