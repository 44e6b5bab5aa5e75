use anyhow::{Context, Result};
use authz::{
    event::AuthorizerResponse,
    types::{AuthorizationRequest, Effect, AUTH_ATTRIBUTE},
    Authorizer,
};
use colored::*;
use gateway::GatewayConfig;
use std::path::PathBuf;

/// Run the authorizer once and print its response
pub fn execute(
    auth: Option<String>,
    resource: Option<String>,
    event: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let authorizer = Authorizer::new();

    let response = match event {
        Some(path) => {
            let payload = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read event file {}", path.display()))?;
            authorizer.handle_json(&payload)?
        }
        None => {
            let resource = match resource {
                Some(resource) => resource,
                None => {
                    let config = GatewayConfig::from_env()?;
                    config.method_arn("GET", &config.admin_path)
                }
            };

            let mut request = AuthorizationRequest::new(resource);
            if let Some(token) = auth {
                request = request.with_attribute(AUTH_ATTRIBUTE, token);
            }

            let decision = authorizer.authorize(&request)?;
            AuthorizerResponse::from(&decision)
        }
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => {
            print_response_text(&response);
        }
    }

    Ok(())
}

fn print_response_text(response: &AuthorizerResponse) {
    println!("{}", "=== Authorizer Decision ===".bold());
    println!();
    println!("Principal: {}", response.principal_id);
    println!("Permission level: {}", response.context.permission_level);

    for statement in &response.policy_document.statement {
        let effect = match statement.effect {
            Effect::Allow => "ALLOW".green().bold(),
            Effect::Deny => "DENY".red().bold(),
        };
        println!("Effect: {}", effect);
        println!("Action: {}", statement.action);
        println!("Resource: {}", statement.resource);
    }
}
