use admin_service::{
    event::{ProxyRequest, ProxyResponse},
    AdminService,
};
use anyhow::{anyhow, Context, Result};
use authz::types::{AuthorizerContext, PermissionLevel};
use colored::*;
use std::path::PathBuf;

/// Invoke the admin service once and print its response
///
/// Without an explicit level the principal's tier from the permission table
/// is used, as the authorizer would have attached it.
pub fn execute(
    principal: Option<String>,
    level: Option<u32>,
    event: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let service = AdminService::new();

    let response = match event {
        Some(path) => {
            let payload = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read event file {}", path.display()))?;
            service.handle_json(&payload)
        }
        None => {
            let principal =
                principal.ok_or_else(|| anyhow!("--principal is required without --event"))?;
            let level = level
                .map(PermissionLevel::new)
                .unwrap_or_else(|| PermissionLevel::for_principal_id(&principal));
            service.handle(&ProxyRequest::authorized(AuthorizerContext::new(
                principal, level,
            )))
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

fn print_response_text(response: &ProxyResponse) {
    let verdict = match response.status_code {
        200..=299 => "OK".green().bold(),
        403 => "FORBIDDEN".yellow().bold(),
        _ => "FAULT".red().bold(),
    };

    println!("{}", "=== Admin Service Response ===".bold());
    println!();
    println!("Status: {} {}", response.status_code, verdict);
    match response.message() {
        Some(message) => println!("Message: {}", message),
        None => println!("Body: {}", response.body),
    }
}
