use anyhow::Result;
use colored::*;
use gateway::GatewayConfig;
use serde_json::json;

/// Execute the health check command
pub async fn execute(url: Option<String>, format: String) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => {
            let config = GatewayConfig::from_env()?;
            format!("http://{}/health", config.bind_addr())
        }
    };

    let health_status = check_gateway_health(&url).await;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&health_status)?);
        }
        _ => {
            print_health_status_text(&health_status);
        }
    }

    Ok(())
}

/// Check whether a gateway answers on the given health endpoint
async fn check_gateway_health(url: &str) -> serde_json::Value {
    match reqwest::get(url).await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                let details = response.json::<serde_json::Value>().await.ok();
                json!({
                    "status": "healthy",
                    "message": "Gateway is running and responsive",
                    "endpoint": url,
                    "details": details
                })
            } else {
                json!({
                    "status": "unhealthy",
                    "message": format!("Gateway returned status: {}", status),
                    "endpoint": url
                })
            }
        }
        Err(_) => json!({
            "status": "offline",
            "message": "Gateway is not running or not reachable",
            "endpoint": url
        }),
    }
}

/// Print health status in a formatted text output
fn print_health_status_text(status: &serde_json::Value) {
    println!("{}", "=== Gateway Health Check ===".bold());
    println!();

    let overall_status = status["status"].as_str().unwrap_or("unknown");
    let status_display = match overall_status {
        "healthy" => "HEALTHY".green().bold(),
        "unhealthy" => "UNHEALTHY".red().bold(),
        "offline" => "OFFLINE".white().bold(),
        _ => "UNKNOWN".white().bold(),
    };

    println!("Overall Status: {}", status_display);
    println!("Endpoint: {}", status["endpoint"].as_str().unwrap_or(""));
    if let Some(message) = status["message"].as_str() {
        println!("{}", message);
    }

    if let Some(details) = status["details"].as_object() {
        if let Some(stage) = details.get("stage").and_then(|s| s.as_str()) {
            println!("Stage: {}", stage);
        }
        if let Some(version) = details.get("version").and_then(|v| v.as_str()) {
            println!("Version: {}", version);
        }
    }
}
