use anyhow::Result;
use colored::*;
use gateway::GatewayConfig;

/// Show the gateway configuration resolved from the environment
pub fn show(format: String) -> Result<()> {
    let config = GatewayConfig::from_env()?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        "yaml" => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            print_config_text(&config);
        }
    }

    Ok(())
}

fn print_config_text(config: &GatewayConfig) {
    println!("{}", "=== Gateway Configuration ===".bold());
    println!();
    println!("{}: {}", "host".cyan(), config.host);
    println!("{}: {}", "port".cyan(), config.port);
    println!("{}: {}", "region".cyan(), config.region);
    println!("{}: {}", "account_id".cyan(), config.account_id);
    println!("{}: {}", "api_id".cyan(), config.api_id);
    println!("{}: {}", "stage".cyan(), config.stage);
    println!("{}: {}", "admin_path".cyan(), config.admin_path);
    println!();
    println!(
        "{}: {}",
        "admin method ARN".bold(),
        config.method_arn("GET", &config.admin_path)
    );
}
