use anyhow::{anyhow, Result};
use gateway::GatewayConfig;
use tracing::info;

/// Run the local gateway until interrupted
pub async fn execute(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    info!(
        "Starting gateway on {} (stage {}, api {})",
        config.bind_addr(),
        config.stage,
        config.api_id
    );

    tokio::select! {
        result = gateway::start_server(config) => {
            result.map_err(|e| anyhow!("Gateway stopped: {}", e))
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Gateway shutting down");
            Ok(())
        }
    }
}
