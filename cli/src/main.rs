use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

use commands::{authorize, config, health, invoke, serve};

/// Gate CLI - run the request authorizer and the admin service locally
#[derive(Parser)]
#[command(name = "gate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true, env = "GATE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the authorizer against a token or an event file
    Authorize {
        /// Value of the `auth` query parameter
        #[arg(short, long)]
        auth: Option<String>,

        /// Resource identifier (method ARN); defaults to the gateway's admin route
        #[arg(short, long)]
        resource: Option<String>,

        /// Read a REQUEST authorizer event from a JSON file instead
        #[arg(short, long, conflicts_with_all = ["auth", "resource"])]
        event: Option<PathBuf>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Invoke the admin service with an authorizer context or an event file
    Invoke {
        /// Principal id the authorizer attached
        #[arg(short, long, required_unless_present = "event")]
        principal: Option<String>,

        /// Permission level the authorizer attached; defaults to the principal's tier
        #[arg(short, long)]
        level: Option<u32>,

        /// Read a proxy event from a JSON file instead
        #[arg(short, long, conflicts_with_all = ["principal", "level"])]
        event: Option<PathBuf>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Serve the admin service behind the authorizer over HTTP
    Serve {
        /// Address to bind (overrides GATEWAY_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides GATEWAY_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check whether a gateway is running
    Health {
        /// Health endpoint; defaults to the configured gateway
        #[arg(short, long)]
        url: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the gateway configuration resolved from the environment
    Config {
        /// Output format (json, yaml, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GATEWAY_* settings from a local .env if there is one
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let _guard = logging::init_logging(cli.verbose, cli.log_dir.as_deref())?;

    // Execute the command
    match cli.command {
        Commands::Authorize {
            auth,
            resource,
            event,
            format,
        } => {
            authorize::execute(auth, resource, event, format)?;
        }
        Commands::Invoke {
            principal,
            level,
            event,
            format,
        } => {
            invoke::execute(principal, level, event, format)?;
        }
        Commands::Serve { host, port } => {
            serve::execute(host, port).await?;
        }
        Commands::Health { url, format } => {
            health::execute(url, format).await?;
        }
        Commands::Config { format } => {
            config::show(format)?;
        }
    }

    Ok(())
}
