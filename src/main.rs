use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use incident_commander::config::{CommanderConfig, LoggingConfig};
use incident_commander::demo::{self, DemoClient};
use incident_commander::risk;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "incident-commander",
    about = "Incident triage service with escalation risk forecasting",
    version,
    long_about = None
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Walk a running server through detect -> predict -> assign -> notify
    Demo {
        /// Service base URL (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Pause after each step, in milliseconds
        #[arg(long)]
        pause_ms: Option<u64>,
    },

    /// Score a catalog incident offline
    Predict {
        /// Incident ID, e.g. INC-9001
        incident_id: String,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CommanderConfig::resolve(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            tracing::info!(bind = %config.server.bind, "Starting Incident Commander");
            incident_commander::serve(&config).await?;
        }
        Commands::Demo { base_url, pause_ms } => {
            let base_url = base_url.unwrap_or(config.demo.base_url);
            let pause = Duration::from_millis(pause_ms.unwrap_or(config.demo.pause_ms));
            let client = DemoClient::new(&base_url)?;
            demo::run_demo(&client, pause)
                .await
                .with_context(|| format!("demo against {base_url} failed"))?;
        }
        Commands::Predict { incident_id, json } => {
            let catalog = incident_commander::load_catalog(&config)?;
            let incident = catalog
                .incident(&incident_id)
                .with_context(|| format!("no incident {incident_id} in the catalog"))?;
            let stats = catalog.stats_for(&incident.system);
            let assessment = risk::predict_risk(incident, &stats);

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("\n=== Incident Commander Risk Assessment ===");
                println!("Incident:       {} ({})", incident.incident_id, incident.system);
                println!("Description:    {}", incident.description);
                println!("Probability:    {:.2}", assessment.probability);
                println!("Risk Tier:      {}", assessment.tier);
                println!("ETA to failure: {} min", assessment.eta_minutes);
                println!("Owner:          {}", catalog.resolve_owner(assessment.tier.as_str()));
                println!("Recommended:    {}", assessment.recommendation);
                println!("==========================================\n");
            }
        }
    }

    Ok(())
}
