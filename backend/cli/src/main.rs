mod favorites_cmd;
mod feed_cmd;
mod terminal_output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};

use instafeed_config::Config;
use instafeed_gateway::{start_server, GatewayState};

#[derive(Parser)]
#[command(name = "instafeed")]
#[command(about = "Instafeed — Instagram gallery proxy and viewer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the feed proxy server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Load the gallery once through the proxy and print it
    Fetch {
        /// Print the envelope as JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Keep the gallery refreshed until Ctrl-C, reporting each update
    Watch {
        /// Refresh period in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Open one media item and print its detail view
    Show {
        /// Media id
        id: String,
    },
    /// Manage favourited media
    Favorites {
        #[command(subcommand)]
        action: favorites_cmd::FavoritesAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let _log_guard = logging::init_logger(config.log_dir.as_deref(), &config.log_level);

    let cli = Cli::parse();

    if let Err(errors) = instafeed_config::validate(&config) {
        for e in &errors {
            error!(key = %e.key, "{}", e.message);
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }
    debug!(config = %config.redacted(), "Configuration loaded");

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Fetch { json } => feed_cmd::fetch(&config, json).await?,
        Commands::Watch { interval } => {
            let config = Config {
                refresh_interval_secs: interval.unwrap_or(config.refresh_interval_secs).max(1),
                ..config
            };
            feed_cmd::watch(&config).await?;
        }
        Commands::Show { id } => feed_cmd::show(&config, &id).await?,
        Commands::Favorites { action } => favorites_cmd::run(&config, action).await?,
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let addr = config.listen_addr();
    info!(
        addr = %addr,
        graph = %config.graph_base_url,
        include_profile = config.include_profile,
        "Starting Instafeed proxy"
    );
    if config.access_token.is_none() {
        warn!("INSTAGRAM_ACCESS_TOKEN is not set; feed requests will be rejected");
    }

    start_server(&addr, GatewayState::from_config(config)).await
}
