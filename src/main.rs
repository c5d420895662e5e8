use clap::Parser;
use respkv::{server, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// respkv server
#[derive(Parser, Debug)]
#[command(name = "respkv-server")]
#[command(about = "Redis-protocol-compatible in-memory key-value server")]
#[command(version)]
struct Args {
    /// Address to listen on [default: 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on [default: 6379]
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("{}", respkv::version_info());

    let config = ServerConfig::new(args.host, args.port)?;
    info!("Starting server on {}", config.addr());

    if let Err(e) = server::run(&config).await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
