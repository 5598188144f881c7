use clap::Parser;
use endpoint_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "endpoint-dns")]
#[command(version)]
#[command(about = "UDP DNS responder backed by Kubernetes Endpoints objects")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Number of UDP worker sockets
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Namespace whose Endpoints objects are served
    #[arg(short = 'n', long)]
    namespace: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind,
        dns_port: cli.port,
        worker_threads: cli.workers,
        namespace: cli.namespace,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Endpoint DNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    let server = server::DnsServer::start(&config.server, services.handler)?;

    info!("Endpoint DNS started");

    tokio::signal::ctrl_c().await?;

    server.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}
