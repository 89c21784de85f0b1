use clap::Parser;
use stub_dns_domain::config::LogFormat;
use stub_dns_domain::{CliOverrides, PolicyAction, PolicyRule};
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "stub-dns")]
#[command(version)]
#[command(about = "Stub DNS responder with scripted answers and failures")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Bind without SO_REUSEADDR / SO_REUSEPORT
    #[arg(long)]
    no_reuse_address: bool,

    /// Number of sockets sharing the port
    #[arg(long)]
    workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Rule as NAME=ACTION, where ACTION is servfail, nxdomain or an IPv4 address
    #[arg(long = "rule", value_name = "NAME=ACTION")]
    rules: Vec<PolicyRule>,

    /// Action for names no rule matches
    #[arg(long, value_name = "ACTION")]
    default_action: Option<PolicyAction>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        reuse_address: cli.no_reuse_address.then_some(false),
        workers: cli.workers,
        log_level: cli.log_level,
        log_format: cli.log_format,
        rules: cli.rules,
        default_action: cli.default_action,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting stub DNS responder v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    tokio::spawn(server::cancel_on_signal(shutdown.clone()));

    server::start_dns_server(&config, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
