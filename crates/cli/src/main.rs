use clap::Parser;
use ferrous_stub_domain::{CliOverrides, RecordType};
use ferrous_stub_infrastructure::dns::StubResolver;
use tracing::{error, info};

mod bootstrap;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-stub")]
#[command(version)]
#[command(about = "Ferrous Stub - minimal DNS stub resolver")]
struct Cli {
    /// Domain name to look up
    domain: String,

    /// Record type (A, AAAA, MX, ... or a numeric code)
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: RecordType,

    /// Resolver IP address
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Resolver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Per-attempt timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Send attempts (only timeouts are retried)
    #[arg(long)]
    attempts: Option<u32>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        port: cli.port,
        timeout_ms: cli.timeout_ms,
        attempts: cli.attempts,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    let resolver = StubResolver::from_config(&config.resolver)?;
    info!(
        domain = %cli.domain,
        record_type = %cli.record_type,
        server = %resolver.transport().server_addr(),
        "Resolving"
    );

    let lookup = resolver
        .resolve(&cli.domain, cli.record_type.to_u16())
        .await
        .inspect_err(|e| error!(error = %e, "Lookup failed"))?;

    print!("{}", output::render(&lookup));

    Ok(())
}
