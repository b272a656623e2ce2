use ferrous_stub_domain::config::LogFormat;
use ferrous_stub_domain::{CliOverrides, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
/// Logs go to stderr so stdout carries only the lookup result.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    debug!(
        level = %config.logging.level,
        format = ?config.logging.format,
        "Logging initialized"
    );
}
